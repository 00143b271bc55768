use async_trait::async_trait;

use crate::{DispatchValidationError, Dispatcher, MessageDraft};

/// A blackhole dispatcher that doesn't deliver messages anywhere.
///
/// Useful for sessions that only compose and save drafts.
///
/// # Examples
///
/// ```
/// use courier::dispatchers::NullDispatcher;
/// let dispatcher = NullDispatcher::default();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDispatcher;

#[async_trait]
impl Dispatcher for NullDispatcher {
    type MessageId = ();

    async fn dispatch(&self, draft: MessageDraft) -> Result<(), DispatchValidationError> {
        tracing::trace!(topic = %draft.topic(), "discarding draft");
        Ok(())
    }
}
