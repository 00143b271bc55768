use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;
use parking_lot::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::{DispatchValidationError, Dispatcher, FieldError, MessageDraft, Topic};

/// A mock dispatcher that stores messages in-memory for later verification.
///
/// Like a broker, it refuses drafts with a blank topic, and when constructed
/// [`with_known_topics`](MockDispatcher::with_known_topics) it refuses topics outside that set.
///
/// This is useful primarily in tests.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "mock")]
/// # {
/// use courier::dispatchers::MockDispatcher;
/// let dispatcher = MockDispatcher::default();
/// let dispatcher_view = dispatcher.clone();
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockDispatcher {
    delivered: Arc<Mutex<Vec<(Uuid, MessageDraft)>>>,
    known_topics: Option<Arc<BTreeSet<Topic>>>,
}

impl MockDispatcher {
    /// Create a new mock dispatcher accepting any non-blank topic.
    pub fn new() -> Self {
        Default::default()
    }

    /// Create a mock dispatcher that only accepts the given topics.
    pub fn with_known_topics<I, T>(topics: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Topic>,
    {
        MockDispatcher {
            delivered: Default::default(),
            known_topics: Some(Arc::new(topics.into_iter().map(Into::into).collect())),
        }
    }

    /// Number of messages delivered to this dispatcher.
    pub fn len(&self) -> usize {
        self.delivered.lock().len()
    }

    /// Whether no message was delivered to this dispatcher.
    pub fn is_empty(&self) -> bool {
        self.delivered.lock().is_empty()
    }

    /// Verify that a message was delivered. This method asserts that the message you expected to
    /// be delivered to `topic` was indeed delivered.
    ///
    /// Panics if the message was not delivered.
    pub fn assert_message_dispatched(&self, topic: &Topic, id: &Uuid) {
        {
            let delivered = self.delivered.lock();
            if delivered
                .iter()
                .any(|(msg_id, draft)| msg_id == id && draft.topic() == topic)
            {
                return;
            }
        }
        panic!("Message with id {} was not dispatched to topic {}", id, topic);
    }

    /// Get a view over the messages that have been delivered to this dispatcher
    pub fn messages(&self) -> Messages<'_> {
        Messages(self.delivered.lock())
    }

    fn check(&self, draft: &MessageDraft) -> Result<(), DispatchValidationError> {
        let topic = draft.topic();
        if topic.is_blank() {
            return Err(FieldError::new("topicName", "should not be empty").into());
        }
        match &self.known_topics {
            Some(known) if !known.contains(topic) => {
                Err(FieldError::new("topicName", format!("`{}` does not exist", topic)).into())
            }
            _ => Ok(()),
        }
    }
}

/// A view over the messages in a `MockDispatcher`, returned by
/// [`messages`](MockDispatcher::messages)
#[derive(Debug)]
pub struct Messages<'a>(MutexGuard<'a, Vec<(Uuid, MessageDraft)>>);

impl<'a> Messages<'a> {
    /// Get an iterator over the messages in the `MockDispatcher`, in delivery order
    pub fn iter(&self) -> impl Iterator<Item = &(Uuid, MessageDraft)> {
        self.0.iter()
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    type MessageId = Uuid;

    async fn dispatch(&self, draft: MessageDraft) -> Result<Uuid, DispatchValidationError> {
        self.check(&draft)?;
        let id = Uuid::new_v4();
        self.delivered.lock().push((id, draft));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Headers;

    fn draft(topic: &str) -> MessageDraft {
        MessageDraft::new(topic, "k", "body", Headers::new())
    }

    #[tokio::test]
    async fn records_deliveries_in_order() {
        let dispatcher = MockDispatcher::new();
        let view = dispatcher.clone();

        let first = dispatcher.dispatch(draft("a")).await.unwrap();
        let second = dispatcher.dispatch(draft("b")).await.unwrap();

        assert_eq!(view.len(), 2);
        view.assert_message_dispatched(&Topic::from("a"), &first);
        view.assert_message_dispatched(&Topic::from("b"), &second);
        let ids: Vec<_> = view.messages().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, [first, second]);
    }

    #[tokio::test]
    async fn rejects_blank_topic() {
        let dispatcher = MockDispatcher::new();
        let err = dispatcher.dispatch(draft("  ")).await.unwrap_err();
        assert_eq!(err.errors(), [FieldError::new("topicName", "should not be empty")]);
        assert!(dispatcher.is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_topic() {
        let dispatcher = MockDispatcher::with_known_topics(["orders"]);
        assert!(dispatcher.dispatch(draft("orders")).await.is_ok());
        let err = dispatcher.dispatch(draft("audit")).await.unwrap_err();
        assert_eq!(
            err.formatted_errors(),
            "topicName `audit` does not exist"
        );
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    #[should_panic(expected = "was not dispatched")]
    fn assert_panics_for_missing_message() {
        MockDispatcher::new().assert_message_dispatched(&Topic::from("a"), &Uuid::new_v4());
    }
}
