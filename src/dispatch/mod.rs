//! The collaborators a composition session hands its drafts to.
//!
//! Talking to an actual broker is outside the scope of this crate. Front-ends provide a
//! [`Dispatcher`] that delivers a [`MessageDraft`] and a [`TopicSource`] that lists the topics
//! offered for selection.

use std::{collections::BTreeSet, fmt};

use async_trait::async_trait;

use crate::{MessageDraft, Topic};

pub mod dispatchers;

/// Message dispatchers.
///
/// A dispatcher delivers a built draft to the broker. It may reject the draft for its own
/// reasons (an empty topic, a broker that cannot be reached); such rejections are reported as a
/// [`DispatchValidationError`] and are passed to the caller unchanged.
#[async_trait]
pub trait Dispatcher {
    /// The identifier for a successfully dispatched message.
    type MessageId: Send + 'static;

    /// Deliver one message.
    async fn dispatch(
        &self,
        draft: MessageDraft,
    ) -> Result<Self::MessageId, DispatchValidationError>;
}

#[async_trait]
impl<'a, D> Dispatcher for &'a D
where
    D: Dispatcher + Sync + ?Sized,
{
    type MessageId = D::MessageId;

    async fn dispatch(
        &self,
        draft: MessageDraft,
    ) -> Result<Self::MessageId, DispatchValidationError> {
        (**self).dispatch(draft).await
    }
}

/// The set of topics known to the broker.
pub trait TopicSource {
    /// All known topics, in no particular order.
    fn topics(&self) -> Vec<Topic>;
}

impl TopicSource for [Topic] {
    fn topics(&self) -> Vec<Topic> {
        self.to_vec()
    }
}

impl TopicSource for Vec<Topic> {
    fn topics(&self) -> Vec<Topic> {
        self.clone()
    }
}

impl TopicSource for BTreeSet<Topic> {
    fn topics(&self) -> Vec<Topic> {
        self.iter().cloned().collect()
    }
}

/// A single field-level complaint from a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field, e.g. `topicName`.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Construct a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// A dispatcher refused to deliver a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not create the message: {}", self.formatted_errors())]
pub struct DispatchValidationError {
    errors: Vec<FieldError>,
}

impl DispatchValidationError {
    /// Construct a new validation error from field errors.
    pub fn new(errors: Vec<FieldError>) -> Self {
        DispatchValidationError { errors }
    }

    /// A validation error with a single field error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }

    /// The individual field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The field errors joined into one line.
    pub fn formatted_errors(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<FieldError> for DispatchValidationError {
    fn from(error: FieldError) -> Self {
        Self::new(vec![error])
    }
}
