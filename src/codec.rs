//! The JSON text form of a [`MessageDraft`].
//!
//! A draft is stored as an object with the fields `topicName`, `key`, `message` and `headers`.
//! Header order is preserved. On load, unknown fields are ignored, `body` is accepted in place of
//! `message` and a missing `headers` object means no headers.

use crate::{MalformedDraftError, MessageDraft, PersistenceError};

/// Encode a draft as pretty-printed JSON.
pub fn serialize(draft: &MessageDraft) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(draft).map_err(PersistenceError::Encode)
}

/// Decode a draft from its JSON text.
///
/// Fails when `text` is not JSON or when `topicName`, `key` or `message` is missing.
pub fn deserialize(text: &str) -> Result<MessageDraft, MalformedDraftError> {
    serde_json::from_str(text).map_err(MalformedDraftError)
}

/// Pretty-print `text` if it is a JSON document, keeping object keys in their original order.
///
/// Returns `None` when `text` is not valid JSON.
pub fn format_json(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    serde_json::to_string_pretty(&value).ok()
}
