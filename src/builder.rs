//! Turning raw form state into a [`MessageDraft`].

use crate::{HeaderEntry, Headers, MessageDraft};

/// Build a draft from raw field values and header rows.
///
/// Topic, key and body are trimmed. Rows are folded in order: keys and values are trimmed, a row
/// whose value is blank is dropped even when its key is not, and a later row with a repeated key
/// overwrites the earlier value in place.
///
/// No semantic validation happens here. A blank topic produces a draft with a blank topic; it is
/// up to the [`Dispatcher`](crate::Dispatcher) to reject it.
pub fn build_draft<'a, I>(topic: &str, key: &str, body: &str, rows: I) -> MessageDraft
where
    I: IntoIterator<Item = &'a HeaderEntry>,
{
    let mut headers = Headers::new();
    for row in rows {
        let value = row.value.trim();
        if !value.is_empty() {
            headers.insert(row.key.trim().to_owned(), value.to_owned());
        }
    }
    MessageDraft::new(topic, key, body, headers)
}
