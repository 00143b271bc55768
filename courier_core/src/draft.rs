//! Draft related types

use crate::{Headers, Topic};

/// One editable key/value row of a header table.
///
/// Rows are raw user input: keys may repeat and either side may be blank. They are normalized
/// only when a [`MessageDraft`] is built from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HeaderEntry {
    /// Header name as typed.
    pub key: String,
    /// Header value as typed.
    pub value: String,
}

impl HeaderEntry {
    /// Create a new row
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A row with an empty key and value.
    pub fn blank() -> Self {
        Self::default()
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for HeaderEntry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// A composed message, ready to be dispatched or saved.
///
/// Drafts are immutable once built. The topic, key and body are always stored trimmed, and the
/// headers never hold an entry whose value is blank.
///
/// The serialized form uses the field names `topicName`, `key`, `message` and `headers`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "DraftRecord")]
pub struct MessageDraft {
    #[serde(rename = "topicName")]
    topic: Topic,
    key: String,
    #[serde(rename = "message")]
    body: String,
    headers: Headers,
}

impl MessageDraft {
    /// Create a new draft, normalizing the given fields.
    ///
    /// Topic, key and body are trimmed. Header values are trimmed and entries whose value is
    /// blank are dropped; header keys are kept as given.
    pub fn new<T, K, B>(topic: T, key: K, body: B, headers: Headers) -> Self
    where
        T: AsRef<str>,
        K: AsRef<str>,
        B: AsRef<str>,
    {
        let headers = headers
            .into_iter()
            .filter_map(|(name, value)| {
                let value = value.trim();
                (!value.is_empty()).then(|| (name, value.to_owned()))
            })
            .collect();
        Self {
            topic: topic.as_ref().trim().into(),
            key: key.as_ref().trim().to_owned(),
            body: body.as_ref().trim().to_owned(),
            headers,
        }
    }

    /// Topic this draft is addressed to.
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Message key. May be empty.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Message body. May be empty.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Message headers, in insertion order.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Destructure this draft into its topic, key, body and headers.
    pub fn into_parts(self) -> (Topic, String, String, Headers) {
        (self.topic, self.key, self.body, self.headers)
    }
}

// Loaded drafts go through `MessageDraft::new` so the invariants hold for any input file.
#[derive(serde::Deserialize)]
struct DraftRecord {
    #[serde(rename = "topicName")]
    topic: String,
    key: String,
    #[serde(rename = "message", alias = "body")]
    body: String,
    #[serde(default, deserialize_with = "lenient_headers")]
    headers: Headers,
}

// Header values written by other tools are not always strings.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum HeaderValue {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
    Null,
}

impl HeaderValue {
    fn into_text(self) -> String {
        match self {
            HeaderValue::Text(text) => text,
            HeaderValue::Signed(n) => n.to_string(),
            HeaderValue::Unsigned(n) => n.to_string(),
            HeaderValue::Float(n) => n.to_string(),
            HeaderValue::Flag(flag) => flag.to_string(),
            HeaderValue::Null => String::new(),
        }
    }
}

/// `null` means no headers; scalar values are read as their text form.
fn lenient_headers<'de, D>(deserializer: D) -> Result<Headers, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<indexmap::IndexMap<String, HeaderValue>> =
        serde::Deserialize::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| (name, value.into_text()))
        .collect())
}

impl From<DraftRecord> for MessageDraft {
    fn from(record: DraftRecord) -> Self {
        MessageDraft::new(record.topic, record.key, record.body, record.headers)
    }
}
