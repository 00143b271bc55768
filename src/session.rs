use std::{collections::BTreeSet, path::Path};

use crate::{
    build_draft, codec, storage, DispatchValidationError, Dispatcher, Error, HeaderEntry,
    HeaderGrammar, MalformedDraftError, MessageDraft, PersistenceError, SessionConfig, Topic,
    TopicSource,
};

/// The editable state behind a producer screen.
///
/// A session owns a table of header rows (starting with one blank row) and the topic, key and
/// body fields. Front-ends mutate it in response to user input and ask it to build, save or
/// dispatch a [`MessageDraft`]. Every operation takes effect immediately; there is no commit
/// step. Failing operations leave the state exactly as it was.
#[derive(Debug)]
pub struct CompositionSession<D> {
    dispatcher: D,
    grammar: HeaderGrammar,
    topics: Vec<Topic>,
    topic: String,
    key: String,
    body: String,
    rows: Vec<HeaderEntry>,
}

impl<D> CompositionSession<D> {
    /// Start a session with the default configuration.
    pub fn new<T>(topic_source: &T, dispatcher: D) -> Self
    where
        T: TopicSource + ?Sized,
    {
        Self::with_config(topic_source, dispatcher, SessionConfig::default())
    }

    /// Start a session.
    ///
    /// The topics offered by `topic_source` are sorted and de-duplicated once, here.
    pub fn with_config<T>(topic_source: &T, dispatcher: D, config: SessionConfig) -> Self
    where
        T: TopicSource + ?Sized,
    {
        let topics: Vec<Topic> = topic_source
            .topics()
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        tracing::debug!(topics = topics.len(), "starting composition session");
        CompositionSession {
            dispatcher,
            grammar: config.header_grammar,
            topics,
            topic: config.initial_topic.unwrap_or_default(),
            key: String::new(),
            body: String::new(),
            rows: vec![HeaderEntry::blank()],
        }
    }

    /// Known topics, sorted.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Raw topic field.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Replace the topic field. The topic does not have to be one of [`topics`](Self::topics).
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    /// Raw key field.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the key field.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Raw body field.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replace the body field.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// The header table, including blank and duplicate rows.
    pub fn rows(&self) -> &[HeaderEntry] {
        &self.rows
    }

    /// Mutable access to one row of the header table.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut HeaderEntry> {
        self.rows.get_mut(index)
    }

    /// Overwrite the row at `index`. Returns `false` if there is no such row.
    pub fn set_row(
        &mut self,
        index: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                *row = HeaderEntry::new(key, value);
                true
            }
            None => false,
        }
    }

    /// Append an empty row to the header table.
    pub fn add_blank_row(&mut self) {
        self.rows.push(HeaderEntry::blank());
        tracing::debug!(rows = self.rows.len(), "added header row");
    }

    /// Remove the selected row.
    ///
    /// Nothing happens when no row is selected or the index is out of range.
    pub fn remove_row(&mut self, selected: Option<usize>) -> Option<HeaderEntry> {
        let index = selected.filter(|&index| index < self.rows.len())?;
        let removed = self.rows.remove(index);
        tracing::debug!(index, rows = self.rows.len(), "removed header row");
        Some(removed)
    }

    /// Replace the header table with the headers found in pasted text.
    ///
    /// Blank text is ignored and the table is kept. Otherwise the table is replaced by the parsed
    /// headers, in order, even if none were found. Returns whether the table was replaced.
    pub fn import_headers(&mut self, raw: &str) -> bool {
        if raw.trim().is_empty() {
            return false;
        }
        let headers = self.grammar.parse(raw);
        tracing::debug!(headers = headers.len(), "imported pasted headers");
        self.rows = headers.into_iter().map(HeaderEntry::from).collect();
        true
    }

    /// Pretty-print the body if it holds JSON. Returns whether the body was changed.
    pub fn format_body(&mut self) -> bool {
        match codec::format_json(&self.body) {
            Some(formatted) if formatted != self.body => {
                self.body = formatted;
                true
            }
            _ => false,
        }
    }

    /// Build a draft from the current state without modifying it.
    pub fn build_for_dispatch(&self) -> MessageDraft {
        build_draft(&self.topic, &self.key, &self.body, &self.rows)
    }

    /// Replace the session state with a serialized draft.
    ///
    /// On error the state is left unchanged.
    pub fn load_from(&mut self, serialized: &str) -> Result<(), MalformedDraftError> {
        let draft = codec::deserialize(serialized).map_err(|err| {
            tracing::warn!(error = %err, "rejected malformed draft");
            err
        })?;
        self.apply(draft);
        Ok(())
    }

    /// Replace the session state with the draft stored in a file.
    ///
    /// On error the state is left unchanged.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let draft = storage::read_draft(path).map_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "could not load draft");
            err
        })?;
        tracing::info!(path = %path.display(), "loaded draft");
        self.apply(draft);
        Ok(())
    }

    /// Build a draft from the current state and serialize it.
    pub fn save_to(&self) -> Result<String, PersistenceError> {
        codec::serialize(&self.build_for_dispatch())
    }

    /// Build a draft from the current state and write it to a file.
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        storage::write_draft(path, &self.build_for_dispatch()).map_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "could not save draft");
            err
        })?;
        tracing::info!(path = %path.display(), "saved draft");
        Ok(())
    }

    fn apply(&mut self, draft: MessageDraft) {
        let (topic, key, body, headers) = draft.into_parts();
        self.topic = topic.to_string();
        self.key = key;
        self.body = body;
        self.rows = headers.into_iter().map(HeaderEntry::from).collect();
    }
}

impl<D: Dispatcher> CompositionSession<D> {
    /// Build a draft from the current state and hand it to the dispatcher.
    ///
    /// A rejection from the dispatcher is returned as is. The session state is not modified
    /// either way.
    pub async fn dispatch(&self) -> Result<D::MessageId, DispatchValidationError> {
        let draft = self.build_for_dispatch();
        let topic = draft.topic().clone();
        match self.dispatcher.dispatch(draft).await {
            Ok(id) => {
                tracing::info!(%topic, "dispatched message");
                Ok(id)
            }
            Err(err) => {
                tracing::warn!(%topic, error = %err, "dispatcher rejected message");
                Err(err)
            }
        }
    }
}
