//! Courier composes a single message for a broker topic: a key, a body and a set of headers.
//!
//! The crate takes care of the fiddly parts of a producer screen. Header listings pasted from a
//! broker inspection tool are parsed into ordered key/value pairs, raw form fields are normalized
//! into an immutable [`MessageDraft`], and drafts are saved to and loaded from JSON files for
//! reuse. Delivery to the broker is left to a [`Dispatcher`] implementation supplied by the
//! caller.
//!
//! # Examples
//!
//! Compose and save a message
//!
//! ```no_run
//! use courier::{dispatchers::NullDispatcher, CompositionSession, Topic};
//!
//! # fn main() -> Result<(), courier::Error> {
//! let topics = vec![Topic::from("orders"), Topic::from("audit")];
//! let mut session = CompositionSession::new(&topics, NullDispatcher);
//!
//! session.set_topic("orders");
//! session.set_key("order-17");
//! session.set_body(r#"{"id":17}"#);
//! session.import_headers("trace-id: 42\ntenant: acme");
//!
//! session.save_file("order-17.json")?;
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs, unused_import_braces, unused_qualifications)]
#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::{io, path::PathBuf};

pub use courier_core::{HeaderEntry, Headers, MessageDraft, Topic};

pub mod builder;
pub mod codec;
mod config;
pub mod dispatch;
pub mod headers;
mod session;
pub mod storage;

pub use builder::build_draft;
pub use config::SessionConfig;
pub use dispatch::{dispatchers, DispatchValidationError, Dispatcher, FieldError, TopicSource};
pub use headers::{parse_headers, HeaderGrammar};
pub use session::CompositionSession;

#[cfg(test)]
mod tests;

/// The persisted text is not a valid or complete draft.
///
/// Returned when loading a draft. The session that attempted the load is left untouched.
#[derive(Debug, thiserror::Error)]
#[error("could not load the file: {0}")]
pub struct MalformedDraftError(#[source] pub serde_json::Error);

/// The storage underneath a draft file failed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PersistenceError {
    /// Could not read the draft file
    #[error("could not load the file `{}`", path.display())]
    Read {
        /// The file that was being read
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: io::Error,
    },
    /// Could not write the draft file
    #[error("could not save the file `{}`", path.display())]
    Write {
        /// The file that was being written
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: io::Error,
    },
    /// Could not encode the draft
    #[error("could not save the file: unable to encode the draft")]
    Encode(#[source] serde_json::Error),
}

/// Errors from operations that can fail both on storage and on decoding, such as loading a
/// draft file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The draft text could not be decoded
    #[error(transparent)]
    Malformed(#[from] MalformedDraftError),

    /// The draft file could not be read or written
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
