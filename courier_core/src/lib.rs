//! The core set of types used when composing a message for a broker topic.
//!
//! This crate aims to provide better version stability over the primary batteries-included
//! `courier` crate. Front-ends that only pass drafts around should depend on `courier_core`,
//! while the composition, parsing and persistence logic lives in `courier`.

mod topic;
pub use topic::Topic;
pub mod draft;
pub use draft::{HeaderEntry, MessageDraft};

/// Custom headers associated with a message.
///
/// Iteration follows insertion order; re-inserting an existing key replaces the value in place.
pub type Headers = indexmap::IndexMap<String, String>;
