//! Parsing of header listings pasted from broker inspection tools.
//!
//! Most tools print one `key: value` or `key=value` pair per line, which is what the default
//! [`HeaderGrammar`] expects. Kafdrop renders a record's headers on a single line as
//! `key: value, key: value`; use [`HeaderGrammar::kafdrop`] for that listing. A grammar describes
//! which characters separate entries and which separate a key from its value, and turns such text
//! into ordered [`Headers`].
//!
//! Parsing never fails. Segments without a separator or with a blank key are skipped, and text
//! with no usable segment yields empty headers.

use crate::Headers;

/// The delimiter convention of a pasted header listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct HeaderGrammar {
    /// Characters that separate one header entry from the next.
    pub entry_separators: Vec<char>,
    /// Characters that separate a key from its value. The first one found in a segment wins,
    /// so values may themselves contain separators.
    pub pair_separators: Vec<char>,
}

impl Default for HeaderGrammar {
    fn default() -> Self {
        HeaderGrammar {
            entry_separators: vec!['\n'],
            pair_separators: vec![':', '='],
        }
    }
}

impl HeaderGrammar {
    /// Construct a grammar from explicit separator sets.
    pub fn new<E, P>(entry_separators: E, pair_separators: P) -> Self
    where
        E: IntoIterator<Item = char>,
        P: IntoIterator<Item = char>,
    {
        HeaderGrammar {
            entry_separators: entry_separators.into_iter().collect(),
            pair_separators: pair_separators.into_iter().collect(),
        }
    }

    /// The single-line `key: value, key: value` listing printed by Kafdrop.
    ///
    /// Values containing a comma cannot be told apart from the next entry in this format.
    pub fn kafdrop() -> Self {
        Self::new(['\n', ','], [':', '='])
    }

    /// Parse `raw` into headers.
    ///
    /// Keys and values are trimmed. When a key repeats, the later value wins but the entry keeps
    /// the position of the first occurrence.
    pub fn parse(&self, raw: &str) -> Headers {
        let mut headers = Headers::new();
        for segment in raw.split(|c: char| self.entry_separators.contains(&c)) {
            if let Some((key, value)) = self.split_pair(segment) {
                headers.insert(key.to_owned(), value.to_owned());
            }
        }
        headers
    }

    fn split_pair<'a>(&self, segment: &'a str) -> Option<(&'a str, &'a str)> {
        let (key, value) = segment.split_once(|c: char| self.pair_separators.contains(&c))?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key, value.trim()))
    }
}

/// Parse `raw` with the default [`HeaderGrammar`].
pub fn parse_headers(raw: &str) -> Headers {
    HeaderGrammar::default().parse(raw)
}
