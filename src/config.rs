use std::io;

use crate::HeaderGrammar;

/// Settings for a [`CompositionSession`](crate::CompositionSession).
///
/// Every field has a default, so a configuration file only needs to name what it changes:
///
/// ```
/// use courier::SessionConfig;
///
/// let config = SessionConfig::from_json_str(r#"{ "initial_topic": "orders" }"#).unwrap();
/// assert_eq!(config.initial_topic.as_deref(), Some("orders"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How pasted header listings are split into entries and key/value pairs.
    pub header_grammar: HeaderGrammar,
    /// Topic selected when the session starts.
    pub initial_topic: Option<String>,
}

impl SessionConfig {
    /// Load a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<SessionConfig, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a configuration from a JSON reader.
    pub fn from_reader<R>(reader: R) -> Result<SessionConfig, serde_json::Error>
    where
        R: io::Read,
    {
        serde_json::from_reader(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(
            SessionConfig::from_json_str("{}").unwrap(),
            SessionConfig::default()
        );
    }

    #[test]
    fn custom_grammar() {
        let json = r#"{ "header_grammar": { "entry_separators": [";"], "pair_separators": ["="] } }"#;
        let config = SessionConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.header_grammar, HeaderGrammar::new([';'], ['=']));
        assert_eq!(config.initial_topic, None);
    }

    #[test]
    fn invalid_json() {
        assert!(SessionConfig::from_json_str("{ header_grammar").is_err());
    }
}
