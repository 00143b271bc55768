use smallstr::SmallString;

/// A message broker topic name to which messages can be dispatched
// Kafka topic names observed in practice mostly fit in 36 bytes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Topic(SmallString<[u8; 36]>);

impl Topic {
    /// The topic name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the name is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for Topic {
    fn default() -> Self {
        Topic(SmallString::new())
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(self.0.as_str(), f)
    }
}

impl<'a> From<&'a str> for Topic {
    fn from(s: &'a str) -> Topic {
        Topic(s.into())
    }
}

impl From<String> for Topic {
    fn from(s: String) -> Topic {
        Topic(s.as_str().into())
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl serde::Serialize for Topic {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Topic {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Topic::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_lexicographically() {
        let mut topics = vec![Topic::from("orders"), Topic::from("audit"), Topic::from("billing")];
        topics.sort();
        let names: Vec<_> = topics.iter().map(Topic::as_str).collect();
        assert_eq!(names, ["audit", "billing", "orders"]);
    }

    #[test]
    fn long_names_survive() {
        let name = "a".repeat(200);
        assert_eq!(Topic::from(name.clone()).as_str(), name);
    }

    #[test]
    fn blank_detection() {
        assert!(Topic::default().is_blank());
        assert!(Topic::from("  \t").is_blank());
        assert!(!Topic::from(" orders ").is_blank());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Topic::from("orders")).unwrap();
        assert_eq!(json, r#""orders""#);
        let back: Topic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Topic::from("orders"));
    }
}
