use serde::{Deserialize, Serialize};

/// A single system property, as passed with `-Dkey=value` or read from a `.properties` file.
///
/// Keys are non-empty after trimming; values may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name.
    key: String,
    /// Raw property value.
    value: String,
}

impl Property {
    /// Create a new property.
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

    /// Get the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Split a `key=value` (or `key:value`) assignment on its first separator.
    ///
    /// Both sides are trimmed. Input without a separator yields the whole
    /// input as key and an empty value. Returns `None` when the key is empty.
    pub fn parse_assignment(s: &str) -> Option<Self> {
        let (key, value) = match s.find(['=', ':']) {
            Some(idx) => (&s[..idx], &s[idx + 1..]),
            None => (s, ""),
        };
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self::from((key, value.trim())))
    }
}

impl From<(&str, &str)> for Property {
    fn from((key, value): (&str, &str)) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
