//! Synthetic field key constructible from runtime strings.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A field key carrying a string identity and, optionally, an integer one.
///
/// Keys compare and hash by their string identity only; the integer identity
/// is carried for containers that need it but is never synthesized from the
/// string form. A key built from a string therefore has no integer identity.
#[derive(Debug, Clone)]
pub struct RawKey {
    string: String,
    int: Option<i64>,
}

impl RawKey {
    /// Key with a string identity only.
    pub fn new(string: impl Into<String>) -> Self {
        RawKey {
            string: string.into(),
            int: None,
        }
    }

    /// Key with both identities; the string identity renders the integer.
    pub fn from_index(index: i64) -> Self {
        RawKey {
            string: index.to_string(),
            int: Some(index),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.string
    }

    pub fn into_string(self) -> String {
        self.string
    }

    pub fn int(&self) -> Option<i64> {
        self.int
    }
}

impl PartialEq for RawKey {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Eq for RawKey {}

impl Hash for RawKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string.hash(state);
    }
}

impl fmt::Display for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

impl From<&str> for RawKey {
    fn from(string: &str) -> Self {
        RawKey::new(string)
    }
}

impl From<String> for RawKey {
    fn from(string: String) -> Self {
        RawKey::new(string)
    }
}

impl From<i64> for RawKey {
    fn from(index: i64) -> Self {
        RawKey::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_key_has_no_integer_identity() {
        let key = RawKey::new("name");
        assert_eq!(key.as_str(), "name");
        assert_eq!(key.int(), None);
    }

    #[test]
    fn integer_key_renders_its_string_identity() {
        let key = RawKey::from_index(7);
        assert_eq!(key.as_str(), "7");
        assert_eq!(key.int(), Some(7));
    }

    #[test]
    fn equality_is_by_string_identity_only() {
        assert_eq!(RawKey::from_index(7), RawKey::new("7"));
        assert_ne!(RawKey::new("7"), RawKey::new("seven"));
    }
}
