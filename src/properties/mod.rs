//! Order-preserving property store
//!
//! Property files are compared position by position, so the store keeps the
//! order in which keys were first declared alongside the key/value map.
//!
//! Keys are identified by their trimmed name. The text each key was declared
//! with is kept as well, so stray whitespace around a name stays visible to
//! the hygiene check without making `a` and `a ` two different keys.

pub mod reader;

pub use reader::{parse_entries, PropertyEntry};

use crate::error::{AppError, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Property map that remembers first-insertion order of its keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedProperties {
    keys: Vec<String>,
    values: HashMap<String, String>,
    declared: HashMap<String, String>,
}

/// Key name as compared across files: every char up to U+0020 is trimmed
pub fn key_name(raw: &str) -> &str {
    raw.trim_matches(|c: char| c <= ' ')
}

impl OrderedProperties {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse everything from `source`
    pub fn load<R: Read>(mut source: R) -> Result<Self> {
        let mut bytes = Vec::new();
        source
            .read_to_end(&mut bytes)
            .map_err(|e| AppError::parse(format!("Failed to read properties: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Open, parse and close the file at `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| AppError::parse(format!("Failed to open {}: {}", path.display(), e)))?;
        Self::load(file).map_err(|e| match e {
            AppError::Parse(msg) => AppError::parse(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse raw bytes, falling back to ISO-8859-1 when they are not UTF-8
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect::<String>()),
        };
        Self::parse_str(&text)
    }

    /// Parse property text
    pub fn parse_str(text: &str) -> Result<Self> {
        let mut properties = Self::new();
        for entry in parse_entries(text)? {
            properties.insert(entry.key, entry.value);
        }
        Ok(properties)
    }

    /// Insert or overwrite a property; an existing key keeps its position
    ///
    /// `key` is stored under its trimmed name. A padded declaration is
    /// remembered even when a later one of the same key is clean.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        let raw = key.into();
        let key = key_name(&raw).to_string();
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        if raw != key || !self.declared.contains_key(&key) {
            self.declared.insert(key.clone(), raw);
        }
        self.values.insert(key, value.into())
    }

    /// Key text as declared, surrounding whitespace included
    ///
    /// When a key is declared more than once, the last padded declaration
    /// wins over clean ones.
    pub fn declared_key(&self, key: &str) -> Option<&str> {
        self.declared.get(key).map(String::as_str)
    }

    /// Value for `key`, if declared
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Distinct keys in first-seen order
    pub fn ordered_keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key/value pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.keys.iter().map(move |key| {
            let value = self.values.get(key).map(String::as_str).unwrap_or_default();
            (key.as_str(), value)
        })
    }
}

impl FromStr for OrderedProperties {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OrderedProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_keys_keep_declaration_order() {
        let props = OrderedProperties::parse_str("zeta=1\nalpha=2\nmid=3\n").unwrap();
        assert_eq!(props.ordered_keys(), &["zeta", "alpha", "mid"]);
        assert_eq!(props.len(), 3);
    }

    #[test]
    fn test_duplicate_overwrites_without_moving() {
        let props = OrderedProperties::parse_str("a=1\nb=2\na=3\n").unwrap();
        assert_eq!(props.ordered_keys(), &["a", "b"]);
        assert_eq!(props.get("a"), Some("3"));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_keys_identified_by_trimmed_name() {
        let props = OrderedProperties::parse_str("a =1\nb=2\n").unwrap();
        assert_eq!(props.ordered_keys(), &["a", "b"]);
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.declared_key("a"), Some("a "));
        assert_eq!(props.declared_key("b"), Some("b"));
        assert_eq!(props.declared_key("c"), None);
    }

    #[test]
    fn test_padded_declaration_survives_redeclaration() {
        let props = OrderedProperties::parse_str("a =1\na=2\n").unwrap();
        assert_eq!(props.declared_key("a"), Some("a "));
        assert_eq!(props.get("a"), Some("2"));

        let props = OrderedProperties::parse_str("a=1\na =2\n").unwrap();
        assert_eq!(props.declared_key("a"), Some("a "));

        let props = OrderedProperties::parse_str("a=1\na=2\n").unwrap();
        assert_eq!(props.declared_key("a"), Some("a"));
    }

    #[test]
    fn test_get_missing_key() {
        let props = OrderedProperties::parse_str("a=1").unwrap();
        assert_eq!(props.get("b"), None);
        assert!(!props.contains_key("b"));
        assert!(props.contains_key("a"));
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut props = OrderedProperties::new();
        assert!(props.is_empty());
        assert_eq!(props.insert("k", "v1"), None);
        assert_eq!(props.insert("k", "v2"), Some("v1".to_string()));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_iter_in_order() {
        let props: OrderedProperties = vec![("b", "2"), ("a", "1")].into_iter().collect();
        let collected: Vec<_> = props.iter().collect();
        assert_eq!(collected, vec![("b", "2"), ("a", "1")]);
    }

    #[test]
    fn test_from_str() {
        let props: OrderedProperties = "x=1\ny=2".parse().unwrap();
        assert_eq!(props.ordered_keys(), &["x", "y"]);
    }

    #[test]
    fn test_latin1_fallback() {
        // 0xE9 is 'é' in ISO-8859-1 and invalid as a lone UTF-8 byte
        let props = OrderedProperties::from_bytes(b"name=caf\xe9").unwrap();
        assert_eq!(props.get("name"), Some("café"));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a=1\nb=2\n").unwrap();

        let props = OrderedProperties::from_path(file.path()).unwrap();
        assert_eq!(props.ordered_keys(), &["a", "b"]);
    }

    #[test]
    fn test_from_missing_path_is_parse_error() {
        let err = OrderedProperties::from_path(Path::new("/definitely/not/here.properties")).unwrap_err();
        assert_eq!(err.category(), "PARSE");
    }

    #[test]
    fn test_malformed_file_names_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a=\\uXYZ1\n").unwrap();

        let err = OrderedProperties::from_path(file.path()).unwrap_err();
        assert_eq!(err.category(), "PARSE");
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
