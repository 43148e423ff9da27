//! Accumulated form data
//!
//! Dotted field names (`contact.first_name`) mapped to string values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RegisterError;

/// Everything the user has entered across all visited steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted JSON object
    ///
    /// The top level must be an object. String values are taken as-is,
    /// numbers and booleans are stringified, nulls and nested values are
    /// dropped.
    pub fn parse(json: &str) -> Result<Self, RegisterError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(object) = value else {
            return Err(RegisterError::Json(
                "registration data is not a JSON object".into(),
            ));
        };

        let entries = object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Bool(b) => Some((key, b.to_string())),
                Value::Number(n) => Some((key, n.to_string())),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            })
            .collect();

        Ok(Self(entries))
    }

    /// Serialize to the persisted JSON object
    pub fn to_json(&self) -> Result<String, RegisterError> {
        Ok(serde_json::to_string(&self.0)?)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a single key, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Copy of this snapshot with one key set
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.insert(key, value);
        next
    }

    /// Overlay `other` on top of this data; keys in `other` win
    pub fn merge(&mut self, other: &FormData) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Merged copy, `other` wins on conflicts
    pub fn merged(&self, other: &FormData) -> Self {
        let mut next = self.clone();
        next.merge(other);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_per_key() {
        let mut data = FormData::new();
        data.insert("contact.first_name", "Ada");
        data.insert("contact.last_name", "Lovelace");
        data.insert("contact.first_name", "Grace");

        assert_eq!(data.get("contact.first_name"), Some("Grace"));
        assert_eq!(data.get("contact.last_name"), Some("Lovelace"));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_merge_overlays_keys() {
        let base: FormData = [("a", "1"), ("b", "2")].into_iter().collect();
        let partial: FormData = [("a", "9"), ("c", "3")].into_iter().collect();

        let merged = base.merged(&partial);
        assert_eq!(merged.get("a"), Some("9"));
        assert_eq!(merged.get("b"), Some("2"));
        assert_eq!(merged.get("c"), Some("3"));
        // original untouched
        assert_eq!(base.get("a"), Some("1"));
    }

    #[test]
    fn test_parse_persisted_object() {
        let data = FormData::parse(
            r#"{"contact.first_name":"Ada","contact.accepts_marketing":"on","n":3,"b":true,"x":null,"y":[1]}"#,
        )
        .unwrap();

        assert_eq!(data.get("contact.first_name"), Some("Ada"));
        assert_eq!(data.get("n"), Some("3"));
        assert_eq!(data.get("b"), Some("true"));
        assert_eq!(data.get("x"), None);
        assert_eq!(data.get("y"), None);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(FormData::parse("not json").is_err());
        assert!(FormData::parse("[1, 2]").is_err());
        assert!(FormData::parse("\"text\"").is_err());
    }

    #[test]
    fn test_json_layout_is_flat_object() {
        let data: FormData = [("contact.email", "ada@example.com")].into_iter().collect();
        assert_eq!(
            data.to_json().unwrap(),
            r#"{"contact.email":"ada@example.com"}"#
        );
    }
}
