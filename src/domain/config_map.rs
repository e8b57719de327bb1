// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque field-name → value mapping used for root and feature option bags.
//!
//! `ConfigMap` is the dynamic configuration shape: an ordered mapping from
//! field names to [`ConfigValue`]s. It is the ready-made option-bag type for
//! factories whose configuration is not statically typed; statically typed
//! configurations implement [`Overlay`](crate::domain::overlay::Overlay)
//! directly on their own structs instead.

use crate::domain::config_value::ConfigValue;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// An ordered mapping of configuration field names to values.
///
/// Backed by a `BTreeMap`, so iteration order is deterministic regardless of
/// insertion order. The empty map is the value an unregistered root resolves
/// to, which is what lets features operate config-free.
///
/// # Examples
///
/// ```
/// use featcfg::domain::config_map::ConfigMap;
///
/// let options = ConfigMap::new()
///     .with("region", "us-east-1")
///     .with("group_id", "default");
///
/// assert_eq!(options.get("region").unwrap().as_str(), "us-east-1");
/// assert_eq!(options.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMap(BTreeMap<String, ConfigValue>);

impl ConfigMap {
    /// Creates a new, empty `ConfigMap`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, returning the map for chaining.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field, replacing any existing value for the same name.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<ConfigValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Retrieves a field value.
    pub fn get(&self, field: &str) -> Option<&ConfigValue> {
        self.0.get(field)
    }

    /// Checks whether a field is present.
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the number of fields in the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether the map has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over (field, value) pairs in sorted field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the names from `required` that are absent from this map.
    ///
    /// Convenience for client instantiators validating a merged
    /// configuration before constructing a client.
    ///
    /// # Examples
    ///
    /// ```
    /// use featcfg::domain::config_map::ConfigMap;
    ///
    /// let merged = ConfigMap::new().with("region", "us-east-1");
    /// let missing = merged.missing_fields(&["region", "url"]);
    /// assert_eq!(missing, vec!["url".to_string()]);
    /// ```
    pub fn missing_fields(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|field| !self.has(field))
            .map(|field| field.to_string())
            .collect()
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        ConfigMap(iter.into_iter().collect())
    }
}

impl IntoIterator for ConfigMap {
    type Item = (String, ConfigValue);
    type IntoIter = btree_map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_map_new_is_empty() {
        let map = ConfigMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_config_map_insert_and_get() {
        let mut map = ConfigMap::new();
        map.insert("region", "us-east-1");

        assert_eq!(map.get("region").unwrap().as_str(), "us-east-1");
        assert!(map.get("url").is_none());
    }

    #[test]
    fn test_config_map_with_chaining() {
        let map = ConfigMap::new().with("a", "1").with("b", "2");
        assert_eq!(map.len(), 2);
        assert!(map.has("a"));
        assert!(map.has("b"));
    }

    #[test]
    fn test_config_map_insert_replaces() {
        let map = ConfigMap::new().with("region", "us-east-1").with("region", "eu-west-1");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("region").unwrap().as_str(), "eu-west-1");
    }

    #[test]
    fn test_config_map_fields_sorted() {
        let map = ConfigMap::new().with("b", "2").with("a", "1").with("c", "3");
        let fields: Vec<&str> = map.fields().collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_config_map_missing_fields() {
        let map = ConfigMap::new().with("region", "us-east-1");
        assert_eq!(
            map.missing_fields(&["region", "url", "group_id"]),
            vec!["url".to_string(), "group_id".to_string()]
        );
        assert!(map.missing_fields(&["region"]).is_empty());
    }

    #[test]
    fn test_config_map_from_iterator() {
        let map: ConfigMap = vec![
            ("region".to_string(), ConfigValue::from("us-east-1")),
            ("url".to_string(), ConfigValue::from("https://queue")),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("url").unwrap().as_str(), "https://queue");
    }

    #[test]
    fn test_config_map_default_equals_new() {
        assert_eq!(ConfigMap::default(), ConfigMap::new());
    }
}
