//! Ordered string mappings with a JSON-object wire form.
//!
//! `openingHours` and `socialMedia` are JSON objects whose key order matters
//! (days render Monday → Sunday, social links render in authored order).
//! A `BTreeMap` would sort them alphabetically, so they are stored as a list
//! of pairs and (de)serialized as a map.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Insertion-ordered `key → value` list. Keys are unique; re-inserting a key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedList(Vec<(String, String)>);

impl KeyedList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyedList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = KeyedList::new();
        for (k, v) in iter {
            list.insert(k, v);
        }
        list
    }
}

impl Serialize for KeyedList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeyedList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyedListVisitor;

        impl<'de> Visitor<'de> for KeyedListVisitor {
            type Value = KeyedList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of strings to strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<KeyedList, A::Error> {
                let mut list = KeyedList::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    list.insert(key, value);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(KeyedListVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_document_order() {
        let list: KeyedList =
            serde_json::from_str(r#"{"monday": "Closed", "tuesday": "09:00 - 17:00", "friday": "09:00 - 20:00"}"#)
                .unwrap();
        let keys: Vec<&str> = list.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["monday", "tuesday", "friday"]);
    }

    #[test]
    fn serializes_as_object_in_order() {
        let list: KeyedList = [("zeta", "1"), ("alpha", "2")].into_iter().collect();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut list = KeyedList::new();
        list.insert("a", "1");
        list.insert("b", "2");
        list.insert("a", "3");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get("a"), Some("3"));
        assert_eq!(list.iter().next(), Some(("a", "3")));
    }

    #[test]
    fn rejects_non_string_values() {
        let result: Result<KeyedList, _> = serde_json::from_str(r#"{"monday": 9}"#);
        assert!(result.is_err());
    }
}
