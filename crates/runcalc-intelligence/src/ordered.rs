// ABOUTME: Name-keyed collection that keeps entries in insertion order
// ABOUTME: Serializes as a JSON object whose keys follow the order entries were added
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

use std::mem;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Named entries in insertion order
///
/// Zone reports list groups and zone types in the order they are defined,
/// which a sorted map would lose. Lookups are linear; these collections hold
/// a handful of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedEntries<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedEntries<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedEntries<V> {
    /// Empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == name)
    }

    /// Value stored under `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Whether `name` is present
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Store `value` under `name`
    ///
    /// A replaced entry keeps its original position. Returns the old value.
    pub fn insert(&mut self, name: String, value: V) -> Option<V> {
        match self.position(&name) {
            Some(index) => Some(mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Value under `name`, appending `default()` first if absent
    pub fn get_or_insert_with(&mut self, name: String, default: impl FnOnce() -> V) -> &mut V {
        let index = self.position(&name).unwrap_or_else(|| {
            self.entries.push((name, default()));
            self.entries.len() - 1
        });
        &mut self.entries[index].1
    }

    /// Names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(name, value)` pairs in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> FromIterator<(String, V)> for OrderedEntries<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut collected = Self::new();
        for (name, value) in iter {
            collected.insert(name, value);
        }
        collected
    }
}

impl<V: Serialize> Serialize for OrderedEntries<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_insertion_order() {
        let entries: OrderedEntries<u8> = [("zeta", 1), ("alpha", 2), ("mid", 3)]
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect();

        assert_eq!(entries.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&entries).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":3}"#
        );
    }

    #[test]
    fn test_replacing_keeps_position() {
        let mut entries = OrderedEntries::new();
        entries.insert("b".to_owned(), 1);
        entries.insert("a".to_owned(), 2);

        assert_eq!(entries.insert("b".to_owned(), 10), Some(1));
        assert_eq!(entries.keys().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(entries.get("b"), Some(&10));

        *entries.get_or_insert_with("c".to_owned(), || 0) += 5;
        *entries.get_or_insert_with("a".to_owned(), || 0) += 5;
        assert_eq!(entries.entries().collect::<Vec<_>>(), [("b", &10), ("a", &7), ("c", &5)]);
        assert_eq!(entries.len(), 3);
        assert!(!entries.contains_key("d"));
    }
}
