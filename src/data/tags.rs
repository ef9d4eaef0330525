use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key/value metadata of a node or way, kept in the order the keys were first seen.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tags {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. A key that is already present keeps its position.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key_at(&self, i: usize) -> Option<&str> {
        self.entries.get(i).map(|(key, _)| key.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl Serialize for Tags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
