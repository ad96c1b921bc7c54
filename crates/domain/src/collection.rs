//! Insertion-ordered collection of key/value entries

use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::value::{Key, Value};

/// An ordered mapping from [`Key`] to [`Value`].
///
/// Entries iterate in insertion order. Besides the entries, the collection keeps
/// an append cursor: [`Collection::push`] stores a value under the integer key
/// one past the largest integer key ever inserted (0 if there was none). The
/// cursor never moves backwards, so removing the last entry and pushing again
/// does not reuse its key. Once `i64::MAX` has been used as a key the cursor
/// is exhausted and further pushes are refused.
///
/// Equality compares entries pairwise in order; the cursor is not part of it.
#[derive(Debug, Clone)]
pub struct Collection {
    entries: IndexMap<Key, Value>,
    /// `None` once `i64::MAX` is taken
    next_index: Option<i64>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            next_index: Some(0),
        }
    }
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list keyed `0..n`
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut collection = Self::new();
        for value in values {
            // A fresh cursor cannot run out before memory does
            let _ = collection.push(value);
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or replaces the entry for `key`, returning the previous value.
    ///
    /// A replaced entry keeps its position; a new entry goes to the end.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if let (Key::Int(i), Some(next)) = (&key, self.next_index) {
            if *i >= next {
                self.next_index = i.checked_add(1);
            }
        }
        self.entries.insert(key, value.into())
    }

    /// Appends `value` under the next free integer key and returns that key.
    ///
    /// Returns `None` without storing anything when the cursor is exhausted,
    /// so an existing entry is never overwritten.
    #[must_use = "a refused push leaves the collection unchanged"]
    pub fn push(&mut self, value: impl Into<Value>) -> Option<Key> {
        let Some(next) = self.next_index else {
            tracing::debug!(len = self.entries.len(), "Refused push, integer keys exhausted");
            return None;
        };
        let key = Key::Int(next);
        self.insert(key.clone(), value);
        Some(key)
    }

    /// Removes the entry for `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Key of the first entry strictly equal to `value`
    pub fn key_of(&self, value: &Value) -> Option<&Key> {
        self.entries.iter().find(|(_, v)| *v == value).map(|(k, _)| k)
    }

    /// Whether any entry is strictly equal to `value`
    pub fn contains_value(&self, value: &Value) -> bool {
        self.key_of(value).is_some()
    }

    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.entries.first()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// The key the next [`Collection::push`] will use, `None` once exhausted
    pub fn next_index(&self) -> Option<i64> {
        self.next_index
    }

    /// Whether the keys are exactly `0, 1, .., len - 1` in order
    fn is_list(&self) -> bool {
        self.entries
            .keys()
            .zip(0_i64..)
            .all(|(key, i)| *key == Key::Int(i))
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Collection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (key, value) in iter {
            collection.insert(key, value);
        }
        collection
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Serde: lists as sequences, everything else as a map
// ============================================================================

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
            for value in self.entries.values() {
                seq.serialize_element(value)?;
            }
            return seq.end();
        }

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CollectionVisitor)
    }
}

struct CollectionVisitor;

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = Collection;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map or a sequence")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut collection = Collection::new();
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            collection.insert(key.normalize_map_key(), value);
        }
        Ok(collection)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut collection = Collection::new();
        while let Some(value) = access.next_element::<Value>()? {
            let _ = collection.push(value);
        }
        Ok(collection)
    }
}
