//! Insertion-ordered bag backed by an `IndexMap`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::GenericBag;
use crate::value::Value;

/// A bag of named items that iterates in insertion order.
///
/// ```
/// use utilkit_domain::bag::{GenericBag, ParameterBag};
///
/// let mut bag = ParameterBag::new();
/// assert!(bag.add("page", 2));
/// assert!(!bag.add("page", 3));
/// assert_eq!(bag.get("page"), Some(&2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag<T = Value> {
    items: IndexMap<String, T>,
}

impl<T> ParameterBag<T> {
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Creates a pre-populated bag.
    ///
    /// Follows [`GenericBag::add`]: when a name repeats, the first item wins.
    pub fn from_items<I, N>(items: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
    {
        let mut bag = Self::new();
        for (name, item) in items {
            bag.add(name, item);
        }
        bag
    }
}

impl<T> Default for ParameterBag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GenericBag for ParameterBag<T> {
    type Item = T;
    type Iter<'a>
        = Iter<'a, T>
    where
        Self: 'a;

    fn add(&mut self, name: impl Into<String>, item: T) -> bool {
        let name = name.into();
        if self.items.contains_key(&name) {
            tracing::trace!(name = %name, "Bag already holds an item with this name, add refused");
            return false;
        }
        self.items.insert(name, item);
        true
    }

    fn remove(&mut self, name: &str) -> bool {
        self.items.shift_remove(name).is_some()
    }

    fn has(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.items.get(name)
    }

    fn all(&self) -> Vec<(String, T)>
    where
        T: Clone,
    {
        self.items
            .iter()
            .map(|(name, item)| (name.clone(), item.clone()))
            .collect()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.items.iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ParameterBag<T> {
    type Item = (&'a str, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`ParameterBag`]
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: indexmap::map::Iter<'a, String, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a str, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, item)| (name.as_str(), item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bag_is_empty() {
        let bag: ParameterBag = ParameterBag::new();
        assert!(bag.is_empty());
        assert_eq!(bag.len(), 0);
        assert_eq!(bag.iter().next(), None);
    }

    #[test]
    fn test_add_rejects_duplicate_name() {
        let mut bag = ParameterBag::new();
        assert!(bag.add("x", 1));
        assert!(!bag.add("x", 2));
        assert_eq!(bag.get("x"), Some(&1));
        assert_eq!(bag.len(), 1);
        assert!(!bag.is_empty());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut bag = ParameterBag::new();
        bag.add("a", 1);
        bag.add("b", 2);
        bag.add("c", 3);
        assert!(bag.remove("a"));
        assert!(!bag.remove("a"));
        assert_eq!(bag.all(), vec![("b".to_string(), 2), ("c".to_string(), 3)]);
    }

    #[test]
    fn test_get_missing_is_none() {
        let bag: ParameterBag<i32> = ParameterBag::new();
        assert_eq!(bag.get("missing"), None);
        assert!(!bag.has("missing"));
    }

    #[test]
    fn test_all_is_a_snapshot() {
        let mut bag = ParameterBag::new();
        bag.add("a", "one".to_string());
        let snapshot = bag.all();
        bag.add("b", "two".to_string());
        bag.remove("a");
        assert_eq!(snapshot, vec![("a".to_string(), "one".to_string())]);
    }

    #[test]
    fn test_iteration_restarts() {
        let bag = ParameterBag::from_items([("a", 1), ("b", 2)]);
        let first: Vec<_> = bag.iter().collect();
        let second: Vec<_> = (&bag).into_iter().collect();
        assert_eq!(first, vec![("a", &1), ("b", &2)]);
        assert_eq!(first, second);
        assert_eq!(bag.iter().len(), 2);
    }

    #[test]
    fn test_from_items_first_wins() {
        let bag = ParameterBag::from_items([("a", 1), ("a", 2), ("b", 3)]);
        assert_eq!(bag.get("a"), Some(&1));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn test_readd_after_remove_goes_to_end() {
        let mut bag = ParameterBag::from_items([("a", 1), ("b", 2)]);
        bag.remove("a");
        bag.add("a", 3);
        let names: Vec<&str> = bag.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let bag = ParameterBag::from_items([("z", Value::from(1)), ("a", Value::from("x"))]);
        assert_eq!(serde_json::to_string(&bag).unwrap(), r#"{"z":1,"a":"x"}"#);
    }
}
