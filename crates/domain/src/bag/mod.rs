//! Named-item bags
//!
//! A bag stores items under unique string names and remembers the order in
//! which they were added. [`GenericBag`] is the contract; [`ParameterBag`] is
//! the insertion-ordered implementation.

mod parameter_bag;

pub use parameter_bag::{Iter, ParameterBag};

/// Contract for named-item containers.
///
/// Names are unique: adding a name that is already present is refused rather
/// than overwriting. Lookups of missing names return `false` or `None`, never
/// an error.
///
/// Iteration borrows the bag, so the compiler rejects any attempt to add or
/// remove entries while an iterator is alive. Every call to
/// [`GenericBag::iter`] starts again from the first entry.
pub trait GenericBag {
    /// Type of the stored items
    type Item;

    /// Iterator over `(name, item)` pairs in insertion order
    type Iter<'a>: Iterator<Item = (&'a str, &'a Self::Item)>
    where
        Self: 'a;

    /// Adds an item under `name`.
    ///
    /// Returns `false`, leaving the bag untouched, if `name` is already in use.
    fn add(&mut self, name: impl Into<String>, item: Self::Item) -> bool;

    /// Removes the item stored under `name`.
    ///
    /// Returns `false` if there was no such item.
    fn remove(&mut self, name: &str) -> bool;

    /// Whether an item is stored under `name`
    fn has(&self, name: &str) -> bool;

    /// The item stored under `name`, if any
    fn get(&self, name: &str) -> Option<&Self::Item>;

    /// Snapshot of all entries in insertion order.
    ///
    /// Later changes to the bag do not affect the returned vector.
    fn all(&self) -> Vec<(String, Self::Item)>
    where
        Self::Item: Clone;

    /// Number of stored items
    fn len(&self) -> usize;

    /// Whether the bag holds no items
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries in insertion order
    fn iter(&self) -> Self::Iter<'_>;
}
