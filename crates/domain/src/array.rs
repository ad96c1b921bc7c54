//! Collection inspection and manipulation helpers.
//!
//! Pure functions over [`Collection`]:
//! - shape predicates ([`is_indexed`], [`is_associative`], [`is_multi_dimensional`])
//! - membership operators ([`add_value`], [`remove_value`]) and [`flatten`]
//! - key presence matching ([`has_keys`] with a [`KeyPresence`] policy)
//! - [`next_available_index`] for integer-keyed collections

use crate::collection::Collection;
use crate::error::UtilError;
use crate::value::{Key, Value};

// ============================================================================
// Shape predicates
// ============================================================================

/// Whether every key is an integer key. Empty collections qualify.
///
/// Unlike a "list" check, the keys need not start at 0 or be consecutive.
pub fn is_indexed(collection: &Collection) -> bool {
    collection.keys().all(Key::is_int)
}

/// Whether every key is a string key. Empty collections qualify.
pub fn is_associative(collection: &Collection) -> bool {
    collection.keys().all(Key::is_str)
}

/// Whether every value is itself a collection. Empty collections qualify.
pub fn is_multi_dimensional(collection: &Collection) -> bool {
    collection.values().all(Value::is_array)
}

// ============================================================================
// Membership
// ============================================================================

/// Appends `value` unless a strictly equal value is already present.
///
/// Returns whether the value was added. Nothing is added once the collection's
/// integer keys are exhausted (an `i64::MAX` key is present).
pub fn add_value(collection: &mut Collection, value: impl Into<Value>) -> bool {
    let value = value.into();
    if collection.contains_value(&value) {
        return false;
    }
    collection.push(value).is_some()
}

/// Removes the first entry strictly equal to `value`.
///
/// Returns whether the collection contained the value. Remaining entries keep
/// their keys and relative order.
pub fn remove_value(collection: &mut Collection, value: &Value) -> bool {
    match collection.key_of(value).cloned() {
        Some(key) => {
            collection.remove(&key);
            true
        }
        None => false,
    }
}

/// Reduces a single-entry collection to its only value.
///
/// With `recursive`, a single value that is itself a collection is flattened
/// again. Collections with zero or several entries come back unchanged.
pub fn flatten(collection: Collection, recursive: bool) -> Value {
    if collection.len() != 1 {
        return Value::Array(collection);
    }

    match collection.into_iter().next() {
        Some((_, Value::Array(inner))) if recursive => flatten(inner, true),
        Some((_, value)) => value,
        None => Value::Array(Collection::new()),
    }
}

// ============================================================================
// Key presence
// ============================================================================

/// Policy flags for [`has_keys`].
///
/// The default requires all keys, allows extra keys and accepts empty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPresence {
    /// Every requested key must be present (otherwise at least one)
    pub require_all: bool,
    /// The collection must not contain keys outside the requested ones
    pub require_only: bool,
    /// Matched keys must hold non-empty values; `false` still counts as set
    pub must_not_be_empty: bool,
}

impl Default for KeyPresence {
    fn default() -> Self {
        Self {
            require_all: true,
            require_only: false,
            must_not_be_empty: false,
        }
    }
}

impl KeyPresence {
    /// At least one requested key must be present
    pub fn any() -> Self {
        Self {
            require_all: false,
            ..Self::default()
        }
    }

    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    pub fn require_only(mut self, require_only: bool) -> Self {
        self.require_only = require_only;
        self
    }

    pub fn must_not_be_empty(mut self, must_not_be_empty: bool) -> Self {
        self.must_not_be_empty = must_not_be_empty;
        self
    }
}

/// Checks which of `keys` are present in `collection` under `policy`.
///
/// Each key of the collection consumes at most one matching entry of `keys`, so
/// a key listed twice must appear twice to satisfy `require_all`, which it never
/// can. With an empty `keys` list and `require_all`, the result is `true`
/// unless `require_only` rejects a key of the collection.
///
/// ```
/// use serde_json::json;
/// use utilkit_domain::array::{has_keys, KeyPresence};
/// use utilkit_domain::{Collection, Value};
///
/// let c = Collection::try_from(Value::from(json!({"a": 1, "b": 2}))).unwrap();
/// assert!(has_keys(&c, ["a", "b"], KeyPresence::default()));
/// assert!(!has_keys(&c, ["a", "b", "c"], KeyPresence::default()));
/// assert!(has_keys(&c, ["a", "c"], KeyPresence::any()));
/// ```
pub fn has_keys<I, K>(collection: &Collection, keys: I, policy: KeyPresence) -> bool
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    let mut remaining: Vec<Key> = keys.into_iter().map(Into::into).collect();
    let mut match_found = false;

    for (key, value) in collection {
        if let Some(pos) = remaining.iter().position(|k| k == key) {
            remaining.remove(pos);
            match_found = true;

            if policy.must_not_be_empty
                && value.is_empty_value()
                && *value != Value::Bool(false)
            {
                return false;
            }
        } else if policy.require_only {
            return false;
        }
    }

    if policy.require_all {
        remaining.is_empty()
    } else {
        match_found
    }
}

// ============================================================================
// Index allocation
// ============================================================================

/// Smallest integer key `>= start` not used by `collection`.
///
/// # Errors
///
/// Returns `UtilError::InvalidInput` if the collection has a string key.
pub fn next_available_index(collection: &Collection, start: i64) -> Result<i64, UtilError> {
    if !is_indexed(collection) {
        tracing::debug!(
            len = collection.len(),
            "Rejected next index lookup on a collection with string keys"
        );
        return Err(UtilError::invalid_input(
            "next_available_index requires an indexed collection",
        ));
    }

    let mut index = start;
    while collection.contains_key(&Key::Int(index)) {
        index = index
            .checked_add(1)
            .ok_or_else(|| UtilError::invalid_input("no free index left after start"))?;
    }

    Ok(index)
}
