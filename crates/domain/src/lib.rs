//! Utilkit Domain - value model, collection helpers and named-item bags
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Strict equality** - values compare by kind and content, never by coercion
//! - **Absence is not an error** - missing entries surface as `bool` or `Option`,
//!   malformed input as [`UtilError`]
//!
//! Nothing here is synchronised; a [`Collection`] or [`ParameterBag`] shared
//! between threads needs the caller's own locking.

pub mod array;
pub mod bag;
pub mod collection;
pub mod enum_values;
pub mod error;
pub mod value;

pub use array::{
    add_value, flatten, has_keys, is_associative, is_indexed, is_multi_dimensional,
    next_available_index, remove_value, KeyPresence,
};
pub use bag::{GenericBag, ParameterBag};
pub use collection::Collection;
pub use enum_values::EnumValues;
pub use error::{ArgumentTypeError, UtilError};
pub use value::{Key, Value};
