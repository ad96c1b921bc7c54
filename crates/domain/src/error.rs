//! Unified error types for the utility layer
//!
//! Two kinds of failure are reported as values:
//! - [`UtilError::InvalidInput`] for malformed arguments (a non-indexed collection
//!   handed to the index finder, an unknown format level, a bad timezone, ...)
//! - [`ArgumentTypeError`] for a value of the wrong type, with a message naming
//!   both the actual and the expected types
//!
//! Absence (a missing bag entry, a missing key) is never an error; callers get a
//! `bool` or an `Option` instead.

use thiserror::Error;

use crate::value::Value;

/// Unified error type for utility operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UtilError {
    /// The caller passed a malformed argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value did not have any of the expected types
    #[error(transparent)]
    ArgumentType(#[from] ArgumentTypeError),
}

impl UtilError {
    /// Creates an invalid input error.
    ///
    /// # Example
    /// ```
    /// use utilkit_domain::UtilError;
    ///
    /// let err = UtilError::invalid_input("start index must not be negative");
    /// assert_eq!(err.to_string(), "Invalid input: start index must not be negative");
    /// ```
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error reports a malformed argument.
    ///
    /// Type mismatches are a special case of invalid input, so both variants qualify.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::ArgumentType(_))
    }
}

/// An invalid argument error with a type-based message.
///
/// ```
/// use utilkit_domain::{ArgumentTypeError, Value};
///
/// let err = ArgumentTypeError::new(&Value::from("abc"), ["int", "float"]);
/// assert_eq!(
///     err.to_string(),
///     r#"Expected an argument of type "int" or "float" but got a(n) "string" instead."#
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "Expected an argument of type {} but got a(n) \"{actual}\" instead.",
    quote_list(.expected)
)]
pub struct ArgumentTypeError {
    actual: String,
    expected: Vec<String>,
}

impl ArgumentTypeError {
    /// Builds the error from the offending value and the accepted type names.
    ///
    /// # Panics
    ///
    /// Panics if `required` is empty or contains an empty type name. Both are
    /// programming errors at the call site, not recoverable conditions.
    #[track_caller]
    pub fn new<I, S>(value: &Value, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected: Vec<String> = required.into_iter().map(Into::into).collect();

        assert!(
            !expected.is_empty(),
            "ArgumentTypeError requires at least one expected type"
        );
        assert!(
            expected.iter().all(|name| !name.is_empty()),
            "ArgumentTypeError expected type names must not be empty"
        );

        Self {
            actual: value.type_name().to_string(),
            expected,
        }
    }

    /// Debug type name of the rejected value
    pub fn actual_type(&self) -> &str {
        &self.actual
    }

    /// Type names that would have been accepted
    pub fn expected_types(&self) -> &[String] {
        &self.expected
    }
}

/// `"a"`, `"a" or "b"`, `"a", "b" or "c"`
fn quote_list(types: &[String]) -> String {
    let quoted: Vec<String> = types.iter().map(|t| format!("\"{}\"", t)).collect();

    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}
