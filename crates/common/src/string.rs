//! String inspection and conversion utilities.

use utilkit_domain::{UtilError, Value};

/// Whether `haystack` contains `needle`.
///
/// An empty needle is contained in every string.
///
/// # Examples
///
/// ```
/// use utilkit_common::string::contains_single;
///
/// assert!(contains_single("größe", "Kleidergröße"));
/// assert!(!contains_single("GRÖSSE", "Kleidergröße"));
/// ```
pub fn contains_single(needle: &str, haystack: &str) -> bool {
    haystack.contains(needle)
}

/// Whether `haystack` contains some or all of `needles`.
///
/// Without `require_all`, the scan stops at the first needle found. With it,
/// the scan stops at the first needle missing; an empty needle list never
/// matches either way.
pub fn contains_multiple<I, S>(needles: I, haystack: &str, require_all: bool) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut match_found = false;

    for needle in needles {
        if haystack.contains(needle.as_ref()) {
            match_found = true;
            if !require_all {
                break;
            }
        } else if require_all {
            return false;
        }
    }

    match_found
}

/// Renders a float with at least one fractional digit and without excess zeros.
///
/// # Examples
///
/// ```
/// use utilkit_common::string::float_to_string;
///
/// assert_eq!(float_to_string(1.0), "1.0");
/// assert_eq!(float_to_string(2.50), "2.5");
/// assert_eq!(float_to_string(-0.25), "-0.25");
/// ```
pub fn float_to_string(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = value.to_string();
    if rendered.contains('.') {
        rendered
    } else {
        format!("{}.0", rendered)
    }
}

/// Maps `"true"`/`"false"` in any letter case to a boolean.
pub fn bool_equivalent(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Converts `"true"`/`"false"` (any letter case) to a boolean value and returns
/// every other string unchanged as a string value.
pub fn convert_bool_equivalent(s: &str) -> Value {
    match bool_equivalent(s) {
        Some(b) => Value::Bool(b),
        None => Value::String(s.to_string()),
    }
}

/// Converts a numeric string to an integer, or to a float if it has a period.
///
/// Surrounding whitespace is ignored. Exponent notation without a period
/// (`"1e3"`) yields an integer when the result is whole.
///
/// # Errors
///
/// Returns `UtilError::InvalidInput` if the string is not numeric.
pub fn convert_string_to_number(s: &str) -> Result<Value, UtilError> {
    let trimmed = s.trim();
    let not_numeric = || UtilError::invalid_input(format!("\"{}\" is not a numeric string", s));

    if trimmed.contains('.') {
        return trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
            .ok_or_else(not_numeric);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(Value::Int(i));
    }

    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Ok(Value::Int(f as i64))
        }
        Ok(f) if f.is_finite() => Ok(Value::Float(f)),
        _ => Err(not_numeric()),
    }
}
