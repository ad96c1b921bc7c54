//! Common helper functions built on top of `utilkit-domain`.
//!
//! This crate holds the string, clock, locale-aware date and URL helpers.
//! The value model and collection predicates live in the domain crate.
//!
//! # Design Principles
//!
//! - **Mostly pure functions** - the clock and environment are the only inputs
//!   read implicitly, and both have explicit-argument variants
//! - **Fixed offsets only** - timezones are `UTC` or `+HH:MM` style offsets
//! - **Errors as values** - invalid input returns `UtilError`, never panics

pub mod datetime;
pub mod intl_date;
pub mod settings;
pub mod string;
pub mod url;

// Re-export commonly used functions at crate root for convenience
pub use datetime::{
    current_time, current_time_string, current_time_utc, current_time_w3c, format_datetime,
    parse_timezone, W3C_FORMAT,
};
pub use intl_date::{DateFormatter, FormatLevel};
pub use settings::{parse_locale, FormatSettings};
pub use string::{
    bool_equivalent, contains_multiple, contains_single, convert_bool_equivalent,
    convert_string_to_number, float_to_string,
};
pub use url::{append_url_query_params, build_query, format_for_display, QueryEncoding, QueryOptions};
