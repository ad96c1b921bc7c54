//! Formatting settings loaded from the environment
//!
//! Supported environment variables:
//! - `UTILKIT_LOCALE`: locale for month/day names and field order
//!   (falls back to `LC_ALL`, then `LANG`; default `en_US`)
//! - `UTILKIT_TIMEZONE`: `UTC` or a fixed offset such as `+02:00` (default `UTC`)
//!
//! Unusable values are ignored with a warning and the default stays in place.

use chrono::{DateTime, FixedOffset, Locale, Offset, Utc};

use utilkit_domain::UtilError;

use crate::datetime::parse_timezone;

pub const LOCALE_VAR: &str = "UTILKIT_LOCALE";
pub const TIMEZONE_VAR: &str = "UTILKIT_TIMEZONE";

/// Locale fallbacks consulted after [`LOCALE_VAR`], in order
const LOCALE_FALLBACK_VARS: [&str; 2] = ["LC_ALL", "LANG"];

/// Locale and timezone used by the formatting helpers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatSettings {
    pub locale: Locale,
    pub timezone: FixedOffset,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            timezone: Utc.fix(),
        }
    }
}

impl FormatSettings {
    /// Loads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        let locale_source = std::iter::once(LOCALE_VAR)
            .chain(LOCALE_FALLBACK_VARS)
            .find_map(|var| {
                lookup(var)
                    .filter(|val| !val.trim().is_empty())
                    .map(|val| (var, val))
            });

        if let Some((var, val)) = locale_source {
            match parse_locale(&val) {
                Ok(locale) => {
                    settings.locale = locale;
                    tracing::info!(var, val = %val, "Applied locale from environment");
                }
                Err(_) => {
                    tracing::warn!(var, val = %val, "Unrecognised locale in environment, ignoring");
                }
            }
        }

        if let Some(val) = lookup(TIMEZONE_VAR) {
            match parse_timezone(&val) {
                Ok(timezone) => {
                    settings.timezone = timezone;
                    tracing::info!(val = %val, "Applied UTILKIT_TIMEZONE environment variable");
                }
                Err(_) => {
                    tracing::warn!(val = %val, "UTILKIT_TIMEZONE is not a valid timezone, ignoring");
                }
            }
        }

        settings
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    /// Current time in the configured timezone
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone)
    }
}

/// Parses a locale name such as `fr_FR`, `en-US`, `de_DE.UTF-8` or `C`.
///
/// # Errors
///
/// Returns `UtilError::InvalidInput` for unknown locales.
pub fn parse_locale(name: &str) -> Result<Locale, UtilError> {
    let base = name
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('-', "_");

    if base == "C" || base == "POSIX" {
        return Ok(Locale::POSIX);
    }

    Locale::try_from(base.as_str())
        .map_err(|_| UtilError::invalid_input(format!("Unknown locale: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let settings = FormatSettings::from_lookup(lookup_from(&[]));
        assert_eq!(settings, FormatSettings::default());
        assert_eq!(settings.locale, Locale::en_US);
        assert_eq!(settings.timezone.local_minus_utc(), 0);
    }

    #[test]
    fn test_explicit_variables_win() {
        let settings = FormatSettings::from_lookup(lookup_from(&[
            ("UTILKIT_LOCALE", "fr_FR"),
            ("LANG", "de_DE.UTF-8"),
            ("UTILKIT_TIMEZONE", "+01:00"),
        ]));
        assert_eq!(settings.locale, Locale::fr_FR);
        assert_eq!(settings.timezone.local_minus_utc(), 3_600);
    }

    #[test]
    fn test_lang_fallback() {
        let settings = FormatSettings::from_lookup(lookup_from(&[("LANG", "de_DE.UTF-8")]));
        assert_eq!(settings.locale, Locale::de_DE);
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let settings = FormatSettings::from_lookup(lookup_from(&[
            ("UTILKIT_LOCALE", "xx_YY"),
            ("UTILKIT_TIMEZONE", "Moon/Base"),
        ]));
        assert_eq!(settings, FormatSettings::default());
    }

    #[test]
    fn test_parse_locale_variants() {
        assert_eq!(parse_locale("en-US").unwrap(), Locale::en_US);
        assert_eq!(parse_locale("fr_FR@euro").unwrap(), Locale::fr_FR);
        assert_eq!(parse_locale("C.UTF-8").unwrap(), Locale::POSIX);
        assert!(parse_locale("klingon").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_now_uses_configured_offset() {
        let settings = FormatSettings::default().with_timezone(parse_timezone("-05:00").unwrap());
        assert_eq!(settings.now().offset().local_minus_utc(), -18_000);
    }
}
