//! Locale-aware date and time formatting.
//!
//! Month and weekday names come from chrono's locale tables. The order of the
//! date fields is taken from the locale's numeric date format, and the time
//! follows the locale's 12/24-hour convention.

use chrono::{DateTime, Locale, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Write};
use std::str::FromStr;

use utilkit_domain::{EnumValues, UtilError};

use crate::settings::{parse_locale, FormatSettings};

/// Verbosity of a formatted date or time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatLevel {
    /// `Monday, January 15, 2024` / `10:30:00 AM UTC`
    Full,
    /// `January 15, 2024` / `10:30:00 AM UTC`
    Long,
    /// `Jan 15, 2024` / `10:30:00 AM`
    Medium,
    /// Locale's numeric date / `10:30 AM`
    Short,
}

impl FormatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatLevel::Full => "full",
            FormatLevel::Long => "long",
            FormatLevel::Medium => "medium",
            FormatLevel::Short => "short",
        }
    }
}

impl EnumValues for FormatLevel {
    type Value = &'static str;

    fn cases() -> &'static [Self] {
        &[
            FormatLevel::Full,
            FormatLevel::Long,
            FormatLevel::Medium,
            FormatLevel::Short,
        ]
    }

    fn value(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for FormatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormatLevel {
    type Err = UtilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::cases()
            .iter()
            .copied()
            .find(|level| level.as_str() == lower)
            .ok_or_else(|| {
                UtilError::invalid_input(format!(
                    "Unknown format level \"{}\": must be one of {}",
                    s,
                    Self::values().join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
}

/// Formats dates and times for one locale.
///
/// ```
/// use chrono::{Locale, TimeZone, Utc};
/// use utilkit_common::intl_date::{DateFormatter, FormatLevel};
///
/// let formatter = DateFormatter::new(Locale::en_US);
/// let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
/// assert_eq!(formatter.format_date(&dt, FormatLevel::Long, false), "January 15, 2024");
/// assert_eq!(formatter.format_time(&dt, FormatLevel::Short), "10:30 AM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateFormatter {
    locale: Locale,
    order: FieldOrder,
    twelve_hour: bool,
}

impl DateFormatter {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            order: detect_field_order(locale),
            twelve_hour: uses_twelve_hour_clock(locale),
        }
    }

    /// # Errors
    ///
    /// Returns `UtilError::InvalidInput` for unknown locale names.
    pub fn for_locale_name(name: &str) -> Result<Self, UtilError> {
        parse_locale(name).map(Self::new)
    }

    pub fn from_settings(settings: &FormatSettings) -> Self {
        Self::new(settings.locale)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Date followed by time, both at `level`
    pub fn format_date_and_time<Tz>(&self, dt: &DateTime<Tz>, level: FormatLevel) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format!(
            "{} {}",
            self.format_date(dt, level, false),
            self.format_time(dt, level)
        )
    }

    /// Date only.
    ///
    /// With `relative`, dates within a day of the current date (in `dt`'s
    /// timezone) render as `today`, `yesterday` or `tomorrow`.
    pub fn format_date<Tz>(&self, dt: &DateTime<Tz>, level: FormatLevel, relative: bool) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if relative {
            let today = Utc::now().with_timezone(&dt.timezone()).date_naive();
            return self.format_date_relative_to(dt, level, today);
        }
        self.render(dt, self.date_pattern(level))
    }

    /// Date only, relative to `today`
    pub fn format_date_relative_to<Tz>(
        &self,
        dt: &DateTime<Tz>,
        level: FormatLevel,
        today: NaiveDate,
    ) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match dt.date_naive().signed_duration_since(today).num_days() {
            0 => "today".to_string(),
            -1 => "yesterday".to_string(),
            1 => "tomorrow".to_string(),
            _ => self.render(dt, self.date_pattern(level)),
        }
    }

    /// Time only
    pub fn format_time<Tz>(&self, dt: &DateTime<Tz>, level: FormatLevel) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.render(dt, self.time_pattern(level))
    }

    fn date_pattern(&self, level: FormatLevel) -> &'static str {
        match (self.order, level) {
            (_, FormatLevel::Short) => "%x",
            (FieldOrder::MonthDayYear, FormatLevel::Full) => "%A, %B %-d, %Y",
            (FieldOrder::MonthDayYear, FormatLevel::Long) => "%B %-d, %Y",
            (FieldOrder::MonthDayYear, FormatLevel::Medium) => "%b %-d, %Y",
            (FieldOrder::DayMonthYear, FormatLevel::Full) => "%A %-d %B %Y",
            (FieldOrder::DayMonthYear, FormatLevel::Long) => "%-d %B %Y",
            (FieldOrder::DayMonthYear, FormatLevel::Medium) => "%-d %b %Y",
            (FieldOrder::YearMonthDay, FormatLevel::Full) => "%Y %B %-d %A",
            (FieldOrder::YearMonthDay, FormatLevel::Long) => "%Y %B %-d",
            (FieldOrder::YearMonthDay, FormatLevel::Medium) => "%Y %b %-d",
        }
    }

    fn time_pattern(&self, level: FormatLevel) -> &'static str {
        match (self.twelve_hour, level) {
            (true, FormatLevel::Full | FormatLevel::Long) => "%-I:%M:%S %p %Z",
            (true, FormatLevel::Medium) => "%-I:%M:%S %p",
            (true, FormatLevel::Short) => "%-I:%M %p",
            (false, FormatLevel::Full | FormatLevel::Long) => "%H:%M:%S %Z",
            (false, FormatLevel::Medium) => "%H:%M:%S",
            (false, FormatLevel::Short) => "%H:%M",
        }
    }

    fn render<Tz>(&self, dt: &DateTime<Tz>, pattern: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        localized(dt, pattern, self.locale)
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::from_settings(&FormatSettings::default())
    }
}

fn localized<Tz>(dt: &DateTime<Tz>, pattern: &str, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    // Patterns are the fixed ones in this module, so rendering cannot fail
    // short of a chrono regression. Release builds log and return what was written.
    let mut out = String::new();
    let rendered = write!(out, "{}", dt.format_localized(pattern, locale));
    debug_assert!(rendered.is_ok(), "invalid built-in date pattern {:?}", pattern);
    if rendered.is_err() {
        tracing::warn!(pattern, ?locale, "Locale pattern could not be rendered");
    }
    out
}

/// Reads the field order off the locale's numeric date for 23 November 2001.
fn detect_field_order(locale: Locale) -> FieldOrder {
    let Some(probe) = Utc.with_ymd_and_hms(2001, 11, 23, 13, 0, 0).single() else {
        return FieldOrder::MonthDayYear;
    };
    let rendered = localized(&probe, "%x", locale);

    let day = rendered.find("23");
    let month = rendered.find("11");
    let year = rendered.find("2001").or_else(|| rendered.find("01"));

    match (day, month, year) {
        (Some(d), Some(m), Some(y)) if y < m && y < d => FieldOrder::YearMonthDay,
        (Some(d), Some(m), _) if d < m => FieldOrder::DayMonthYear,
        _ => FieldOrder::MonthDayYear,
    }
}

/// Locales without AM/PM markers use a 24-hour clock.
fn uses_twelve_hour_clock(locale: Locale) -> bool {
    Utc.with_ymd_and_hms(2001, 11, 23, 13, 0, 0)
        .single()
        .map(|probe| !localized(&probe, "%p", locale).trim().is_empty())
        .unwrap_or(false)
}
