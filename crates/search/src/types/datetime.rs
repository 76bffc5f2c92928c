//! Serde helpers for engine timestamps.
//!
//! The engine reads and writes UTC instants as RFC 3339 strings with a `Z`
//! suffix (`2016-06-01T12:30:00Z`). Use the module on document fields:
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "helios_search::types::datetime")]
//!     created: DateTime<Utc>,
//!     #[serde(default, with = "helios_search::types::datetime::option")]
//!     closed: Option<DateTime<Utc>>,
//! }
//! ```
//!
//! [`add_gap`] applies engine date-math gaps such as `+1DAY` or
//! `+1MONTH+2DAYS` to an instant.

use chrono::{DateTime, Months, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Formats an instant the way the engine expects it.
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses an engine timestamp.
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

/// Applies a date-math gap (`+1DAY`, `-2HOURS`, `+1YEAR+6MONTHS`) to `start`.
///
/// Returns `None` when the gap is not a sequence of signed unit terms or the
/// result overflows. Rounding terms (`/DAY`) are not supported.
pub fn add_gap(start: DateTime<Utc>, gap: &str) -> Option<DateTime<Utc>> {
    let mut rest = gap.trim();
    if rest.is_empty() {
        return None;
    }
    let mut current = start;
    while let Some(sign) = rest.chars().next() {
        let negative = match sign {
            '+' => false,
            '-' => true,
            _ => return None,
        };
        rest = &rest[1..];
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let amount: u32 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];
        let unit_len = rest.find(['+', '-']).unwrap_or(rest.len());
        let unit = rest[..unit_len].to_ascii_uppercase();
        rest = &rest[unit_len..];
        current = shift(current, amount, &unit, negative)?;
    }
    Some(current)
}

fn shift(at: DateTime<Utc>, amount: u32, unit: &str, negative: bool) -> Option<DateTime<Utc>> {
    let months = match unit {
        "YEAR" | "YEARS" => Some(amount.checked_mul(12)?),
        "MONTH" | "MONTHS" => Some(amount),
        _ => None,
    };
    if let Some(months) = months {
        let months = Months::new(months);
        return if negative {
            at.checked_sub_months(months)
        } else {
            at.checked_add_months(months)
        };
    }

    let amount = i64::from(amount);
    let delta = match unit {
        "DAY" | "DAYS" | "DATE" => TimeDelta::try_days(amount)?,
        "HOUR" | "HOURS" => TimeDelta::try_hours(amount)?,
        "MINUTE" | "MINUTES" => TimeDelta::try_minutes(amount)?,
        "SECOND" | "SECONDS" => TimeDelta::try_seconds(amount)?,
        "MILLI" | "MILLIS" | "MILLISECOND" | "MILLISECONDS" => {
            TimeDelta::try_milliseconds(amount)?
        }
        _ => return None,
    };
    if negative {
        at.checked_sub_signed(delta)
    } else {
        at.checked_add_signed(delta)
    }
}

/// Serializes a timestamp.
pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

/// Deserializes a timestamp.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

/// Helpers for optional timestamps.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes an optional timestamp as a string or null.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&super::format(v)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
