// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright © 2025 Jaxydog
//
// This file is part of 1N4.
//
// 1N4 is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public
// License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// 1N4 is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License along with 1N4. If not, see
// <https://www.gnu.org/licenses/>.

//! Renders typed placeholder values under a target locale and optional timezone.

use std::collections::HashMap;
use std::fmt::Display;

use chrono_tz::Tz;

use crate::locale::Locale;
use crate::value::Value;

/// The long-form date formatter implementation.
mod date;
/// The weekday + date + short-time formatter implementation.
mod datetime;
/// The locale-aware currency formatter implementation.
mod currency;
/// The humanized duration formatter implementation.
mod duration;
/// The short-time formatter implementation.
mod time;

pub use self::currency::CurrencyError;
pub use self::duration::DurationUnit;

/// The context under which a formatter runs: the target locale, and the engine's default timezone (used only when
/// the placeholder payload itself doesn't specify one).
#[derive(Clone, Copy, Debug)]
pub struct FormatContext {
    /// The target locale.
    pub locale: Locale,
    /// The engine's default timezone, consulted when a date-like placeholder omits its own.
    pub timezone: Option<Tz>,
}

/// An error raised by a formatter implementation.
#[derive(Clone, Debug, thiserror::Error)]
pub enum FormatError {
    /// The placeholder's value was not shaped as this formatter expects.
    #[error("invalid value for formatter: {0}")]
    InvalidValue(Box<str>),
    /// A date-like placeholder named an unrecognized IANA timezone.
    #[error("unrecognized timezone: {0:?}")]
    UnknownTimezone(Box<str>),
    /// The currency formatter was invoked without a usable currency code.
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

/// A named placeholder formatter.
pub trait Formatter: Send + Sync {
    /// Renders `value` as a locale-appropriate string.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if `value` is not shaped the way this formatter expects.
    fn format(&self, value: &Value, ctx: &FormatContext) -> Result<String, FormatError>;
}

/// The registry of built-in formatter names to implementations.
pub struct FormatterRegistry {
    /// The registered formatters, keyed by their `{{name, format}}` identifier.
    formatters: HashMap<&'static str, Box<dyn Formatter>>,
}

impl FormatterRegistry {
    /// Returns the formatter registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(AsRef::as_ref)
    }

    /// Registers (or overwrites) a formatter under `name`.
    pub fn insert(&mut self, name: &'static str, formatter: impl Formatter + 'static) {
        self.formatters.insert(name, Box::new(formatter));
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        let mut formatters = HashMap::<&'static str, Box<dyn Formatter>>::new();

        formatters.insert("date", Box::new(self::date::DateFormatter));
        formatters.insert("time", Box::new(self::time::TimeFormatter));
        formatters.insert("datetime", Box::new(self::datetime::DateTimeFormatter));
        formatters.insert("duration", Box::new(self::duration::DurationFormatter));
        formatters.insert("currency", Box::new(self::currency::CurrencyFormatter));

        Self { formatters }
    }
}

impl std::fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterRegistry").field("names", &self.formatters.keys().collect::<Vec<_>>()).finish()
    }
}

/// Shared helper: resolves the effective timezone for a date-like placeholder.
///
/// Order of precedence: the placeholder's own `timezone` field, then `ctx.timezone`, then UTC.
fn effective_timezone(payload_timezone: Option<&str>, ctx: &FormatContext) -> Result<Tz, FormatError> {
    match payload_timezone {
        Some(name) => name.parse::<Tz>().map_err(|_| FormatError::UnknownTimezone(name.into())),
        None => Ok(ctx.timezone.unwrap_or(chrono_tz::UTC)),
    }
}

/// Shared helper: parses a date-like placeholder value (`{ value, timezone? }` mapping, ISO-8601 string, or
/// epoch-millisecond number) into a UTC instant plus the requested timezone name, if any.
fn parse_date_payload(value: &Value) -> Result<(chrono::DateTime<chrono::Utc>, Option<Box<str>>), FormatError> {
    use chrono::{DateTime, TimeZone, Utc};

    let invalid = || FormatError::InvalidValue("expected an ISO-8601 string, epoch millis, or a date-like mapping".into());

    let (raw, timezone) = match value {
        Value::Map(map) => {
            let raw = map.get("value").ok_or_else(invalid)?;
            let timezone = map.get("timezone").and_then(Value::as_str).map(Into::into);

            (raw, timezone)
        }
        scalar => (scalar, None),
    };

    let instant = match raw {
        Value::String(string) => DateTime::parse_from_rfc3339(string).map(|dt| dt.with_timezone(&Utc)).map_err(|_| invalid())?,
        Value::Number(millis) => {
            #[expect(clippy::cast_possible_truncation, reason = "epoch millisecond placeholders fit comfortably in i64")]
            let millis = *millis as i64;

            Utc.timestamp_millis_opt(millis).single().ok_or_else(invalid)?
        }
        _ => return Err(invalid()),
    };

    Ok((instant, timezone))
}

/// Returns the decimal separator used when formatting numbers under `locale`, ignoring any region qualifier.
fn decimal_separator(locale: Locale) -> char {
    match locale.language().to_string().as_str() {
        "fr" | "de" | "es" | "it" | "pt" | "nl" | "ru" | "pl" | "tr" | "sv" | "fi" | "da" | "nb" | "cs" => ',',
        _ => '.',
    }
}

/// Replaces the `.` decimal separator produced by Rust's default float formatting with the locale-appropriate one.
fn localize_decimal(rendered: impl Display, locale: Locale) -> String {
    let separator = decimal_separator(locale);
    let rendered = rendered.to_string();

    if separator == '.' { rendered } else { rendered.replace('.', &separator.to_string()) }
}
