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

//! The `duration` formatter: humanized elapsed time from a millisecond count.
//!
//! The locale's region suffix is ignored here; `en-US` and `en-GB` both humanize as English.

use std::fmt::Display;
use std::str::FromStr;

use super::{FormatContext, FormatError, Formatter, localize_decimal};
use crate::locale::Locale;
use crate::plural::{self, PluralCategory};
use crate::value::Value;

/// A canonical duration unit name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationUnit {
    /// A calendar year, approximated as 365.25 days.
    Year,
    /// A calendar month, approximated as 30.44 days.
    Month,
    /// A week (7 days).
    Week,
    /// A day (24 hours).
    Day,
    /// An hour (60 minutes).
    Hour,
    /// A minute (60 seconds).
    Minute,
    /// A second (1000 milliseconds).
    Second,
    /// A millisecond, the finest unit this formatter emits.
    Millisecond,
}

/// The canonical unit list, largest first; [`DurationUnit::milliseconds`].
const CANONICAL_ORDER: [DurationUnit; 8] = [
    DurationUnit::Year,
    DurationUnit::Month,
    DurationUnit::Week,
    DurationUnit::Day,
    DurationUnit::Hour,
    DurationUnit::Minute,
    DurationUnit::Second,
    DurationUnit::Millisecond,
];

impl DurationUnit {
    /// Returns this unit's size in milliseconds.
    const fn millis(self) -> f64 {
        match self {
            Self::Year => 365.25 * 24.0 * 60.0 * 60.0 * 1000.0,
            Self::Month => 30.44 * 24.0 * 60.0 * 60.0 * 1000.0,
            Self::Week => 7.0 * 24.0 * 60.0 * 60.0 * 1000.0,
            Self::Day => 24.0 * 60.0 * 60.0 * 1000.0,
            Self::Hour => 60.0 * 60.0 * 1000.0,
            Self::Minute => 60.0 * 1000.0,
            Self::Second => 1000.0,
            Self::Millisecond => 1.0,
        }
    }

    /// Returns the singular/plural label for this unit under `locale`, ignoring the region.
    fn label(self, locale: Locale, category: PluralCategory) -> &'static str {
        let plural = category != PluralCategory::One;

        match (locale.language().to_string().as_str(), self, plural) {
            ("fr", Self::Year, false) => "année",
            ("fr", Self::Year, true) => "années",
            ("fr", Self::Month, _) => "mois",
            ("fr", Self::Week, false) => "semaine",
            ("fr", Self::Week, true) => "semaines",
            ("fr", Self::Day, false) => "jour",
            ("fr", Self::Day, true) => "jours",
            ("fr", Self::Hour, false) => "heure",
            ("fr", Self::Hour, true) => "heures",
            ("fr", Self::Minute, false) => "minute",
            ("fr", Self::Minute, true) => "minutes",
            ("fr", Self::Second, false) => "seconde",
            ("fr", Self::Second, true) => "secondes",
            ("fr", Self::Millisecond, false) => "milliseconde",
            ("fr", Self::Millisecond, true) => "millisecondes",
            (_, Self::Year, false) => "year",
            (_, Self::Year, true) => "years",
            (_, Self::Month, false) => "month",
            (_, Self::Month, true) => "months",
            (_, Self::Week, false) => "week",
            (_, Self::Week, true) => "weeks",
            (_, Self::Day, false) => "day",
            (_, Self::Day, true) => "days",
            (_, Self::Hour, false) => "hour",
            (_, Self::Hour, true) => "hours",
            (_, Self::Minute, false) => "minute",
            (_, Self::Minute, true) => "minutes",
            (_, Self::Second, false) => "second",
            (_, Self::Second, true) => "seconds",
            (_, Self::Millisecond, false) => "millisecond",
            (_, Self::Millisecond, true) => "milliseconds",
        }
    }
}

impl FromStr for DurationUnit {
    type Err = ();

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_ascii_lowercase().trim_end_matches('s') {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            "millisecond" | "ms" => Ok(Self::Millisecond),
            _ => Err(()),
        }
    }
}

/// Renders a humanized duration.
#[derive(Clone, Copy, Debug)]
pub struct DurationFormatter;

impl Formatter for DurationFormatter {
    fn format(&self, value: &Value, ctx: &FormatContext) -> Result<String, FormatError> {
        let invalid = || FormatError::InvalidValue("expected a duration mapping with a numeric 'value'".into());

        let (total_ms, precision, units, round) = match value {
            Value::Map(map) => {
                let total_ms = map.get("value").and_then(Value::as_number).ok_or_else(invalid)?;
                #[expect(clippy::cast_sign_loss, clippy::cast_possible_truncation, reason = "precision is a small non-negative count")]
                let precision = map.get("precision").and_then(Value::as_number).map(|p| p.max(0.0) as usize);
                let units = map.get("units").and_then(requested_units);
                let round = map.get("round").map_or(true, |v| matches!(v, Value::Bool(true)));

                (total_ms, precision, units, round)
            }
            Value::Number(number) => (*number, None, None, true),
            _ => return Err(invalid()),
        };

        let requested = units.unwrap_or_else(|| CANONICAL_ORDER.to_vec());
        let parts = decompose(total_ms, &requested, round);
        let parts = match precision {
            Some(limit) => parts.into_iter().take(limit.max(1)).collect(),
            None => parts,
        };

        Ok(render(&parts, ctx.locale))
    }
}

/// Parses the `units` placeholder field into an ordered (largest-first), deduplicated unit list.
///
/// An empty list is treated as unset, per spec.
fn requested_units(value: &Value) -> Option<Vec<DurationUnit>> {
    let Value::Seq(items) = value else { return None };

    let mut requested: Vec<DurationUnit> = items.iter().filter_map(Value::as_str).filter_map(|s| s.parse().ok()).collect();

    if requested.is_empty() {
        return None;
    }

    requested.sort_by_key(|unit| CANONICAL_ORDER.iter().position(|c| c == unit).unwrap_or(usize::MAX));
    requested.dedup();

    Some(requested)
}

/// Breaks `total_ms` down across `units` (largest first), returning `(unit, amount)` pairs with non-zero amounts.
///
/// The smallest emitted unit represents any leftover remainder and is kept even at zero amount, but only when it
/// is the sole part — a zero trailing unit on an otherwise exactly-divisible duration (e.g. "120 minutes, 0
/// seconds") is dropped rather than rendered.
fn decompose(total_ms: f64, units: &[DurationUnit], round: bool) -> Vec<(DurationUnit, f64)> {
    let mut remaining = total_ms;
    let mut parts = Vec::with_capacity(units.len());

    for (index, &unit) in units.iter().enumerate() {
        let is_last = index + 1 == units.len();
        let unit_ms = unit.millis();
        let raw = remaining / unit_ms;

        if is_last {
            let amount = if round { raw.round() } else { raw };

            if amount > 0.0 || parts.is_empty() {
                parts.push((unit, amount));
            }
        } else {
            let amount = raw.floor();

            remaining -= amount * unit_ms;

            if amount > 0.0 {
                parts.push((unit, amount));
            }
        }
    }

    if parts.is_empty() {
        let fallback = units.last().copied().unwrap_or(DurationUnit::Millisecond);

        parts.push((fallback, 0.0));
    }

    parts
}

/// Joins the decomposed `(unit, amount)` pairs into a human-readable, locale-labeled string.
fn render(parts: &[(DurationUnit, f64)], locale: Locale) -> String {
    parts
        .iter()
        .map(|&(unit, amount)| {
            let category = plural::resolve(locale.base_language(), amount);
            let label = unit.label(locale, category);
            let rendered_amount = render_amount(amount, locale);

            format!("{rendered_amount} {label}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a decomposed unit's amount, trimming a trailing `.0` and localizing the decimal separator otherwise.
fn render_amount(amount: f64, locale: Locale) -> String {
    if amount.fract() == 0.0 {
        #[expect(clippy::cast_possible_truncation, reason = "guarded by the fract() == 0.0 check above")]
        return (amount as i64).to_string();
    }

    localize_decimal(DisplayAmount(amount), locale)
}

/// A thin [`Display`] wrapper so [`localize_decimal`] can consume a plain `f64`.
struct DisplayAmount(f64);

impl Display for DisplayAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::DurationFormatter;
    use crate::format::{FormatContext, Formatter};
    use crate::value::{Map, Value};

    #[test]
    fn humanizes_with_unit_subset() {
        let mut payload = Map::new();

        payload.insert("value".into(), Value::Number(7_205_000.0));
        payload.insert(
            "units".into(),
            Value::Seq(vec![Value::string("minutes"), Value::string("seconds")]),
        );

        let ctx = FormatContext { locale: "fr-FR".parse().unwrap(), timezone: None };

        let result = DurationFormatter.format(&Value::Map(payload), &ctx).unwrap();

        assert_eq!(result, "120 minutes, 5 secondes");
    }

    #[test]
    fn drops_trailing_zero_unit_when_exactly_divisible() {
        let mut payload = Map::new();

        payload.insert("value".into(), Value::Number(7_200_000.0));
        payload.insert(
            "units".into(),
            Value::Seq(vec![Value::string("minutes"), Value::string("seconds")]),
        );

        let ctx = FormatContext { locale: "en".parse().unwrap(), timezone: None };

        let result = DurationFormatter.format(&Value::Map(payload), &ctx).unwrap();

        assert_eq!(result, "120 minutes");
    }

    #[test]
    fn exactly_zero_duration_keeps_sole_unit() {
        let ctx = FormatContext { locale: "en".parse().unwrap(), timezone: None };

        let result = DurationFormatter.format(&Value::Number(0.0), &ctx).unwrap();

        assert_eq!(result, "0 milliseconds");
    }

    #[test]
    fn precision_one_keeps_only_largest_unit() {
        let mut payload = Map::new();

        payload.insert("value".into(), Value::Number(90_061_000.0));
        payload.insert("precision".into(), Value::Number(1.0));

        let ctx = FormatContext { locale: "en".parse().unwrap(), timezone: None };

        let result = DurationFormatter.format(&Value::Map(payload), &ctx).unwrap();

        assert_eq!(result, "1 day");
    }
}
