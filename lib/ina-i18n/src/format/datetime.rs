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

//! The `datetime` formatter: full weekday + date + short time (e.g. `mercredi 3 février 2016 04:05`).
//!
//! DST transitions are handled by `chrono-tz`'s IANA database, not by this formatter — converting the UTC instant
//! into the target zone via [`chrono::DateTime::with_timezone`] already accounts for the transition.

use super::date::chrono_locale;
use super::{FormatContext, FormatError, Formatter, effective_timezone, parse_date_payload};
use crate::value::Value;

/// Renders a full weekday, date, and 24-hour time.
#[derive(Clone, Copy, Debug)]
pub struct DateTimeFormatter;

impl Formatter for DateTimeFormatter {
    fn format(&self, value: &Value, ctx: &FormatContext) -> Result<String, FormatError> {
        let (instant, timezone) = parse_date_payload(value)?;
        let zone = effective_timezone(timezone.as_deref(), ctx)?;
        let local = instant.with_timezone(&zone);

        Ok(local.format_localized("%A %-d %B %Y %H:%M", chrono_locale(ctx.locale)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::DateTimeFormatter;
    use crate::format::{FormatContext, Formatter};
    use crate::value::Value;

    fn ctx(locale: &str) -> FormatContext {
        FormatContext { locale: locale.parse().unwrap(), timezone: None }
    }

    #[test]
    fn formats_french_weekday_date_time() {
        let mut map = crate::value::Map::new();

        map.insert("value".into(), Value::string("2016-02-03T04:05:06Z"));

        let value = Value::Map(map);

        assert_eq!(DateTimeFormatter.format(&value, &ctx("fr")).unwrap(), "mercredi 3 février 2016 04:05");
    }

    #[test]
    fn respects_dst_transition_before_fallback() {
        let mut map = crate::value::Map::new();

        map.insert("value".into(), Value::string("2016-10-30T00:05:06Z"));
        map.insert("timezone".into(), Value::string("Europe/Paris"));

        let value = Value::Map(map);
        let result = DateTimeFormatter.format(&value, &ctx("en")).unwrap();

        assert!(result.ends_with("02:05"));
    }

    #[test]
    fn respects_dst_transition_after_fallback() {
        let mut map = crate::value::Map::new();

        map.insert("value".into(), Value::string("2016-10-30T02:05:06Z"));
        map.insert("timezone".into(), Value::string("Europe/Paris"));

        let value = Value::Map(map);
        let result = DateTimeFormatter.format(&value, &ctx("en")).unwrap();

        assert!(result.ends_with("03:05"));
    }
}
