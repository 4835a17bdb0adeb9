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

//! The `time` formatter: a short, locale-conventional clock time (e.g. `4:05 PM`, `Son las 4:05`).

use super::{FormatContext, FormatError, Formatter, effective_timezone, parse_date_payload};
use crate::locale::Locale;
use crate::value::Value;

/// Renders a short time.
#[derive(Clone, Copy, Debug)]
pub struct TimeFormatter;

impl Formatter for TimeFormatter {
    fn format(&self, value: &Value, ctx: &FormatContext) -> Result<String, FormatError> {
        let (instant, timezone) = parse_date_payload(value)?;
        let zone = effective_timezone(timezone.as_deref(), ctx)?;
        let local = instant.with_timezone(&zone);

        Ok(short_time_template(ctx.locale, &local))
    }
}

/// Renders a [`chrono::DateTime`] under the short-time convention for `locale`.
fn short_time_template(locale: Locale, local: &chrono::DateTime<chrono_tz::Tz>) -> String {
    match locale.language().to_string().as_str() {
        "en" => local.format("%-I:%M %p").to_string(),
        "es" => format!("Son las {}", local.format("%-I:%M")),
        "fr" => format!("{}h{}", local.format("%-H"), local.format("%M")),
        _ => local.format("%H:%M").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::TimeFormatter;
    use crate::format::{FormatContext, Formatter};
    use crate::value::Value;

    #[test]
    fn formats_english_short_time() {
        let value = Value::string("2016-02-03T16:05:00Z");
        let ctx = FormatContext { locale: "en".parse().unwrap(), timezone: None };

        assert_eq!(TimeFormatter.format(&value, &ctx).unwrap(), "4:05 PM");
    }
}
