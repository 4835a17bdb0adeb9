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

//! The `date` formatter: a full, long-form date (e.g. `3 February 2016`, `30 octobre 2016`).

use chrono::Locale as ChronoLocale;

use super::{FormatContext, FormatError, Formatter, effective_timezone, parse_date_payload};
use crate::locale::Locale;
use crate::value::Value;

/// Renders a full long-form date.
#[derive(Clone, Copy, Debug)]
pub struct DateFormatter;

impl Formatter for DateFormatter {
    fn format(&self, value: &Value, ctx: &FormatContext) -> Result<String, FormatError> {
        let (instant, timezone) = parse_date_payload(value)?;
        let zone = effective_timezone(timezone.as_deref(), ctx)?;
        let local = instant.with_timezone(&zone);

        Ok(local.format_localized("%e %B %Y", chrono_locale(ctx.locale)).to_string().trim_start().to_owned())
    }
}

/// Maps our [`Locale`] onto the closest [`ChronoLocale`] variant, ignoring the region when no exact match exists.
pub(super) fn chrono_locale(locale: Locale) -> ChronoLocale {
    match locale.to_string().as_str() {
        "fr-CA" => ChronoLocale::fr_CA,
        "pt-BR" => ChronoLocale::pt_BR,
        "en-GB" => ChronoLocale::en_GB,
        _ => match locale.language().to_string().as_str() {
            "fr" => ChronoLocale::fr_FR,
            "es" => ChronoLocale::es_ES,
            "de" => ChronoLocale::de_DE,
            "it" => ChronoLocale::it_IT,
            "pt" => ChronoLocale::pt_PT,
            "ru" => ChronoLocale::ru_RU,
            "ja" => ChronoLocale::ja_JP,
            "nl" => ChronoLocale::nl_NL,
            "pl" => ChronoLocale::pl_PL,
            "sv" => ChronoLocale::sv_SE,
            "ar" => ChronoLocale::ar_SA,
            "zh" => ChronoLocale::zh_CN,
            "ko" => ChronoLocale::ko_KR,
            _ => ChronoLocale::en_US,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::DateFormatter;
    use crate::format::{FormatContext, Formatter};
    use crate::value::Value;

    #[test]
    fn formats_english_long_date() {
        let value = Value::string("2016-02-03T00:00:00Z");
        let ctx = FormatContext { locale: "en".parse().unwrap(), timezone: None };

        let result = DateFormatter.format(&value, &ctx).unwrap();

        assert_eq!(result, "3 February 2016");
    }

    #[test]
    fn formats_french_long_date() {
        let value = Value::string("2016-10-30T00:00:00Z");
        let ctx = FormatContext { locale: "fr".parse().unwrap(), timezone: None };

        let result = DateFormatter.format(&value, &ctx).unwrap();

        assert_eq!(result, "30 octobre 2016");
    }
}
