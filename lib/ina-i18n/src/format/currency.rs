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

//! The `currency` formatter: locale-aware monetary amounts.
//!
//! Unlike every other built-in formatter, a missing or invalid currency code is a hard error rather than a
//! best-effort fallback — there's no sensible default currency to silently substitute.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::{FormatContext, FormatError, decimal_separator};
use crate::locale::Locale;
use crate::value::Value;

/// An error raised while formatting a currency placeholder.
#[derive(Clone, Debug, thiserror::Error)]
pub enum CurrencyError {
    /// The placeholder omitted a currency code, or provided `null`.
    #[error("Currency code is required")]
    MissingCode,
    /// The placeholder's currency code wasn't a recognizable three-letter ISO 4217 code.
    #[error("unrecognized currency code: {0:?}")]
    UnknownCode(Box<str>),
}

/// A currency's display symbol and default fractional-digit count.
struct CurrencyInfo {
    /// The symbol or abbreviation rendered alongside the amount.
    symbol: &'static str,
    /// The number of fractional digits conventionally used by this currency.
    digits: u32,
}

/// Looks up display metadata for a recognized ISO 4217 code.
const fn currency_info(code: &str) -> Option<CurrencyInfo> {
    match code.as_bytes() {
        b"USD" => Some(CurrencyInfo { symbol: "$", digits: 2 }),
        b"CAD" => Some(CurrencyInfo { symbol: "CA$", digits: 2 }),
        b"AUD" => Some(CurrencyInfo { symbol: "A$", digits: 2 }),
        b"EUR" => Some(CurrencyInfo { symbol: "€", digits: 2 }),
        b"GBP" => Some(CurrencyInfo { symbol: "£", digits: 2 }),
        b"JPY" => Some(CurrencyInfo { symbol: "¥", digits: 0 }),
        b"CHF" => Some(CurrencyInfo { symbol: "CHF", digits: 2 }),
        b"CNY" => Some(CurrencyInfo { symbol: "¥", digits: 2 }),
        b"KRW" => Some(CurrencyInfo { symbol: "₩", digits: 0 }),
        b"INR" => Some(CurrencyInfo { symbol: "₹", digits: 2 }),
        _ => None,
    }
}

/// Renders a locale-aware currency amount.
#[derive(Clone, Copy, Debug)]
pub struct CurrencyFormatter;

impl super::Formatter for CurrencyFormatter {
    fn format(&self, value: &Value, ctx: &FormatContext) -> Result<String, FormatError> {
        let invalid = || FormatError::InvalidValue("expected a currency mapping with a numeric 'value'".into());

        let Value::Map(map) = value else { return Err(invalid()) };

        let amount = map.get("value").and_then(Value::as_number).ok_or_else(invalid)?;
        let precision = map.get("precision").and_then(Value::as_number);
        let code = match map.get("currency") {
            Some(Value::String(code)) if !code.trim().is_empty() => code.to_uppercase(),
            _ => return Err(FormatError::Currency(CurrencyError::MissingCode)),
        };

        if code.len() != 3 || !code.bytes().all(|byte| byte.is_ascii_alphabetic()) {
            return Err(FormatError::Currency(CurrencyError::UnknownCode(code.into_boxed_str())));
        }

        let info = currency_info(&code).unwrap_or(CurrencyInfo { symbol: "", digits: 2 });
        let symbol = if info.symbol.is_empty() { code.as_str() } else { info.symbol };

        #[expect(clippy::cast_sign_loss, clippy::cast_possible_truncation, reason = "precision is a small non-negative digit count")]
        let digits = precision.map_or(info.digits, |p| p.max(0.0) as u32);

        let decimal = Decimal::from_f64(amount).ok_or_else(invalid)?.round_dp(digits);
        let rendered = localize_amount(decimal, ctx.locale);

        Ok(place_symbol(&rendered, symbol, ctx.locale))
    }
}

/// Renders a decimal amount's digits with the locale's decimal separator.
fn localize_amount(decimal: Decimal, locale: Locale) -> String {
    let separator = decimal_separator(locale);
    let rendered = decimal.to_string();

    if separator == '.' { rendered } else { rendered.replace('.', &separator.to_string()) }
}

/// Places the currency symbol before or after the amount, per locale convention.
fn place_symbol(amount: &str, symbol: &str, locale: Locale) -> String {
    match locale.language().to_string().as_str() {
        "en" | "ja" | "zh" | "ko" => format!("{symbol}{amount}"),
        _ => format!("{amount} {symbol}"),
    }
}

#[cfg(test)]
mod tests {
    use super::CurrencyFormatter;
    use crate::format::{FormatContext, FormatError, Formatter};
    use crate::value::{Map, Value};

    fn ctx(locale: &str) -> FormatContext {
        FormatContext { locale: locale.parse().unwrap(), timezone: None }
    }

    #[test]
    fn formats_us_dollars() {
        let mut map = Map::new();

        map.insert("value".into(), Value::Number(12.3));
        map.insert("currency".into(), Value::string("USD"));

        let result = CurrencyFormatter.format(&Value::Map(map), &ctx("en")).unwrap();

        assert_eq!(result, "$12.30");
    }

    #[test]
    fn formats_euros_with_locale_decimal_comma() {
        let mut map = Map::new();

        map.insert("value".into(), Value::Number(12.3));
        map.insert("currency".into(), Value::string("EUR"));

        let result = CurrencyFormatter.format(&Value::Map(map), &ctx("fr-FR")).unwrap();

        assert_eq!(result, "12,30 €");
    }

    #[test]
    fn missing_currency_raises_required_error() {
        let mut map = Map::new();

        map.insert("value".into(), Value::Number(5.0));
        map.insert("currency".into(), Value::Null);

        let error = CurrencyFormatter.format(&Value::Map(map), &ctx("en")).unwrap_err();

        assert!(matches!(error, FormatError::Currency(super::CurrencyError::MissingCode)));
        assert!(error.to_string().contains("Currency code is required"));
    }
}
