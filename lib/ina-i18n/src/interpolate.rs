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

//! Substitutes `{{name}}`, `{{name, format}}`, and `$t(key)` markers within a template string.

use std::sync::Arc;

use crate::format::{FormatContext, FormatError, FormatterRegistry};
use crate::value::{Map, Value};

/// A formatter failure surfaced from [`interpolate`], carrying the name of the offending placeholder.
#[derive(Clone, Debug, thiserror::Error)]
#[error("formatter for placeholder '{placeholder}' failed: {source}")]
pub struct InterpolationError {
    /// The name of the placeholder whose formatter raised.
    pub placeholder: Arc<str>,
    /// The underlying formatter error.
    #[source]
    pub source: FormatError,
}

/// Interpolates `template` against `placeholders`, resolving `{{name}}`/`{{name, format}}` markers.
///
/// `resolve_reference` is invoked for `$t(other-key)` markers to run a second interpolation pass against the same
/// locale's catalog; it should return the already-interpolated template text for `other-key`, or `None` if the key
/// has no entry (in which case the reference is emitted as the bare key, matching missing-key policy elsewhere).
///
/// # Errors
///
/// Returns the first [`InterpolationError`] raised by a named formatter. The caller is responsible for turning this
/// into the node's structured `error` marker; this function does not partially apply work — the caller retains the
/// original template to build the fallback node.
pub fn interpolate(
    template: &str,
    placeholders: &Map,
    ctx: &FormatContext,
    registry: &FormatterRegistry,
    resolve_reference: &mut dyn FnMut(&str) -> Option<String>,
) -> Result<String, InterpolationError> {
    let with_placeholders = substitute_placeholders(template, placeholders, ctx, registry)?;

    Ok(substitute_references(&with_placeholders, resolve_reference))
}

/// Substitutes `{{name}}` and `{{name, format}}` markers.
fn substitute_placeholders(
    template: &str,
    placeholders: &Map,
    ctx: &FormatContext,
    registry: &FormatterRegistry,
) -> Result<String, InterpolationError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);

        let Some(end) = rest[start..].find("}}") else {
            // No closing marker; emit the rest verbatim.
            output.push_str(&rest[start..]);
            rest = "";

            break;
        };

        let marker = &rest[start + 2..start + end];
        output.push_str(&render_marker(marker, placeholders, ctx, registry)?);

        rest = &rest[start + end + 2..];
    }

    output.push_str(rest);

    Ok(output)
}

/// Renders a single `name` or `name, format` marker body (without the surrounding `{{`/`}}`).
fn render_marker(
    marker: &str,
    placeholders: &Map,
    ctx: &FormatContext,
    registry: &FormatterRegistry,
) -> Result<String, InterpolationError> {
    let marker = marker.trim();

    let Some((name, format)) = marker.split_once(',') else {
        let name = marker.trim();
        let value = placeholders.get(name).unwrap_or(&Value::Null);

        return Ok(value.stringify());
    };

    let name = name.trim();
    let format = format.trim();
    let value = placeholders.get(name).unwrap_or(&Value::Null);

    match registry.get(format) {
        Some(formatter) => formatter.format(value, ctx).map_err(|source| InterpolationError { placeholder: name.into(), source }),
        // An unknown format name is a no-op: emit the placeholder's raw value.
        None => Ok(value.stringify()),
    }
}

/// Substitutes `$t(other-key)` reference markers using `resolve_reference`.
fn substitute_references(template: &str, resolve_reference: &mut dyn FnMut(&str) -> Option<String>) -> String {
    const PREFIX: &str = "$t(";

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(PREFIX) {
        output.push_str(&rest[..start]);

        let after_prefix = &rest[start + PREFIX.len()..];

        let Some(end) = after_prefix.find(')') else {
            output.push_str(&rest[start..]);
            rest = "";

            break;
        };

        let key = &after_prefix[..end];
        output.push_str(&resolve_reference(key).unwrap_or_else(|| key.to_owned()));

        rest = &after_prefix[end + 1..];
    }

    output.push_str(rest);

    output
}

#[cfg(test)]
mod tests {
    use super::interpolate;
    use crate::format::{FormatContext, FormatterRegistry};
    use crate::value::{Map, Value};

    fn en() -> FormatContext {
        FormatContext { locale: "en".parse().unwrap(), timezone: None }
    }

    #[test]
    fn substitutes_plain_placeholder() {
        let mut placeholders = Map::new();

        placeholders.insert("john".into(), Value::string("John"));

        let registry = FormatterRegistry::default();
        let mut no_refs = |_: &str| None;

        let result = interpolate("Good bye {{john}}", &placeholders, &en(), &registry, &mut no_refs).unwrap();

        assert_eq!(result, "Good bye John");
    }

    #[test]
    fn missing_placeholder_becomes_empty() {
        let placeholders = Map::new();
        let registry = FormatterRegistry::default();
        let mut no_refs = |_: &str| None;

        let result = interpolate("Hello {{name}}!", &placeholders, &en(), &registry, &mut no_refs).unwrap();

        assert_eq!(result, "Hello !");
    }

    #[test]
    fn unknown_format_emits_raw_value() {
        let mut placeholders = Map::new();

        placeholders.insert("x".into(), Value::Number(5.0));

        let registry = FormatterRegistry::default();
        let mut no_refs = |_: &str| None;

        let result = interpolate("{{x, nonexistent}}", &placeholders, &en(), &registry, &mut no_refs).unwrap();

        assert_eq!(result, "5");
    }

    #[test]
    fn resolves_reference_markers() {
        let placeholders = Map::new();
        let registry = FormatterRegistry::default();
        let mut resolve = |key: &str| (key == "other").then(|| "Resolved".to_owned());

        let result = interpolate("prefix $t(other) suffix", &placeholders, &en(), &registry, &mut resolve).unwrap();

        assert_eq!(result, "prefix Resolved suffix");
    }
}
