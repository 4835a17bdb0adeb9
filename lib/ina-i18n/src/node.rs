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

//! Recognizes and builds the canonical `@translate` node shape.

use std::sync::Arc;

use crate::value::{Map, Value};

/// The marker key recognized at the outer level of a translation node.
pub const MARKER_KEY: &str = "@translate";

/// The `key` property within a translation node.
const KEY: &str = "key";
/// The `quantity` property within a translation node.
const QUANTITY: &str = "quantity";
/// The `placeholders` property within a translation node.
const PLACEHOLDERS: &str = "placeholders";
/// The `fallback` property within a translation node.
const FALLBACK: &str = "fallback";
/// The `error` property appended to a node on formatter failure.
pub const ERROR_KEY: &str = "error";

/// A parsed, valid `@translate` node.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslationNode {
    /// The dotted path or flat identifier of the template.
    pub key: Arc<str>,
    /// The quantity used to trigger plural resolution, also bound as the `count` placeholder.
    pub quantity: Option<f64>,
    /// Named placeholder values.
    pub placeholders: Map,
    /// A template used verbatim if `key` is not found in any consulted locale.
    pub fallback: Option<Arc<str>>,
}

/// Returns `true` if `value` is a well-formed translation node.
///
/// See [`try_parse_translation_node`] for the extraction and the exact validation rules.
#[must_use]
pub fn is_translation_node(value: &Value) -> bool {
    try_parse_translation_node(value).is_some()
}

/// Attempts to parse `value` as a translation node, returning [`None`] if it does not match the canonical shape.
///
/// `value` must be a plain mapping with exactly one top-level key, [`MARKER_KEY`], whose value is itself a plain
/// mapping containing a non-empty `key` string and only the other recognized, correctly-typed properties. Any
/// deviation — extra top-level keys, extra inner keys, or a wrongly-typed property — causes rejection; the caller
/// must then treat `value` as an ordinary mapping.
#[must_use]
pub fn try_parse_translation_node(value: &Value) -> Option<TranslationNode> {
    let outer = value.as_map()?;

    if outer.len() != 1 {
        return None;
    }

    let inner = outer.get(MARKER_KEY)?.as_map()?;

    let key = inner.get(KEY)?.as_str()?;

    if key.is_empty() {
        return None;
    }

    let mut quantity = None;
    let mut placeholders = Map::new();
    let mut fallback = None;

    for (property, property_value) in inner {
        match property.as_ref() {
            KEY => {}
            QUANTITY => quantity = Some(property_value.as_number()?),
            PLACEHOLDERS => placeholders = property_value.as_map()?.clone(),
            FALLBACK => fallback = Some(property_value.as_str()?.into()),
            _ => return None,
        }
    }

    Some(TranslationNode { key: key.into(), quantity, placeholders, fallback })
}

/// Builds the canonical wire form of a translation node.
///
/// Mirrors the public `BuildTranslateNode(key, placeholders?, options?)` operation.
#[must_use]
pub fn build_translate_node(key: impl Into<Arc<str>>, placeholders: Option<Map>, options: Option<NodeOptions>) -> Value {
    let mut inner = Map::new();

    inner.insert(KEY.into(), Value::String(key.into()));

    if let Some(placeholders) = placeholders
        && !placeholders.is_empty()
    {
        inner.insert(PLACEHOLDERS.into(), Value::Map(placeholders));
    }

    if let Some(options) = options {
        if let Some(fallback) = options.fallback {
            inner.insert(FALLBACK.into(), Value::String(fallback));
        }

        if let Some(quantity) = options.quantity {
            inner.insert(QUANTITY.into(), Value::Number(quantity));
        }
    }

    let mut outer = Map::new();

    outer.insert(MARKER_KEY.into(), Value::Map(inner));

    Value::Map(outer)
}

/// Optional fields accepted by [`build_translate_node`].
#[derive(Clone, Debug, Default)]
pub struct NodeOptions {
    /// A template used verbatim if `key` is not found in any consulted locale.
    pub fallback: Option<Arc<str>>,
    /// The quantity used to trigger plural resolution.
    pub quantity: Option<f64>,
}

/// Returns a copy of the original translation node's outer mapping with an `error` property attached, per the
/// formatter-failure error-marker outcome.
#[must_use]
pub fn with_error(original: &Value, message: impl Into<Arc<str>>) -> Value {
    let Some(outer) = original.as_map() else { return original.clone() };

    let mut outer = outer.clone();

    outer.insert(ERROR_KEY.into(), Value::String(message.into()));

    Value::Map(outer)
}

#[cfg(test)]
mod tests {
    use super::{is_translation_node, try_parse_translation_node};
    use crate::value::{Map, Value};

    fn wrap(inner: Map) -> Value {
        let mut outer = Map::new();

        outer.insert("@translate".into(), Value::Map(inner));

        Value::Map(outer)
    }

    #[test]
    fn accepts_minimal_node() {
        let mut inner = Map::new();

        inner.insert("key".into(), Value::string("howdy"));

        let node = wrap(inner);

        assert!(is_translation_node(&node));

        let parsed = try_parse_translation_node(&node).unwrap();

        assert_eq!(&*parsed.key, "howdy");
        assert!(parsed.placeholders.is_empty());
    }

    #[test]
    fn rejects_extra_outer_key() {
        let mut inner = Map::new();

        inner.insert("key".into(), Value::string("howdy"));

        let Value::Map(mut outer) = wrap(inner) else { unreachable!() };

        outer.insert("extra".into(), Value::Bool(true));

        assert!(!is_translation_node(&Value::Map(outer)));
    }

    #[test]
    fn rejects_string_quantity() {
        let mut inner = Map::new();

        inner.insert("key".into(), Value::string("plural-dog"));
        inner.insert("quantity".into(), Value::string("3"));

        assert!(!is_translation_node(&wrap(inner)));
    }

    #[test]
    fn rejects_empty_key() {
        let mut inner = Map::new();

        inner.insert("key".into(), Value::string(""));

        assert!(!is_translation_node(&wrap(inner)));
    }
}
