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

//! Defines the tagged value variant that the tree walker traverses.

use std::fmt::Debug;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A string-keyed, insertion-order-preserving mapping of [`Value`]s.
pub type Map = IndexMap<Arc<str>, Value>;

/// A structured value the engine can translate nodes inside of.
///
/// This models the "dynamic structural shape" described in the design notes: scalars, ordered sequences,
/// string-keyed mappings, and opaque objects exposing a canonical serialization hook.
#[derive(Clone, Debug)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar.
    ///
    /// Stored as a 64-bit float, mirroring the single numeric type of the dynamically-typed source language.
    Number(f64),
    /// A string scalar.
    String(Arc<str>),
    /// An ordered sequence of values.
    Seq(Vec<Value>),
    /// A string-keyed mapping of values.
    Map(Map),
    /// An opaque value that exposes a canonical tree form via [`Canonicalizable`].
    Opaque(Arc<dyn Canonicalizable>),
}

impl Value {
    /// Creates a new [`Value::String`] from any string-like value.
    #[must_use]
    pub fn string(value: impl Into<Arc<str>>) -> Self {
        Self::String(value.into())
    }

    /// Creates a new, empty [`Value::Map`].
    #[must_use]
    pub fn map() -> Self {
        Self::Map(Map::new())
    }

    /// Returns this value as a map, if it is one.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Map> {
        if let Self::Map(map) = self { Some(map) } else { None }
    }

    /// Returns this value as a string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(string) = self { Some(string) } else { None }
    }

    /// Returns this value as a number, if it is one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        if let Self::Number(number) = self { Some(*number) } else { None }
    }

    /// Returns `true` if this value is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Replaces opaque values with their canonical form, recursively, until a non-opaque shape is reached.
    ///
    /// Returns the value unchanged if it is not [`Value::Opaque`].
    #[must_use]
    pub fn canonicalize(self) -> Self {
        match self {
            Self::Opaque(opaque) => opaque.canonicalize().canonicalize(),
            other => other,
        }
    }

    /// Renders this value for placeholder substitution.
    ///
    /// `null`/missing values stringify to an empty string; everything else uses a plain, locale-agnostic textual
    /// representation. Formatter output never goes through this path — only bare `{{name}}` substitution does.
    #[must_use]
    pub fn stringify(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_plain_number(*value),
            Self::String(value) => value.to_string(),
            Self::Seq(_) | Self::Map(_) => String::new(),
            Self::Opaque(opaque) => opaque.canonicalize().stringify(),
        }
    }
}

/// Formats a number without a locale, trimming a trailing `.0` for integral values.
fn format_plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        #[expect(clippy::cast_possible_truncation, reason = "guarded by the fract() == 0.0 and is_finite() checks above")]
        return (value as i64).to_string();
    }

    value.to_string()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            #[expect(clippy::float_cmp, reason = "structural-equality check for test assertions, not numeric comparison")]
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b) || a.canonicalize() == b.canonicalize(),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Seq(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;

                for value in values {
                    seq.serialize_element(value)?;
                }

                seq.end()
            }
            Self::Map(map) => {
                let mut ser_map = serializer.serialize_map(Some(map.len()))?;

                for (key, value) in map {
                    ser_map.serialize_entry(key, value)?;
                }

                ser_map.end()
            }
            Self::Opaque(opaque) => opaque.canonicalize().serialize(serializer),
        }
    }
}

/// Visits a self-describing format and builds the corresponding [`Value`] variant.
///
/// [`Value::Opaque`] has no textual or structural representation of its own, so deserialization never produces
/// it — only the scalar, sequence, and mapping variants are reachable from this path.
struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a null, boolean, number, string, sequence, or mapping")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        #[expect(clippy::cast_precision_loss, reason = "values are stored as f64 throughout this type")]
        Ok(Value::Number(value as f64))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
        #[expect(clippy::cast_precision_loss, reason = "values are stored as f64 throughout this type")]
        Ok(Value::Number(value as f64))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Value::Number(value))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Value::string(value))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
        Ok(Value::String(value.into()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));

        while let Some(value) = seq.next_element()? {
            values.push(value);
        }

        Ok(Value::Seq(values))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Map::with_capacity(map.size_hint().unwrap_or(0));

        while let Some((key, value)) = map.next_entry::<Arc<str>, Value>()? {
            entries.insert(key, value);
        }

        Ok(Value::Map(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

/// A capability for opaque values that can expose a canonical, translatable tree form.
///
/// Replaces the duck-typed `toJSON` hook of the source implementation with an explicit trait. A value with no
/// meaningful canonical form simply isn't wrapped in [`Value::Opaque`] in the first place.
pub trait Canonicalizable: Debug + Send + Sync {
    /// Returns the canonical [`Value`] tree for this object.
    fn canonicalize(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Canonicalizable, Value};

    #[derive(Debug)]
    struct Stub(i64);

    impl Canonicalizable for Stub {
        fn canonicalize(&self) -> Value {
            Value::Number(self.0 as f64)
        }
    }

    #[test]
    fn opaque_canonicalizes_recursively() {
        let value = Value::Opaque(Arc::new(Stub(5)));

        assert_eq!(value.canonicalize(), Value::Number(5.0));
    }

    #[test]
    fn stringify_trims_integral_numbers() {
        assert_eq!(Value::Number(3.0).stringify(), "3");
        assert_eq!(Value::Number(3.5).stringify(), "3.5");
        assert_eq!(Value::Null.stringify(), "");
    }
}
