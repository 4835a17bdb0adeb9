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

//! Deep-traverses a [`Value`] tree, collecting translation nodes without resolving them.
//!
//! Resolution is deferred: the walker hands back a skeleton with a placeholder at each translation node's position,
//! plus the recorded path to that position, so the caller can batch-load every collected key before a second pass
//! splices resolved values in. A position is recorded as a path rather than a closure over `&mut Value`, since the
//! latter doesn't satisfy the borrow checker as readily once the skeleton itself needs to be mutated afterward.

use std::sync::Arc;

use crate::node::{TranslationNode, try_parse_translation_node};
use crate::value::Value;

/// One step into a [`Value`] tree: a map key or a sequence index.
#[derive(Clone, Debug)]
pub enum PathSegment {
    /// Descend into a map under this key.
    Key(Arc<str>),
    /// Descend into a sequence at this index.
    Index(usize),
}

/// A translation node discovered during the walk, not yet resolved.
#[derive(Clone, Debug)]
pub struct Pending {
    /// The path from the skeleton's root to this node's position.
    pub path: Vec<PathSegment>,
    /// The original, unparsed node value (the outer `{"@translate": {...}}` mapping), kept so a formatter failure
    /// can attach an `error` property to a faithful copy of it.
    pub original: Value,
    /// The parsed node.
    pub node: TranslationNode,
}

/// Walks `value`, returning a skeleton with [`Value::Null`] placeholders at every translation node's position, the
/// list of [`Pending`] resolutions, and the set of catalog keys those resolutions will need.
#[must_use]
pub fn walk(value: &Value) -> (Value, Vec<Pending>, Vec<Arc<str>>) {
    let mut pending = Vec::new();
    let mut keys = Vec::new();
    let mut path = Vec::new();

    let skeleton = walk_node(value, &mut path, &mut pending, &mut keys);

    (skeleton, pending, keys)
}

/// Recursively walks one node, per the rules in order: translation node, plain mapping, sequence, opaque
/// canonicalizable, scalar/leaf.
fn walk_node(value: &Value, path: &mut Vec<PathSegment>, pending: &mut Vec<Pending>, keys: &mut Vec<Arc<str>>) -> Value {
    if let Some(node) = try_parse_translation_node(value) {
        keys.push(Arc::clone(&node.key));
        pending.push(Pending { path: path.clone(), original: value.clone(), node });

        return Value::Null;
    }

    match value {
        Value::Map(map) => {
            let mut output = crate::value::Map::with_capacity(map.len());

            for (key, child) in map {
                path.push(PathSegment::Key(Arc::clone(key)));
                output.insert(Arc::clone(key), walk_node(child, path, pending, keys));
                path.pop();
            }

            Value::Map(output)
        }
        Value::Seq(items) => {
            let mut output = Vec::with_capacity(items.len());

            for (index, child) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                output.push(walk_node(child, path, pending, keys));
                path.pop();
            }

            Value::Seq(output)
        }
        Value::Opaque(opaque) => walk_node(&opaque.canonicalize(), path, pending, keys),
        scalar => scalar.clone(),
    }
}

/// Splices `resolved` into `skeleton` at `path`, replacing whatever placeholder occupies that position.
///
/// # Panics
///
/// Panics if `path` doesn't address a valid position in `skeleton` — this would indicate a bug in [`walk`], since
/// every recorded path is built from the exact structure being walked.
pub fn splice(skeleton: &mut Value, path: &[PathSegment], resolved: Value) {
    let Some((last, ancestors)) = path.split_last() else {
        *skeleton = resolved;

        return;
    };

    let mut current = skeleton;

    for segment in ancestors {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Map(map)) => map.get_mut(key).expect("walker path should address a live map key"),
            (PathSegment::Index(index), Value::Seq(items)) => {
                items.get_mut(*index).expect("walker path should address a live sequence index")
            }
            _ => unreachable!("walker path segment type should match the skeleton's shape at that position"),
        };
    }

    match (last, current) {
        (PathSegment::Key(key), Value::Map(map)) => {
            map.insert(Arc::clone(key), resolved);
        }
        (PathSegment::Index(index), Value::Seq(items)) => items[*index] = resolved,
        _ => unreachable!("walker path segment type should match the skeleton's shape at that position"),
    }
}

#[cfg(test)]
mod tests {
    use super::{splice, walk};
    use crate::value::{Map, Value};

    fn translate_node(key: &str) -> Value {
        let mut inner = Map::new();

        inner.insert("key".into(), Value::string(key));

        let mut outer = Map::new();

        outer.insert("@translate".into(), Value::Map(inner));

        Value::Map(outer)
    }

    #[test]
    fn scalars_pass_through_unchanged() {
        let (skeleton, pending, keys) = walk(&Value::Number(5.0));

        assert_eq!(skeleton, Value::Number(5.0));
        assert!(pending.is_empty());
        assert!(keys.is_empty());
    }

    #[test]
    fn collects_nested_translation_node() {
        let mut nested = Map::new();

        nested.insert("object".into(), translate_node("howdy"));

        let mut outer = Map::new();

        outer.insert("nested".into(), Value::Map(nested));

        let (skeleton, pending, keys) = walk(&Value::Map(outer));

        assert_eq!(pending.len(), 1);
        assert_eq!(&*keys[0], "howdy");

        let mut skeleton = skeleton;

        splice(&mut skeleton, &pending[0].path, Value::string("Howdy"));

        let Value::Map(outer) = &skeleton else { unreachable!() };
        let Some(Value::Map(nested)) = outer.get("nested") else { unreachable!() };

        assert_eq!(nested.get("object"), Some(&Value::string("Howdy")));
    }

    #[test]
    fn invalid_node_is_walked_as_an_ordinary_mapping() {
        let Value::Map(mut inner) = translate_node("howdy") else { unreachable!() };

        inner.insert("extra".into(), Value::Bool(true));

        let (skeleton, pending, _) = walk(&Value::Map(inner.clone()));

        assert!(pending.is_empty());
        assert_eq!(skeleton, Value::Map(inner));
    }
}
