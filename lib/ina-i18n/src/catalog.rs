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

//! The in-memory template store: `(locale, dotted-key-path) -> template`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::locale::Locale;
use crate::plural::{self, PluralCategory};
use crate::value::{Map, Value};

/// A concurrency-safe store of per-locale template trees.
///
/// Reads are non-blocking against one another; writes (`add`) are serialized, matching the concurrency primitive
/// `ina_logging::Logger` already uses for its endpoint table.
#[derive(Debug, Default)]
pub struct Catalog {
    /// The per-locale template trees, keyed by locale tag.
    locales: RwLock<HashMap<Locale, Map>>,
}

impl Catalog {
    /// Creates a new, empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-merges `templates` into the tree stored for `locale`.
    ///
    /// Nested mappings merge recursively; any other value (including a replacement of a previously-nested mapping
    /// with a leaf) overwrites the existing entry.
    pub async fn add(&self, locale: Locale, templates: Map) {
        let mut locales = self.locales.write().await;
        let existing = locales.entry(locale).or_default();

        merge_into(existing, templates);
    }

    /// Returns `true` if `dotted_key` resolves to a leaf template under `locale`.
    pub async fn exists(&self, locale: Locale, dotted_key: &str) -> bool {
        self.lookup(locale, dotted_key).await.is_some()
    }

    /// Looks up `dotted_key` under `locale`, traversing nested template trees by `.`-separated segments.
    pub async fn lookup(&self, locale: Locale, dotted_key: &str) -> Option<Arc<str>> {
        let locales = self.locales.read().await;
        let tree = locales.get(&locale)?;

        lookup_path(tree, dotted_key)
    }

    /// Looks up `dotted_key` under `locale`, trying plural-aware sibling keys before the bare key.
    ///
    /// Attempt order, first hit wins: the resolved category's numeric index suffix (`<key>_<index>`, e.g.
    /// `plural-dog_3` for `few`), then the legacy `<key>_plural`, then the bare key.
    pub async fn lookup_with_plural(&self, locale: Locale, dotted_key: &str, count: Option<f64>) -> Option<Arc<str>> {
        let locales = self.locales.read().await;
        let tree = locales.get(&locale)?;

        if let Some(count) = count {
            let category: PluralCategory = plural::resolve(locale, count);
            let index_key = format!("{dotted_key}_{}", category.index());

            if let Some(template) = lookup_path(tree, &index_key) {
                return Some(template);
            }

            let legacy_key = format!("{dotted_key}_plural");

            if let Some(template) = lookup_path(tree, &legacy_key) {
                return Some(template);
            }
        }

        lookup_path(tree, dotted_key)
    }
}

/// Traverses `tree` by splitting `dotted_key` on `.`, returning the leaf string at the end of the path.
fn lookup_path(tree: &Map, dotted_key: &str) -> Option<Arc<str>> {
    let mut current = tree;
    let mut segments = dotted_key.split('.').peekable();

    while let Some(segment) = segments.next() {
        let value = current.get(segment)?;

        if segments.peek().is_none() {
            return value.as_str().map(Into::into);
        }

        current = value.as_map()?;
    }

    None
}

/// Recursively merges `incoming` into `base`: nested mappings merge key-by-key, everything else overwrites.
fn merge_into(base: &mut Map, incoming: Map) {
    for (key, value) in incoming {
        match (base.get_mut(&key), value) {
            (Some(Value::Map(existing)), Value::Map(incoming)) => merge_into(existing, incoming),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Catalog;
    use crate::value::{Map, Value};

    fn locale(tag: &str) -> crate::locale::Locale {
        tag.parse().unwrap()
    }

    #[tokio::test]
    async fn adds_and_looks_up_flat_key() {
        let catalog = Catalog::new();
        let mut templates = Map::new();

        templates.insert("howdy".into(), Value::string("Howdy"));

        catalog.add(locale("en"), templates).await;

        assert_eq!(catalog.lookup(locale("en"), "howdy").await.as_deref(), Some("Howdy"));
    }

    #[tokio::test]
    async fn adds_and_looks_up_dotted_key() {
        let catalog = Catalog::new();
        let mut nested = Map::new();

        nested.insert("world".into(), Value::string("Hello, world!"));

        let mut templates = Map::new();

        templates.insert("hello".into(), Value::Map(nested));

        catalog.add(locale("en"), templates).await;

        assert_eq!(catalog.lookup(locale("en"), "hello.world").await.as_deref(), Some("Hello, world!"));
    }

    #[tokio::test]
    async fn deep_merges_successive_adds() {
        let catalog = Catalog::new();
        let mut first = Map::new();
        let mut first_nested = Map::new();

        first_nested.insert("world".into(), Value::string("Hello, world!"));
        first.insert("hello".into(), Value::Map(first_nested));

        catalog.add(locale("en"), first).await;

        let mut second = Map::new();
        let mut second_nested = Map::new();

        second_nested.insert("there".into(), Value::string("Hello there!"));
        second.insert("hello".into(), Value::Map(second_nested));

        catalog.add(locale("en"), second).await;

        assert_eq!(catalog.lookup(locale("en"), "hello.world").await.as_deref(), Some("Hello, world!"));
        assert_eq!(catalog.lookup(locale("en"), "hello.there").await.as_deref(), Some("Hello there!"));
    }

    #[tokio::test]
    async fn lookup_with_plural_uses_category_index_suffix() {
        let catalog = Catalog::new();
        let mut templates = Map::new();

        templates.insert("plural-dog_3".into(), Value::string("few dogs"));

        catalog.add(locale("ar"), templates).await;

        let result = catalog.lookup_with_plural(locale("ar"), "plural-dog", Some(3.0)).await;

        assert_eq!(result.as_deref(), Some("few dogs"));
    }

    #[tokio::test]
    async fn lookup_with_plural_finds_many_category_for_count_eleven() {
        let catalog = Catalog::new();
        let mut templates = Map::new();

        // Arabic's "many" category (index 4) covers counts like 11, which never equals the index itself.
        templates.insert("plural-dog_4".into(), Value::string("many dogs"));

        catalog.add(locale("ar"), templates).await;

        let result = catalog.lookup_with_plural(locale("ar"), "plural-dog", Some(11.0)).await;

        assert_eq!(result.as_deref(), Some("many dogs"));
    }

    #[tokio::test]
    async fn lookup_with_plural_falls_back_to_legacy_plural_suffix() {
        let catalog = Catalog::new();
        let mut templates = Map::new();

        templates.insert("item_plural".into(), Value::string("items"));

        catalog.add(locale("en"), templates).await;

        let result = catalog.lookup_with_plural(locale("en"), "item", Some(3.0)).await;

        assert_eq!(result.as_deref(), Some("items"));
    }

    #[tokio::test]
    async fn lookup_with_plural_falls_back_to_bare_key() {
        let catalog = Catalog::new();
        let mut templates = Map::new();

        templates.insert("hello-john".into(), Value::string("Hello, {{john}}!"));

        catalog.add(locale("en"), templates).await;

        let result = catalog.lookup_with_plural(locale("en"), "hello-john", None).await;

        assert_eq!(result.as_deref(), Some("Hello, {{john}}!"));
    }
}
