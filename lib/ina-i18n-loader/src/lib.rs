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

//! Batched, cached remote template loading for `ina-i18n`.
//!
//! [`Loader`] implements [`ina_i18n::engine::TranslationSource`]: a cache-first lookup across the requested locales,
//! falling back to a single batched [`RemoteStore`] request for whatever the cache didn't already know.

#![cfg_attr(test, allow(clippy::unwrap_used, reason = "test assertions favor unwrap over propagating a Result"))]

mod cache;
/// The remote key/value store capability consulted on a cache miss.
pub mod remote;

use std::collections::HashMap;
use std::num::{NonZeroU64, NonZeroUsize};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ina_i18n::engine::TranslationSource;
use ina_i18n::locale::Locale;
use ina_i18n::logger::{Logger, NoopLogger};
use ina_i18n::value::{Map, Value};
use serde::{Deserialize, Serialize};

pub use self::cache::Cache;
pub use self::remote::{InMemoryRemoteStore, RemoteError, RemoteStore};

/// This crate's specialized [`std::result::Result`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error produced while constructing or operating a [`Loader`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// [`LoaderConfig::url`] was present but empty.
    #[error("loader URL must not be empty")]
    EmptyUrl,
}

/// The cache sizing knobs accepted by [`LoaderConfig`].
#[non_exhaustive]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// The maximum number of distinct keys the cache retains.
    #[serde(default = "CacheConfig::default_max")]
    pub max: NonZeroUsize,
    /// How long, in seconds, a cached entry remains valid after being written.
    #[serde(default = "CacheConfig::default_max_age_secs")]
    pub max_age_secs: NonZeroU64,
}

impl CacheConfig {
    /// The default maximum entry count.
    fn default_max() -> NonZeroUsize {
        NonZeroUsize::new(Cache::DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN)
    }

    /// The default per-entry TTL, in seconds.
    fn default_max_age_secs() -> NonZeroU64 {
        NonZeroU64::new(Cache::DEFAULT_TTL.as_secs()).unwrap_or(NonZeroU64::MIN)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max: Self::default_max(), max_age_secs: Self::default_max_age_secs() }
    }
}

/// Typed configuration accepted by [`Loader::init`].
#[non_exhaustive]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// The remote store's connection string.
    ///
    /// Left as an opaque string: this crate doesn't dial anything itself, it just refuses an explicitly-empty
    /// value and leaves connection details up to whatever [`RemoteStore`] the caller wires in.
    #[serde(default)]
    pub url: Option<Box<str>>,
    /// The cache sizing knobs.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Batches and caches lookups against a [`RemoteStore`].
pub struct Loader {
    /// The remote store consulted on a cache miss, if configured.
    remote: Option<Arc<dyn RemoteStore>>,
    /// The cache consulted before the remote store.
    cache: Cache,
    /// The diagnostic sink for degraded (remote-failure) loads.
    logger: Arc<dyn Logger>,
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader").field("has_remote", &self.remote.is_some()).finish_non_exhaustive()
    }
}

impl Loader {
    /// Builds a loader from `config`, wiring in `remote` as the backing store and `logger` for degraded-load
    /// diagnostics.
    ///
    /// `remote` is `None` when `config.url` is `None`; an explicitly empty URL is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyUrl`] if `config.url` is `Some("")`.
    pub fn init(config: LoaderConfig, remote: Option<Arc<dyn RemoteStore>>, logger: Arc<dyn Logger>) -> Result<Self> {
        if config.url.as_deref() == Some("") {
            return Err(Error::EmptyUrl);
        }

        let cache = Cache::new(config.cache.max, Duration::from_secs(config.cache.max_age_secs.get()));

        Ok(Self { remote, cache, logger })
    }

    /// Builds a loader with no remote store, caching only what [`Loader::load`] is told about via prior calls.
    #[must_use]
    pub fn offline(logger: Arc<dyn Logger>) -> Self {
        Self { remote: None, cache: Cache::new(NonZeroUsize::new(Cache::DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN), Cache::DEFAULT_TTL), logger }
    }

    /// Releases the configured remote store's connection, if one is configured.
    ///
    /// A passthrough to [`RemoteStore::disconnect`]; a no-op for an offline loader.
    pub async fn disconnect(&self) {
        if let Some(remote) = &self.remote {
            remote.disconnect().await;
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::offline(Arc::new(NoopLogger))
    }
}

#[async_trait]
impl TranslationSource for Loader {
    async fn load(&self, locales: &[Locale], keys: &[Arc<str>]) -> HashMap<Locale, Map> {
        let mut found: HashMap<Arc<str>, HashMap<Locale, Box<str>>> = HashMap::new();
        let mut unresolved = Vec::new();

        for key in keys {
            let cached = self.cache.get(key, locales);

            if cached.len() == locales.len() {
                found.insert(Arc::clone(key), cached);
            } else {
                unresolved.push(Arc::clone(key));
            }
        }

        if !unresolved.is_empty()
            && let Some(remote) = &self.remote
        {
            match remote.hash_fields_get(&unresolved, locales).await {
                Ok(rows) => {
                    for (key, row) in unresolved.iter().zip(rows) {
                        let templates: HashMap<Locale, Box<str>> =
                            locales.iter().copied().zip(row).filter_map(|(locale, value)| value.map(|value| (locale, value))).collect();

                        if !templates.is_empty() {
                            self.cache.set(Arc::clone(key), templates.clone());
                        }

                        found.entry(Arc::clone(key)).or_default().extend(templates);
                    }
                }
                Err(error) => {
                    self.logger.warn(&format!("falling back to cache-only results: {error}")).await;
                }
            }
        }

        let mut by_locale: HashMap<Locale, Map> = HashMap::new();

        for (key, templates) in found {
            for (locale, template) in templates {
                insert_dotted(by_locale.entry(locale).or_default(), &key, Value::string(template));
            }
        }

        by_locale
    }
}

/// Inserts `value` into `map` under `dotted_key`, splitting on `.` and building intermediate nested maps as needed.
///
/// Mirrors how [`ina_i18n::catalog::Catalog`] traverses dotted paths: a key like `"hello.world"` must land as
/// `{"hello": {"world": value}}`, not as a single literal-dotted-string key, or catalog lookups won't find it.
fn insert_dotted(map: &mut Map, dotted_key: &str, value: Value) {
    let mut segments = dotted_key.split('.');

    let Some(first) = segments.next() else { return };

    let mut cursor = map.entry(Arc::from(first)).or_insert_with(Value::map);

    for segment in segments {
        if !matches!(cursor, Value::Map(_)) {
            *cursor = Value::map();
        }

        let Value::Map(nested) = cursor else { unreachable!("just normalized to a map above") };

        cursor = nested.entry(Arc::from(segment)).or_insert_with(Value::map);
    }

    *cursor = value;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ina_i18n::engine::TranslationSource;
    use ina_i18n::logger::NoopLogger;

    use ina_i18n::value::Map;

    use super::{InMemoryRemoteStore, Loader, LoaderConfig, insert_dotted};

    #[tokio::test]
    async fn loads_from_remote_and_caches() {
        let store = Arc::new(InMemoryRemoteStore::new());
        let en: ina_i18n::locale::Locale = "en".parse().unwrap();

        store.insert("howdy", en, "Howdy").await;

        let loader = Loader::init(LoaderConfig::default(), Some(store as Arc<dyn super::RemoteStore>), Arc::new(NoopLogger)).unwrap();

        let keys = vec![Arc::from("howdy")];
        let locales = vec![en];

        let first = loader.load(&locales, &keys).await;
        assert_eq!(first.get(&en).and_then(|map| map.get("howdy")).and_then(|value| value.as_str()), Some("Howdy"));

        let second = loader.load(&locales, &keys).await;
        assert_eq!(second.get(&en).and_then(|map| map.get("howdy")).and_then(|value| value.as_str()), Some("Howdy"));
    }

    #[tokio::test]
    async fn offline_loader_returns_empty() {
        let loader = Loader::offline(Arc::new(NoopLogger));
        let keys = vec![Arc::from("howdy")];
        let locales: Vec<ina_i18n::locale::Locale> = vec!["en".parse().unwrap()];

        let result = loader.load(&locales, &keys).await;

        assert!(result.is_empty());
    }

    #[test]
    fn insert_dotted_builds_nested_maps() {
        let mut map = Map::new();

        insert_dotted(&mut map, "hello.world", ina_i18n::value::Value::string("hi"));

        let nested = map.get("hello").and_then(ina_i18n::value::Value::as_map).unwrap();

        assert_eq!(nested.get("world").and_then(ina_i18n::value::Value::as_str), Some("hi"));
    }

    #[tokio::test]
    async fn disconnect_forwards_to_the_configured_remote() {
        let store = Arc::new(InMemoryRemoteStore::new());
        let loader =
            Loader::init(LoaderConfig::default(), Some(store as Arc<dyn super::RemoteStore>), Arc::new(NoopLogger)).unwrap();

        loader.disconnect().await;
    }

    #[tokio::test]
    async fn disconnect_on_an_offline_loader_is_a_no_op() {
        let loader = Loader::offline(Arc::new(NoopLogger));

        loader.disconnect().await;
    }

    #[test]
    fn empty_url_is_rejected() {
        let config = LoaderConfig { url: Some("".into()), ..LoaderConfig::default() };

        assert!(Loader::init(config, None, Arc::new(NoopLogger)).is_err());
    }
}
