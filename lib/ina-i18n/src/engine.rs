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

//! The per-request translation engine: catalog lookup, fallback, plural selection, interpolation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono_tz::Tz;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::format::{FormatContext, FormatterRegistry};
use crate::interpolate::interpolate;
use crate::locale::Locale;
use crate::logger::{Logger, NoopLogger};
use crate::node::{self, TranslationNode};
use crate::settings::EngineConfig;
use crate::value::{Map, Value};
use crate::walker;

/// A capability for fetching templates from outside the in-process catalog.
///
/// `ina-i18n-loader`'s `Loader` implements this so [`Engine`] can remain unaware of the remote store, the LRU
/// cache in front of it, or any transport details — mirroring the [`Logger`] capability split.
#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Fetches templates for `keys` across `locales`, returning whatever was found keyed by locale.
    ///
    /// Implementations must never raise: a failed fetch is logged by the implementation and represented here as
    /// an empty (or partial) result.
    async fn load(&self, locales: &[Locale], keys: &[Arc<str>]) -> HashMap<Locale, Map>;
}

/// Orchestrates catalog lookup, fallback application, plural selection, and interpolation for one request locale.
///
/// Cloning yields an instance with an independent `locale`/`timezone` but a shared catalog (reads only from the
/// clone's perspective) — the per-request state [`crate`]'s design notes describe.
#[derive(Clone)]
pub struct Engine {
    /// The active request locale.
    locale: Locale,
    /// The locale consulted after `locale` (and its base language) produce no hit.
    default_locale: Locale,
    /// The default timezone for date-like placeholders that omit their own.
    timezone: Option<Tz>,
    /// The diagnostic sink for formatter failures and degraded loads.
    logger: Arc<dyn Logger>,
    /// The shared, concurrency-safe template store.
    catalog: Arc<Catalog>,
    /// The shared formatter registry.
    formatters: Arc<FormatterRegistry>,
    /// The optional remote template source, consulted when a walk collects unresolved keys.
    loader: Option<Arc<dyn TranslationSource>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("locale", &self.locale)
            .field("default_locale", &self.default_locale)
            .field("timezone", &self.timezone)
            .field("has_loader", &self.loader.is_some())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Constructs a new engine from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTimezone`] if `config.timezone` doesn't parse as an IANA zone name.
    pub async fn init(config: EngineConfig) -> Result<Self> {
        let timezone = config.timezone.as_deref().map(str::parse::<Tz>).transpose().map_err(|_| {
            Error::UnknownTimezone(config.timezone.clone().unwrap_or_default())
        })?;

        let catalog = Catalog::new();

        for (locale, templates) in config.translations {
            catalog.add(locale, templates).await;
        }

        Ok(Self {
            locale: config.locale.unwrap_or_default(),
            default_locale: Locale::default(),
            timezone,
            logger: Arc::new(NoopLogger),
            catalog: Arc::new(catalog),
            formatters: Arc::new(FormatterRegistry::default()),
            loader: None,
        })
    }

    /// Replaces this engine's logger.
    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.logger = logger;
    }

    /// Replaces this engine's active request locale.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Replaces this engine's default timezone.
    pub fn set_timezone(&mut self, timezone: Option<Tz>) {
        self.timezone = timezone;
    }

    /// Attaches a remote template source, consulted when a walk collects keys absent from the catalog.
    pub fn set_loader(&mut self, loader: Arc<dyn TranslationSource>) {
        self.loader = Some(loader);
    }

    /// Deep-merges `templates` into the catalog for `locale`.
    pub async fn add_translations(&self, locale: Locale, templates: Map) {
        self.catalog.add(locale, templates).await;
    }

    /// Translates every recognized node in `value`, returning a structurally identical value.
    ///
    /// `locale`/`timezone`, if given, override this engine's own for the duration of this call only; the engine
    /// itself (and any other clone of it) is left untouched.
    pub async fn translate(&self, value: &Value, locale: Option<Locale>, timezone: Option<Tz>) -> Value {
        let mut request = self.clone();

        if let Some(locale) = locale {
            request.locale = locale;
        }

        if let Some(timezone) = timezone {
            request.timezone = Some(timezone);
        }

        let (mut skeleton, pending, keys) = walker::walk(value);

        if !pending.is_empty()
            && let Some(loader) = request.loader.clone()
        {
            let locales = request.consulted_locales();
            let fetched = loader.load(&locales, &keys).await;

            for (locale, templates) in fetched {
                request.catalog.add(locale, templates).await;
            }
        }

        for item in &pending {
            let resolved = request.resolve_translation(&item.original, &item.node).await;

            walker::splice(&mut skeleton, &item.path, resolved);
        }

        skeleton
    }

    /// Returns the locales consulted in order for a lookup: the request locale, its base language, the default
    /// locale, and the default locale's base language — deduplicated, upward-only (no sideways region fallback).
    fn consulted_locales(&self) -> Vec<Locale> {
        let candidates =
            [self.locale, self.locale.base_language(), self.default_locale, self.default_locale.base_language()];

        let mut locales = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if !locales.contains(&candidate) {
                locales.push(candidate);
            }
        }

        locales
    }

    /// Looks up `key` (plural-aware when `quantity` is given) across the consulted locale list, first hit wins.
    async fn lookup(&self, locales: &[Locale], key: &str, quantity: Option<f64>) -> Option<Arc<str>> {
        for locale in locales {
            if let Some(template) = self.catalog.lookup_with_plural(*locale, key, quantity).await {
                return Some(template);
            }
        }

        None
    }

    /// Resolves one parsed translation node per the engine's `Translate(node)` algorithm.
    async fn resolve_translation(&self, original: &Value, node: &TranslationNode) -> Value {
        let mut placeholders = node.placeholders.clone();

        if let Some(quantity) = node.quantity {
            placeholders.insert("count".into(), Value::Number(quantity));
        }

        let locales = self.consulted_locales();

        let template = match self.lookup(&locales, &node.key, node.quantity).await {
            Some(template) => template,
            None => match &node.fallback {
                Some(fallback) => Arc::clone(fallback),
                None => return Value::string(node.key.to_string()),
            },
        };

        let ctx = FormatContext { locale: self.locale, timezone: self.timezone };
        let resolved_references = self.resolve_references(&template, &locales).await;
        let mut resolve_reference = |key: &str| resolved_references.get(key).cloned();

        match interpolate(&template, &placeholders, &ctx, &self.formatters, &mut resolve_reference) {
            Ok(rendered) => Value::string(rendered),
            Err(error) => {
                self.logger.error(&error.to_string()).await;

                node::with_error(original, error.to_string())
            }
        }
    }

    /// Pre-resolves every `$t(other-key)` reference in `template` into its own interpolated text.
    ///
    /// `interpolate`'s reference callback is synchronous, but a reference lookup needs an async catalog read; this
    /// prefetch step bridges the two without making the catalog (or `interpolate`) async.
    async fn resolve_references(&self, template: &str, locales: &[Locale]) -> HashMap<String, String> {
        let mut resolved = HashMap::new();

        for key in scan_reference_keys(template) {
            let Some(referenced_template) = self.lookup(locales, &key, None).await else { continue };

            let ctx = FormatContext { locale: self.locale, timezone: self.timezone };
            let placeholders = Map::new();
            let mut no_nested_references = |_: &str| None;

            let rendered = interpolate(&referenced_template, &placeholders, &ctx, &self.formatters, &mut no_nested_references)
                .unwrap_or_else(|_| key.clone());

            resolved.insert(key, rendered);
        }

        resolved
    }
}

/// Scans `template` for `$t(other-key)` markers, returning the referenced keys in order of appearance.
///
/// Duplicates the scanning half of `interpolate::substitute_references`'s logic; that function's own scan is
/// private and tightly coupled to synchronous substitution, so it isn't reusable here as-is.
fn scan_reference_keys(template: &str) -> Vec<String> {
    const PREFIX: &str = "$t(";

    let mut keys = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(PREFIX) {
        let after_prefix = &rest[start + PREFIX.len()..];

        let Some(end) = after_prefix.find(')') else { break };

        keys.push(after_prefix[..end].to_owned());
        rest = &after_prefix[end + 1..];
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::node::build_translate_node;
    use crate::settings::EngineConfig;
    use crate::value::{Map, Value};

    async fn engine_with(locale: &str, templates: &[(&str, &str)]) -> Engine {
        let mut translations = Map::new();

        for (key, template) in templates {
            translations.insert((*key).into(), Value::string(*template));
        }

        let mut config = EngineConfig { locale: Some(locale.parse().unwrap()), ..EngineConfig::default() };

        config.translations.insert(locale.parse().unwrap(), translations);

        Engine::init(config).await.unwrap()
    }

    #[tokio::test]
    async fn simple_lookup() {
        let engine = engine_with("en", &[("howdy", "Howdy")]).await;
        let node = build_translate_node("howdy", None, None);

        assert_eq!(engine.translate(&node, None, None).await, Value::string("Howdy"));
    }

    #[tokio::test]
    async fn placeholder_and_fallback() {
        let engine = engine_with("en", &[]).await;

        let mut placeholders = Map::new();

        placeholders.insert("john".into(), Value::string("John"));

        let mut inner = Map::new();

        inner.insert("key".into(), Value::string("good-bye-john"));
        inner.insert("placeholders".into(), Value::Map(placeholders));
        inner.insert("fallback".into(), Value::string("Good bye {{john}}"));

        let mut outer = Map::new();

        outer.insert("@translate".into(), Value::Map(inner));

        assert_eq!(engine.translate(&Value::Map(outer), None, None).await, Value::string("Good bye John"));
    }

    #[tokio::test]
    async fn plural_resolves_arabic_few_category() {
        let engine = engine_with("ar", &[("plural-dog_3", "few dogs")]).await;

        let mut inner = Map::new();

        inner.insert("key".into(), Value::string("plural-dog"));
        inner.insert("quantity".into(), Value::Number(3.0));

        let mut outer = Map::new();

        outer.insert("@translate".into(), Value::Map(inner));

        assert_eq!(engine.translate(&Value::Map(outer), None, None).await, Value::string("few dogs"));
    }

    #[tokio::test]
    async fn nested_structure_is_preserved() {
        let engine = engine_with("en", &[("howdy", "Howdy")]).await;

        let mut object = Map::new();

        object.insert("object".into(), build_translate_node("howdy", None, None));

        let mut outer = Map::new();

        outer.insert("nested".into(), Value::Map(object));

        let result = engine.translate(&Value::Map(outer), None, None).await;

        let Value::Map(outer) = result else { unreachable!() };
        let Some(Value::Map(nested)) = outer.get("nested") else { unreachable!() };

        assert_eq!(nested.get("object"), Some(&Value::string("Howdy")));
    }

    #[tokio::test]
    async fn missing_key_without_fallback_returns_raw_key() {
        let engine = engine_with("en", &[]).await;
        let node = build_translate_node("hello-john", None, None);

        assert_eq!(engine.translate(&node, None, None).await, Value::string("hello-john"));
    }

    #[tokio::test]
    async fn currency_without_code_attaches_error_marker() {
        let engine = engine_with("en", &[]).await;

        let mut currency_payload = Map::new();

        currency_payload.insert("value".into(), Value::Number(12.34));
        currency_payload.insert("currency".into(), Value::Null);

        let mut placeholders = Map::new();

        placeholders.insert("a".into(), Value::Map(currency_payload));

        let mut inner = Map::new();

        inner.insert("key".into(), Value::string("p"));
        inner.insert("fallback".into(), Value::string("{{a, currency}}"));
        inner.insert("placeholders".into(), Value::Map(placeholders));

        let mut outer = Map::new();

        outer.insert("@translate".into(), Value::Map(inner));

        let result = engine.translate(&Value::Map(outer), None, None).await;

        let Value::Map(result) = result else { unreachable!() };
        let Some(Value::String(message)) = result.get("error") else { unreachable!("expected an error marker") };

        assert!(message.contains("Currency code is required"));
    }
}
