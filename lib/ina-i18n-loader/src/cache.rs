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

//! The bounded, TTL-aware in-memory cache the loader consults before falling back to the remote store.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use ina_i18n::locale::Locale;

/// One cached key's known templates, plus the instant they were last written.
#[derive(Clone, Debug)]
struct Entry {
    /// The templates known for this key, by locale.
    templates: HashMap<Locale, Box<str>>,
    /// When this entry was last written to, used for TTL eviction.
    written_at: Instant,
}

/// A bounded-size, per-entry-TTL cache of `key -> locale -> template`.
///
/// Guarded by a single [`Mutex`]: the hot path (a handful of hash lookups and a `Vec` reorder) is short enough that
/// full mutual exclusion costs less than the bookkeeping a finer-grained scheme would need.
pub struct Cache {
    /// The guarded cache state.
    inner: Mutex<Inner>,
    /// The maximum number of distinct keys retained.
    capacity: NonZeroUsize,
    /// How long an entry remains valid after being written.
    ttl: Duration,
}

/// The [`Cache`]'s mutex-guarded state.
struct Inner {
    /// The cached entries.
    entries: HashMap<Arc<str>, Entry>,
    /// Access order, least-recently-used first.
    order: Vec<Arc<str>>,
}

impl Cache {
    /// The default maximum entry count.
    pub const DEFAULT_CAPACITY: usize = 500;
    /// The default per-entry TTL.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    /// Creates a new, empty cache bounded by `capacity` entries and `ttl` per-entry freshness.
    #[must_use]
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self { inner: Mutex::new(Inner { entries: HashMap::new(), order: Vec::new() }), capacity, ttl }
    }

    /// Returns the templates cached for `key`, filtered to `locales` (all known locales if `locales` is empty).
    ///
    /// Returns an empty map on a miss or an expired entry; an expired entry is evicted as a side effect.
    #[expect(clippy::significant_drop_tightening, reason = "the lock spans the whole lookup/touch/evict sequence")]
    pub fn get(&self, key: &str, locales: &[Locale]) -> HashMap<Locale, Box<str>> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        if inner.entries.get(key).is_some_and(|entry| entry.written_at.elapsed() > self.ttl) {
            inner.entries.remove(key);
            inner.order.retain(|stored| stored.as_ref() != key);
        }

        let Some(entry) = inner.entries.get(key) else { return HashMap::new() };

        let result = if locales.is_empty() {
            entry.templates.clone()
        } else {
            entry.templates.iter().filter(|(locale, _)| locales.contains(locale)).map(|(l, t)| (*l, t.clone())).collect()
        };

        touch(&mut inner.order, key);

        result
    }

    /// Merges `partial` into the entry for `key`, creating it if absent, and resets both its recency and its TTL
    /// clock, then evicts the least-recently-used entry if this write pushed the cache over capacity.
    pub fn set(&self, key: Arc<str>, partial: HashMap<Locale, Box<str>>) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let entry = inner.entries.entry(Arc::clone(&key)).or_insert_with(|| Entry {
            templates: HashMap::new(),
            written_at: Instant::now(),
        });

        entry.templates.extend(partial);
        entry.written_at = Instant::now();

        touch(&mut inner.order, &key);

        if inner.order.len() > self.capacity.get()
            && let Some(evicted) = (!inner.order.is_empty()).then(|| inner.order.remove(0))
        {
            inner.entries.remove(&evicted);
        }
    }
}

/// Moves `key` to the back of `order` (most-recently-used), inserting it if absent.
fn touch(order: &mut Vec<Arc<str>>, key: &str) {
    if let Some(position) = order.iter().position(|stored| stored.as_ref() == key) {
        let stored = order.remove(position);

        order.push(stored);
    } else {
        order.push(Arc::from(key));
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;
    use std::time::Duration;

    use super::Cache;

    fn small_cache() -> Cache {
        Cache::new(NonZeroUsize::new(2).unwrap(), Duration::from_secs(3600))
    }

    #[test]
    fn set_then_get_round_trips() {
        let cache = small_cache();
        let en: ina_i18n::locale::Locale = "en".parse().unwrap();

        cache.set("howdy".into(), [(en, "Howdy".into())].into_iter().collect());

        let result = cache.get("howdy", &[en]);

        assert_eq!(result.get(&en).map(AsRef::as_ref), Some("Howdy"));
    }

    #[test]
    fn set_merges_new_locales() {
        let cache = small_cache();
        let en: ina_i18n::locale::Locale = "en".parse().unwrap();
        let fr: ina_i18n::locale::Locale = "fr".parse().unwrap();

        cache.set("howdy".into(), [(en, "Howdy".into())].into_iter().collect());
        cache.set("howdy".into(), [(fr, "Salut".into())].into_iter().collect());

        let result = cache.get("howdy", &[]);

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn evicts_least_recently_used_over_capacity() {
        let cache = small_cache();
        let en: ina_i18n::locale::Locale = "en".parse().unwrap();

        cache.set("a".into(), [(en, "A".into())].into_iter().collect());
        cache.set("b".into(), [(en, "B".into())].into_iter().collect());
        cache.set("c".into(), [(en, "C".into())].into_iter().collect());

        assert!(cache.get("a", &[]).is_empty());
        assert!(!cache.get("b", &[]).is_empty());
        assert!(!cache.get("c", &[]).is_empty());
    }

    #[test]
    fn expired_entry_is_evicted_on_read() {
        let cache = Cache::new(NonZeroUsize::new(2).unwrap(), Duration::from_millis(1));
        let en: ina_i18n::locale::Locale = "en".parse().unwrap();

        cache.set("howdy".into(), [(en, "Howdy".into())].into_iter().collect());
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get("howdy", &[]).is_empty());
    }
}
