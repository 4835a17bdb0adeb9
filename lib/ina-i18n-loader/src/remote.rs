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

//! The remote key/value store capability consulted on a cache miss.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ina_i18n::locale::Locale;
use tokio::sync::RwLock;

/// An error raised by a [`RemoteStore`] implementation.
#[derive(Clone, Debug, thiserror::Error)]
#[error("remote store error: {0}")]
pub struct RemoteError(pub Box<str>);

/// The per-key hash lookup the loader issues against an external template store.
///
/// One call fetches several keys at once, each aligned against the same ordered field (locale) list — this is the
/// "one batched request" the loader issues per `Load`, never a request per key.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches `fields` (locale tags) for each of `keys`, in order.
    ///
    /// The outer [`Vec`] aligns with `keys`; each inner [`Vec`] aligns with `fields`. A `None` entry means that
    /// field has no value for that key, not that the lookup failed.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the batch request itself could not be completed (e.g. a transport failure);
    /// partial data for individual fields is represented with `None`, not an error.
    async fn hash_fields_get(
        &self,
        keys: &[Arc<str>],
        fields: &[Locale],
    ) -> Result<Vec<Vec<Option<Box<str>>>>, RemoteError>;

    /// Releases any connection or resource this store holds.
    ///
    /// The default implementation is a no-op, for stores (like [`InMemoryRemoteStore`]) that own nothing to
    /// release.
    async fn disconnect(&self) {}
}

/// An in-memory [`RemoteStore`], useful for tests and for embedding a static translation bundle.
#[derive(Debug, Default)]
pub struct InMemoryRemoteStore {
    /// The backing data: `key -> locale -> template`.
    data: RwLock<HashMap<Arc<str>, HashMap<Locale, Box<str>>>>,
}

impl InMemoryRemoteStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or overwrites) the template for `key` under `locale`.
    pub async fn insert(&self, key: impl Into<Arc<str>>, locale: Locale, template: impl Into<Box<str>>) {
        let mut data = self.data.write().await;

        data.entry(key.into()).or_default().insert(locale, template.into());
    }
}

#[async_trait]
impl RemoteStore for InMemoryRemoteStore {
    async fn hash_fields_get(
        &self,
        keys: &[Arc<str>],
        fields: &[Locale],
    ) -> Result<Vec<Vec<Option<Box<str>>>>, RemoteError> {
        let data = self.data.read().await;

        Ok(keys
            .iter()
            .map(|key| {
                let row = data.get(key);

                fields.iter().map(|locale| row.and_then(|row| row.get(locale)).map(|template| template.clone())).collect()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRemoteStore, RemoteStore};

    #[tokio::test]
    async fn returns_none_for_unknown_fields() {
        let store = InMemoryRemoteStore::new();

        store.insert("howdy", "en".parse().unwrap(), "Howdy").await;

        let keys = vec!["howdy".into(), "missing".into()];
        let fields = vec!["en".parse().unwrap(), "fr".parse().unwrap()];

        let rows = store.hash_fields_get(&keys, &fields).await.unwrap();

        assert_eq!(rows[0][0].as_deref(), Some("Howdy"));
        assert_eq!(rows[0][1], None);
        assert_eq!(rows[1][0], None);
        assert_eq!(rows[1][1], None);
    }

    #[tokio::test]
    async fn disconnect_default_is_a_callable_no_op() {
        let store = InMemoryRemoteStore::new();

        store.disconnect().await;
    }
}
