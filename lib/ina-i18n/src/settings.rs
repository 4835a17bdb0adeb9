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

//! Typed configuration accepted by [`Engine::init`](crate::engine::Engine::init).
//!
//! A plain serde struct with per-field defaults, matching `ina_logging::settings::Settings`. Unlike that struct,
//! this one does not derive `clap::Args` — this crate is a library with no bundled CLI.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::value::Map;

/// Configuration accepted by [`Engine::init`](crate::engine::Engine::init).
#[non_exhaustive]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The engine's initial request locale. Defaults to `en`.
    #[serde(default)]
    pub locale: Option<Locale>,
    /// The engine's default timezone name, consulted by date-like formatters when a placeholder omits its own.
    #[serde(default)]
    pub timezone: Option<Box<str>>,
    /// Templates to seed the catalog with at construction time, keyed by locale.
    #[serde(default)]
    pub translations: HashMap<Locale, Map>,
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;

    #[test]
    fn deserializes_from_minimal_toml() {
        let config: EngineConfig = toml::from_str(r#"locale = "en-GB""#).unwrap();

        assert_eq!(config.locale, Some("en-GB".parse().unwrap()));
        assert!(config.timezone.is_none());
        assert!(config.translations.is_empty());
    }
}
