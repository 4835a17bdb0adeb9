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

//! An object-embedded internationalization engine for 1N4.
//!
//! Accepts an arbitrary structured [`Value`], finds every `@translate` node inside it, and returns a structurally
//! identical value with each node resolved to a locale-specific string. See [`engine::Engine`] for the entry point.

#![cfg_attr(test, allow(clippy::unwrap_used, reason = "test assertions favor unwrap over propagating a Result"))]

mod ascii;
/// Recognizes the canonical `@translate` node shape.
pub mod node;
/// Defines the tagged value variant the tree walker traverses.
pub mod value;
/// Deep-traverses a [`value::Value`] tree, collecting translation nodes without resolving them.
pub mod walker;

/// Defines regional linguistic locales.
pub mod locale;
/// Resolves plural categories for `(locale, count)` pairs via CLDR plural rules.
pub mod plural;

/// The in-memory template store.
pub mod catalog;
/// Substitutes `{{name}}`, `{{name, format}}`, and `$t(key)` markers within a template string.
pub mod interpolate;

/// Renders typed placeholder values under a target locale and optional timezone.
pub mod format;

/// The `Logger` capability accepted by [`engine::Engine`] and `ina-i18n-loader`'s loader.
pub mod logger;

/// The per-request translation engine.
pub mod engine;
/// Typed configuration accepted by [`engine::Engine::init`].
pub mod settings;

/// This crate's error taxonomy.
pub mod error;

pub use self::engine::Engine;
pub use self::error::{Error, Result};
pub use self::locale::Locale;
pub use self::node::build_translate_node;
pub use self::settings::EngineConfig;
pub use self::value::Value;
