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

//! The crate's error taxonomy.
//!
//! Only construction-time faults raise here. Missing-key, formatter-failure, and remote-load-failure outcomes are
//! represented in-band (a returned [`Value`](crate::value::Value) or a logged message), never as [`Error`], per the
//! "never raise" requirement on translation itself.

/// A result with this crate's [`Error`] as its default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error returned while constructing or configuring an [`Engine`](crate::engine::Engine).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration field held a locale tag that didn't parse.
    #[error(transparent)]
    Locale(#[from] crate::locale::LocaleError),
    /// A configuration field held a timezone name that isn't a recognized IANA zone.
    #[error("unrecognized timezone: {0:?}")]
    UnknownTimezone(Box<str>),
    /// A TOML deserialization error, surfaced when loading a config from a file.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
