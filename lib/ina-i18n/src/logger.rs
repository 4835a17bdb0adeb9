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

//! The `Logger` capability accepted by [`crate::engine::Engine`] and `ina-i18n-loader`'s loader.
//!
//! Neither crate owns a concrete log sink; callers hand in whatever implements [`Logger`]. The `ina-logging`
//! feature provides [`InaLoggingAdapter`] for callers already running that crate's background thread.

use async_trait::async_trait;

/// A sink for the diagnostic messages this crate emits on non-raising failure paths (missing keys never log;
/// formatter failures and remote load failures do).
#[async_trait]
pub trait Logger: Send + Sync {
    /// Records a debug-level message.
    async fn debug(&self, message: &str);

    /// Records a warning, e.g. a degraded remote load.
    async fn warn(&self, message: &str);

    /// Records an error, e.g. a formatter failure.
    async fn error(&self, message: &str);
}

/// A [`Logger`] that discards every message.
///
/// The default for callers that don't care, and for tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

#[async_trait]
impl Logger for NoopLogger {
    async fn debug(&self, _message: &str) {}

    async fn warn(&self, _message: &str) {}

    async fn error(&self, _message: &str) {}
}

/// Implements [`Logger`] in terms of `ina-logging`'s background thread.
///
/// Requires that the caller has already started the thread via [`ina_logging::thread::start`] (or
/// [`ina_logging::thread::blocking_start`]); messages sent before that call are silently dropped, matching that
/// thread's own panic-free `Result`-returning API.
#[cfg(feature = "ina-logging")]
#[derive(Clone, Copy, Debug, Default)]
pub struct InaLoggingAdapter;

#[cfg(feature = "ina-logging")]
#[async_trait]
impl Logger for InaLoggingAdapter {
    async fn debug(&self, message: &str) {
        #[cfg(debug_assertions)]
        let _ = ina_logging::thread::entry(ina_logging::entry::Level::DEBUG, message.to_owned()).await;
        #[cfg(not(debug_assertions))]
        let _ = message;
    }

    async fn warn(&self, message: &str) {
        let _ = ina_logging::thread::entry(ina_logging::entry::Level::WARN, message.to_owned()).await;
    }

    async fn error(&self, message: &str) {
        let _ = ina_logging::thread::entry(ina_logging::entry::Level::ERROR, message.to_owned()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::{Logger, NoopLogger};

    #[tokio::test]
    async fn noop_logger_accepts_every_call() {
        let logger = NoopLogger;

        logger.debug("debug").await;
        logger.warn("warn").await;
        logger.error("error").await;
    }
}
