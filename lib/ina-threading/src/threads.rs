// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright © 2024 Jaxydog
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

/// Defines consumer threads.
pub mod consumer;
/// Defines exchanger threads.
pub mod exchanger;
/// Defines invoker threads.
pub mod invoker;
/// Defines producer threads.
pub mod producer;

pub use self::consumer::*;
pub use self::exchanger::*;
pub use self::invoker::*;
pub use self::producer::*;
