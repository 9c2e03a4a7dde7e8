// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Storage collaborators of the point service:
//! - Current balances ([`BalanceStore`], [`InMemoryBalanceStore`])
//! - Transaction history ([`HistoryStore`], [`InMemoryHistoryStore`])
//!
//! Stores do no validation. Invariants such as a non-negative balance are
//! enforced by [`PointService`](crate::PointService) before anything is
//! written.

mod balance;
mod history;

pub use balance::{BalanceStore, InMemoryBalanceStore};
pub use history::{HistoryStore, InMemoryHistoryStore};
