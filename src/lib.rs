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

//! # Point Ledger
//!
//! This library keeps a point balance per user and applies charge and use
//! transactions to it, recording every accepted request in an append-only
//! history.
//!
//! ## Core Components
//!
//! - [`PointService`]: Validates and applies transactions under one lock
//! - [`BalanceStore`]: Current balance per user ([`InMemoryBalanceStore`])
//! - [`HistoryStore`]: Append-only transaction log ([`InMemoryHistoryStore`])
//! - [`TransactionType`]: Charge or use
//! - [`PointError`]: Error types for rejected transactions
//!
//! ## Example
//!
//! ```
//! use point_ledger::{PointService, TransactionType, UserId};
//!
//! let service = PointService::new();
//!
//! service.apply_transaction(UserId(1), 21_234, TransactionType::Charge).unwrap();
//!
//! // Uses are rounded down to whole thousands.
//! let point = service.apply_transaction(UserId(1), 1_234, TransactionType::Use).unwrap();
//! assert_eq!(point.point, 20_234);
//!
//! // History keeps the requested amount.
//! let history = service.get_history(UserId(1));
//! assert_eq!(history[1].amount, 1_234);
//! ```
//!
//! ## Thread Safety
//!
//! The service is `Sync` and can be shared through an `Arc`. Transactions are
//! serialized by a single lock, so concurrent uses against one balance can
//! never overdraw it.

mod base;
pub mod config;
pub mod error;
mod point;
mod service;
pub mod store;
mod transaction;

pub use base::{HistoryId, UserId};
pub use config::{ReadConsistency, ServiceConfig};
pub use error::PointError;
pub use point::{PointHistory, UserPoint};
pub use service::{PointService, TransactionStats};
pub use store::{BalanceStore, HistoryStore, InMemoryBalanceStore, InMemoryHistoryStore};
pub use transaction::TransactionType;
