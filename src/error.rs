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

//! Error types for point transactions.

use thiserror::Error;

/// Point transaction errors.
///
/// Every variant is raised before anything is persisted, so a failed
/// transaction leaves balance and history untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointError {
    /// Amount is negative
    #[error("invalid amount (must not be negative)")]
    InvalidAmount,

    /// Use would drive the balance below zero
    #[error("insufficient point balance")]
    InsufficientBalance,

    /// Transaction type is neither CHARGE nor USE
    #[error("invalid transaction type: {0:?}")]
    InvalidTransactionType(String),

    /// Charge would exceed the largest representable balance
    #[error("balance overflow")]
    BalanceOverflow,
}
