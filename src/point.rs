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

//! Balance and history records.
//!
//! # Example
//!
//! ```
//! use point_ledger::{UserId, UserPoint};
//!
//! let point = UserPoint::empty(UserId(1));
//! assert_eq!(point.point, 0);
//! ```

use crate::base::{HistoryId, UserId};
use crate::transaction::TransactionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current point balance of a user.
///
/// The balance is unsigned, so it can never go below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPoint {
    pub id: UserId,
    pub point: u64,
    pub updated_at: DateTime<Utc>,
}

impl UserPoint {
    /// Zero balance stamped with the current time.
    pub fn empty(id: UserId) -> Self {
        Self {
            id,
            point: 0,
            updated_at: Utc::now(),
        }
    }
}

/// Immutable record of a requested transaction.
///
/// `amount` is what the caller asked for, not what was applied: a use of 1234
/// with a unit of 1000 records 1234 and deducts 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointHistory {
    pub id: HistoryId,
    pub user_id: UserId,
    pub amount: i64,
    pub tx_type: TransactionType,
    pub recorded_at: DateTime<Utc>,
}
