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

//! Append-only transaction history.
//!
//! Entries are numbered by a store-local counter. Numbering and insertion
//! happen under one write lock, so every user's entries are stored in
//! increasing id order.

use crate::base::{HistoryId, UserId};
use crate::point::PointHistory;
use crate::transaction::TransactionType;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Append-only log of transactions per user.
pub trait HistoryStore: Send + Sync {
    /// Stores a new entry under the next id and returns it.
    fn append(
        &self,
        user_id: UserId,
        amount: i64,
        tx_type: TransactionType,
        recorded_at: DateTime<Utc>,
    ) -> PointHistory;

    /// Entries of a user in insertion order. Empty if there are none.
    fn list(&self, user_id: UserId) -> Vec<PointHistory>;
}

#[derive(Debug, Default)]
struct HistoryLog {
    last_id: u64,
    total: usize,
    by_user: HashMap<UserId, Vec<PointHistory>>,
}

/// History store backed by a [`RwLock`]ed per-user index.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    log: RwLock<HistoryLog>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries across all users.
    pub fn len(&self) -> usize {
        self.log.read().total
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(
        &self,
        user_id: UserId,
        amount: i64,
        tx_type: TransactionType,
        recorded_at: DateTime<Utc>,
    ) -> PointHistory {
        let mut log = self.log.write();
        log.last_id += 1;
        let entry = PointHistory {
            id: HistoryId(log.last_id),
            user_id,
            amount,
            tx_type,
            recorded_at,
        };
        log.by_user.entry(user_id).or_default().push(entry);
        log.total += 1;
        entry
    }

    fn list(&self, user_id: UserId) -> Vec<PointHistory> {
        self.log
            .read()
            .by_user
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase_across_users() {
        let store = InMemoryHistoryStore::new();
        let now = Utc::now();
        let a = store.append(UserId(1), 10, TransactionType::Charge, now);
        let b = store.append(UserId(2), 20, TransactionType::Charge, now);
        let c = store.append(UserId(1), 5, TransactionType::Use, now);
        assert_eq!(a.id, HistoryId(1));
        assert_eq!(b.id, HistoryId(2));
        assert_eq!(c.id, HistoryId(3));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn list_filters_by_user_in_insertion_order() {
        let store = InMemoryHistoryStore::new();
        let now = Utc::now();
        store.append(UserId(1), 50, TransactionType::Charge, now);
        store.append(UserId(2), 99, TransactionType::Charge, now);
        store.append(UserId(1), 30, TransactionType::Use, now);

        let entries = store.list(UserId(1));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, 50);
        assert_eq!(entries[0].tx_type, TransactionType::Charge);
        assert_eq!(entries[1].amount, 30);
        assert_eq!(entries[1].tx_type, TransactionType::Use);
    }

    #[test]
    fn list_unknown_user_is_empty() {
        let store = InMemoryHistoryStore::new();
        assert!(store.list(UserId(42)).is_empty());
        assert!(store.is_empty());
    }
}
