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

//! Balance storage keyed by user.

use crate::base::UserId;
use crate::point::UserPoint;
use chrono::Utc;
use dashmap::DashMap;

/// Key-value store of the current balance per user.
pub trait BalanceStore: Send + Sync {
    /// Looks a user up without side effects.
    fn find(&self, user_id: UserId) -> Option<UserPoint>;

    /// Returns the stored record, or a zero balance that is not persisted.
    fn get(&self, user_id: UserId) -> UserPoint {
        self.find(user_id).unwrap_or_else(|| UserPoint::empty(user_id))
    }

    /// Returns the stored record, inserting a zero balance if absent.
    ///
    /// The check and the insert are a single step, so a concurrent
    /// [`upsert`](Self::upsert) is never overwritten by the zero record.
    fn get_or_insert(&self, user_id: UserId) -> UserPoint;

    /// Overwrites the balance and stamps it with the current time.
    fn upsert(&self, user_id: UserId, point: u64) -> UserPoint;

    /// All records, ordered by user id.
    fn snapshot(&self) -> Vec<UserPoint>;
}

/// Balance store backed by a [`DashMap`].
#[derive(Debug, Default)]
pub struct InMemoryBalanceStore {
    points: DashMap<UserId, UserPoint>,
}

impl InMemoryBalanceStore {
    pub fn new() -> Self {
        Self {
            points: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn find(&self, user_id: UserId) -> Option<UserPoint> {
        self.points.get(&user_id).map(|entry| *entry)
    }

    fn get_or_insert(&self, user_id: UserId) -> UserPoint {
        *self
            .points
            .entry(user_id)
            .or_insert_with(|| UserPoint::empty(user_id))
    }

    fn upsert(&self, user_id: UserId, point: u64) -> UserPoint {
        let record = UserPoint {
            id: user_id,
            point,
            updated_at: Utc::now(),
        };
        self.points.insert(user_id, record);
        record
    }

    fn snapshot(&self) -> Vec<UserPoint> {
        let mut points: Vec<UserPoint> = self.points.iter().map(|entry| *entry).collect();
        points.sort_by_key(|point| point.id);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_does_not_persist_missing_user() {
        let store = InMemoryBalanceStore::new();
        let point = store.get(UserId(7));
        assert_eq!(point.id, UserId(7));
        assert_eq!(point.point, 0);
        assert!(store.is_empty());
        assert_eq!(store.find(UserId(7)), None);
    }

    #[test]
    fn get_or_insert_keeps_existing_balance() {
        let store = InMemoryBalanceStore::new();
        store.upsert(UserId(1), 500);
        assert_eq!(store.get_or_insert(UserId(1)).point, 500);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn upsert_overwrites_and_restamps() {
        let store = InMemoryBalanceStore::new();
        let first = store.upsert(UserId(1), 100);
        let second = store.upsert(UserId(1), 40);
        assert_eq!(second.point, 40);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(store.find(UserId(1)), Some(second));
    }

    #[test]
    fn snapshot_is_ordered_by_user() {
        let store = InMemoryBalanceStore::new();
        store.upsert(UserId(3), 30);
        store.upsert(UserId(1), 10);
        store.upsert(UserId(2), 20);
        let ids: Vec<u64> = store.snapshot().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
