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

//! Point service.
//!
//! The [`PointService`] is the only component that changes balances. It reads
//! the current balance, validates the request, writes the new balance and
//! appends a history entry, all while holding one service-wide lock.
//!
//! # Transaction Processing
//!
//! - **Charge**: credits the full requested amount.
//! - **Use**: debits the requested amount rounded down to a multiple of the
//!   use unit (1000 by default). A use below one unit deducts nothing but is
//!   still recorded.
//!
//! # Thread Safety
//!
//! Mutations are serialized globally, not per user: at most one transaction is
//! in flight at any time. Reads only take the lock when configured with
//! [`ReadConsistency::Linearizable`].

use crate::base::UserId;
use crate::config::{ReadConsistency, ServiceConfig};
use crate::point::{PointHistory, UserPoint};
use crate::store::{BalanceStore, HistoryStore, InMemoryBalanceStore, InMemoryHistoryStore};
use crate::{PointError, TransactionType};
use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, trace};

/// Outcome counters, updated inside the mutation critical section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionStats {
    pub applied: u64,
    pub rejected: u64,
}

/// Orchestrates balance and history updates.
///
/// # Invariants
///
/// - A balance never goes below zero.
/// - A failed transaction writes neither balance nor history. The only side
///   effect it can have is the lazy creation of a zero balance.
/// - History stores the requested amount, not the deducted one.
pub struct PointService<B = InMemoryBalanceStore, H = InMemoryHistoryStore> {
    balances: B,
    history: H,
    config: ServiceConfig,
    /// Held for the full read-validate-write-append sequence.
    mutations: Mutex<TransactionStats>,
}

impl PointService {
    /// Creates a service over empty in-memory stores with default settings.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        Self::with_stores(
            InMemoryBalanceStore::new(),
            InMemoryHistoryStore::new(),
            config,
        )
    }
}

impl Default for PointService {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BalanceStore, H: HistoryStore> PointService<B, H> {
    pub fn with_stores(balances: B, history: H, config: ServiceConfig) -> Self {
        PointService {
            balances,
            history,
            config,
            mutations: Mutex::new(TransactionStats::default()),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn balance_store(&self) -> &B {
        &self.balances
    }

    pub fn history_store(&self) -> &H {
        &self.history
    }

    /// Returns the balance of a user, creating a zero balance if the user is
    /// unknown.
    ///
    /// This is a get-or-create: the first call for a user persists a record.
    /// Repeated calls return the same record.
    pub fn get_balance(&self, user_id: UserId) -> UserPoint {
        match self.config.read_consistency {
            ReadConsistency::Relaxed => self.load_or_create(user_id),
            ReadConsistency::Linearizable => {
                let _guard = self.mutations.lock();
                self.load_or_create(user_id)
            }
        }
    }

    /// Returns the history of a user in the order it was recorded.
    ///
    /// Creates a zero balance for unknown users, like [`get_balance`](Self::get_balance).
    pub fn get_history(&self, user_id: UserId) -> Vec<PointHistory> {
        match self.config.read_consistency {
            ReadConsistency::Relaxed => {
                let point = self.load_or_create(user_id);
                self.history.list(point.id)
            }
            ReadConsistency::Linearizable => {
                let _guard = self.mutations.lock();
                let point = self.load_or_create(user_id);
                self.history.list(point.id)
            }
        }
    }

    /// All known balances, ordered by user id.
    pub fn balances(&self) -> Vec<UserPoint> {
        match self.config.read_consistency {
            ReadConsistency::Relaxed => self.balances.snapshot(),
            ReadConsistency::Linearizable => {
                let _guard = self.mutations.lock();
                self.balances.snapshot()
            }
        }
    }

    pub fn stats(&self) -> TransactionStats {
        *self.mutations.lock()
    }

    /// Applies a charge or use and returns the updated balance.
    ///
    /// # Errors
    ///
    /// - [`PointError::InvalidAmount`] - `amount` is negative.
    /// - [`PointError::InsufficientBalance`] - the rounded use exceeds the balance.
    /// - [`PointError::BalanceOverflow`] - the charge does not fit in the balance.
    pub fn apply_transaction(
        &self,
        user_id: UserId,
        amount: i64,
        tx_type: TransactionType,
    ) -> Result<UserPoint, PointError> {
        self.apply_with(user_id, amount, || Ok(tx_type))
    }

    /// Like [`apply_transaction`](Self::apply_transaction), for a type that
    /// has not been parsed yet.
    ///
    /// The amount is checked before the type, so a negative amount reports
    /// [`PointError::InvalidAmount`] even when the type is also invalid.
    ///
    /// # Errors
    ///
    /// Everything [`apply_transaction`](Self::apply_transaction) returns, plus
    /// [`PointError::InvalidTransactionType`] when `tx_type` is neither
    /// `CHARGE` nor `USE`.
    pub fn apply_raw(
        &self,
        user_id: UserId,
        amount: i64,
        tx_type: &str,
    ) -> Result<UserPoint, PointError> {
        self.apply_with(user_id, amount, || tx_type.parse())
    }

    pub fn charge(&self, user_id: UserId, amount: i64) -> Result<UserPoint, PointError> {
        self.apply_transaction(user_id, amount, TransactionType::Charge)
    }

    pub fn use_points(&self, user_id: UserId, amount: i64) -> Result<UserPoint, PointError> {
        self.apply_transaction(user_id, amount, TransactionType::Use)
    }

    fn apply_with<F>(
        &self,
        user_id: UserId,
        amount: i64,
        resolve_type: F,
    ) -> Result<UserPoint, PointError>
    where
        F: FnOnce() -> Result<TransactionType, PointError>,
    {
        let mut stats = self.mutations.lock();

        let current = self.load_or_create(user_id);
        let (tx_type, point) = match self.next_balance(current.point, amount, resolve_type) {
            Ok(next) => next,
            Err(e) => {
                stats.rejected += 1;
                debug!(user = %user_id, amount, error = %e, "transaction rejected");
                return Err(e);
            }
        };

        self.balances.upsert(user_id, point);
        let entry = self.history.append(user_id, amount, tx_type, Utc::now());
        stats.applied += 1;
        debug!(
            user = %user_id,
            history = %entry.id,
            %tx_type,
            amount,
            from = current.point,
            to = point,
            "transaction applied"
        );

        Ok(self.balances.get(user_id))
    }

    /// Validates a request against the current balance and computes the new one.
    fn next_balance<F>(
        &self,
        current: u64,
        amount: i64,
        resolve_type: F,
    ) -> Result<(TransactionType, u64), PointError>
    where
        F: FnOnce() -> Result<TransactionType, PointError>,
    {
        if amount < 0 {
            return Err(PointError::InvalidAmount);
        }
        let amount = amount.unsigned_abs();

        match resolve_type()? {
            TransactionType::Charge => current
                .checked_add(amount)
                .map(|point| (TransactionType::Charge, point))
                .ok_or(PointError::BalanceOverflow),
            TransactionType::Use => {
                let unit = self.config.use_unit.get();
                let usable = amount / unit * unit;
                current
                    .checked_sub(usable)
                    .map(|point| (TransactionType::Use, point))
                    .ok_or(PointError::InsufficientBalance)
            }
        }
    }

    fn load_or_create(&self, user_id: UserId) -> UserPoint {
        if let Some(point) = self.balances.find(user_id) {
            return point;
        }
        trace!(user = %user_id, "creating empty balance");
        self.balances.get_or_insert(user_id)
    }
}
