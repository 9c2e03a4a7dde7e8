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

//! Service configuration.

use std::num::NonZeroU64;

/// Locking applied to the read-only accessors of
/// [`PointService`](crate::PointService).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadConsistency {
    /// Reads skip the mutation lock and may miss a transaction that is
    /// still in flight.
    #[default]
    Relaxed,
    /// Reads take the mutation lock and always see every completed
    /// transaction.
    Linearizable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Granularity of a use. Requested amounts are rounded down to a multiple
    /// of this before being deducted.
    pub use_unit: NonZeroU64,
    pub read_consistency: ReadConsistency,
}

impl ServiceConfig {
    pub const DEFAULT_USE_UNIT: NonZeroU64 = NonZeroU64::new(1000).unwrap();

    pub fn with_use_unit(mut self, use_unit: NonZeroU64) -> Self {
        self.use_unit = use_unit;
        self
    }

    pub fn with_read_consistency(mut self, read_consistency: ReadConsistency) -> Self {
        self.read_consistency = read_consistency;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            use_unit: Self::DEFAULT_USE_UNIT,
            read_consistency: ReadConsistency::Relaxed,
        }
    }
}
