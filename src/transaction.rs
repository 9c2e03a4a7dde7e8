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

//! Transaction kinds.
//!
//! A [`Charge`] credits the full requested amount. A [`Use`] debits the
//! requested amount rounded down to the configured use unit.
//!
//! [`Charge`]: TransactionType::Charge
//! [`Use`]: TransactionType::Use

use crate::PointError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Charge,
    Use,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charge => "CHARGE",
            Self::Use => "USE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = PointError;

    /// Parses `CHARGE` or `USE`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("charge") {
            Ok(Self::Charge)
        } else if trimmed.eq_ignore_ascii_case("use") {
            Ok(Self::Use)
        } else {
            Err(PointError::InvalidTransactionType(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types_case_insensitively() {
        assert_eq!("CHARGE".parse::<TransactionType>(), Ok(TransactionType::Charge));
        assert_eq!("use".parse::<TransactionType>(), Ok(TransactionType::Use));
        assert_eq!(" Use ".parse::<TransactionType>(), Ok(TransactionType::Use));
    }

    #[test]
    fn rejects_unknown_type() {
        assert_eq!(
            "refund".parse::<TransactionType>(),
            Err(PointError::InvalidTransactionType("refund".into()))
        );
        assert_eq!(
            "".parse::<TransactionType>(),
            Err(PointError::InvalidTransactionType(String::new()))
        );
    }

    #[test]
    fn display_matches_serialized_form() {
        assert_eq!(TransactionType::Charge.to_string(), "CHARGE");
        assert_eq!(
            serde_json::to_string(&TransactionType::Use).unwrap(),
            "\"USE\""
        );
    }
}
