//! Account classification and identity types.

use serde::{Deserialize, Serialize};

/// Account category determining classification and normal side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    /// Asset accounts (debit-normal, balance sheet).
    Asset,
    /// Liability accounts (credit-normal, balance sheet).
    Liability,
    /// Equity accounts (credit-normal, balance sheet).
    Equity,
    /// Revenue accounts (credit-normal, result).
    Revenue,
    /// Expense accounts (debit-normal, result).
    Expense,
}

impl AccountCategory {
    /// Returns the natural increasing side for this category.
    #[must_use]
    pub const fn normal_side(self) -> NormalSide {
        match self {
            Self::Asset | Self::Expense => NormalSide::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalSide::Credit,
        }
    }

    /// Returns the report grouping this category belongs to.
    #[must_use]
    pub const fn report_group(self) -> ReportGroup {
        match self {
            Self::Revenue | Self::Expense => ReportGroup::Result,
            Self::Asset | Self::Liability | Self::Equity => ReportGroup::BalanceSheet,
        }
    }
}

/// Report grouping: balance-sheet accounts vs result (profit/loss) accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportGroup {
    /// Assets, liabilities, and equity.
    BalanceSheet,
    /// Revenue and expense accounts feeding the yearly net result.
    Result,
}

/// Whether an account's natural increasing movement is a debit or a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalSide {
    /// Debit-normal (assets, expenses).
    Debit,
    /// Credit-normal (liabilities, equity, revenue).
    Credit,
}

/// An account number as a tagged state.
///
/// Soft deletes free the number for reuse by rewriting it with a tombstone
/// suffix; modeling that as a state keeps the invariant "no two active
/// accounts share a number" explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum AccountNumber {
    /// An active account number, unique among active accounts.
    Active {
        /// The account number.
        number: String,
    },
    /// A tombstoned number belonging to a soft-deleted account.
    Tombstoned {
        /// The number the account carried while active.
        original: String,
        /// The suffix appended on soft delete.
        suffix: String,
    },
}

impl AccountNumber {
    /// Creates an active account number.
    #[must_use]
    pub fn active(number: impl Into<String>) -> Self {
        Self::Active {
            number: number.into(),
        }
    }

    /// Tombstones an active number with the given suffix.
    ///
    /// Tombstoning a tombstone is a no-op: the first suffix wins.
    #[must_use]
    pub fn tombstone(self, suffix: impl Into<String>) -> Self {
        match self {
            Self::Active { number } => Self::Tombstoned {
                original: number,
                suffix: suffix.into(),
            },
            tombstoned @ Self::Tombstoned { .. } => tombstoned,
        }
    }

    /// Returns true while the number is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Returns the number as originally assigned, regardless of state.
    #[must_use]
    pub fn original(&self) -> &str {
        match self {
            Self::Active { number } => number,
            Self::Tombstoned { original, .. } => original,
        }
    }

    /// Returns the value stored in the unique `account_number` column.
    #[must_use]
    pub fn storage_value(&self) -> String {
        match self {
            Self::Active { number } => number.clone(),
            Self::Tombstoned { original, suffix } => format!("{original}-del-{suffix}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_side_by_category() {
        assert_eq!(AccountCategory::Asset.normal_side(), NormalSide::Debit);
        assert_eq!(AccountCategory::Expense.normal_side(), NormalSide::Debit);
        assert_eq!(AccountCategory::Liability.normal_side(), NormalSide::Credit);
        assert_eq!(AccountCategory::Equity.normal_side(), NormalSide::Credit);
        assert_eq!(AccountCategory::Revenue.normal_side(), NormalSide::Credit);
    }

    #[test]
    fn test_report_group_by_category() {
        assert_eq!(AccountCategory::Revenue.report_group(), ReportGroup::Result);
        assert_eq!(AccountCategory::Expense.report_group(), ReportGroup::Result);
        assert_eq!(AccountCategory::Asset.report_group(), ReportGroup::BalanceSheet);
        assert_eq!(AccountCategory::Liability.report_group(), ReportGroup::BalanceSheet);
        assert_eq!(AccountCategory::Equity.report_group(), ReportGroup::BalanceSheet);
    }

    #[test]
    fn test_tombstone_rewrites_storage_value() {
        let number = AccountNumber::active("1101");
        assert!(number.is_active());
        assert_eq!(number.storage_value(), "1101");

        let tombstoned = number.tombstone("a1b2c3");
        assert!(!tombstoned.is_active());
        assert_eq!(tombstoned.storage_value(), "1101-del-a1b2c3");
        assert_eq!(tombstoned.original(), "1101");
    }

    #[test]
    fn test_tombstone_is_idempotent() {
        let first = AccountNumber::active("2201").tombstone("x1");
        let second = first.clone().tombstone("y2");
        assert_eq!(first, second);
    }
}
