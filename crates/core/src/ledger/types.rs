//! Ledger domain types for bulk intake, posting, and unposting.

use chrono::{DateTime, NaiveDate, Utc};
use kopera_shared::types::{DetailAccountId, GeneralAccountId, Money};
use serde::{Deserialize, Serialize};

/// Movement type: either Debit or Credit.
///
/// In double-entry bookkeeping every batch of movements must carry equal
/// debit and credit totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Debit movement.
    Debit,
    /// Credit movement.
    Credit,
}

/// Posting status of a ledger entry or journal aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    /// Recorded but not yet posted.
    Pending,
    /// Finalized by the posting engine (ledger lines) or applied to
    /// balances (journal aggregates).
    Posted,
}

impl PostingStatus {
    /// Returns true while still pending.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// One proposed ledger line submitted through bulk intake.
#[derive(Debug, Clone)]
pub struct LedgerLineInput {
    /// The detail account the movement belongs to.
    pub detail_account_id: DetailAccountId,
    /// The detail account's parent general account.
    pub general_account_id: GeneralAccountId,
    /// Whether this is a debit or credit movement.
    pub movement_type: MovementType,
    /// Movement amount (must be positive).
    pub amount: Money,
    /// Line description.
    pub description: String,
    /// The ledger date the movement falls on.
    pub ledger_date: NaiveDate,
}

/// Account information needed to validate a batch line.
#[derive(Debug, Clone)]
pub struct DetailAccountInfo {
    /// The detail account ID.
    pub id: DetailAccountId,
    /// The parent general account ID.
    pub general_id: GeneralAccountId,
    /// The detail account number.
    pub number: String,
}

/// Debit/credit totals of one batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchTotals {
    /// Total debit amount.
    pub debit: Money,
    /// Total credit amount.
    pub credit: Money,
    /// Whether the batch is balanced (debits == credits).
    pub is_balanced: bool,
}

impl BatchTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Money, credit: Money) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Money {
        self.debit - self.credit
    }
}

/// Receipt returned when a batch is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReceipt {
    /// Reference number shared by every line in the batch.
    pub batch_ref: String,
    /// Number of lines persisted.
    pub count: usize,
}

/// Summary returned by the posting engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingSummary {
    /// Number of ledger lines flipped to posted.
    pub posted_count: u64,
    /// Number of journal groups created.
    pub group_count: u64,
    /// The posting timestamp stamped onto every line.
    pub posted_at: DateTime<Utc>,
}

/// Summary returned by the unposting engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpostingSummary {
    /// Number of ledger lines flipped back to pending.
    pub unposted_count: u64,
    /// Number of pending journal groups deleted.
    pub deleted_groups: u64,
    /// When the unposting ran.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_batch_totals_balanced() {
        let totals = BatchTotals::new(
            Money::from_decimal(dec!(100.00)),
            Money::from_decimal(dec!(100.00)),
        );
        assert!(totals.is_balanced);
        assert!(totals.difference().is_zero());
    }

    #[test]
    fn test_batch_totals_unbalanced() {
        let totals = BatchTotals::new(
            Money::from_decimal(dec!(100.00)),
            Money::from_decimal(dec!(99.99)),
        );
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), Money::from_decimal(dec!(0.01)));
    }

    #[test]
    fn test_posting_status_pending() {
        assert!(PostingStatus::Pending.is_pending());
        assert!(!PostingStatus::Posted.is_pending());
    }
}
