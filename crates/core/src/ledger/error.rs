//! Ledger validation error types.
//!
//! These are the pure-logic failures raised while validating a batch of
//! proposed ledger lines. Persistence-level failures (state conflicts,
//! integrity violations) are defined by the repositories that hit them; both
//! layers categorize through [`ErrorCategory`].

use kopera_shared::types::{DetailAccountId, GeneralAccountId, Money, MoneyError};
use thiserror::Error;
use uuid::Uuid;

/// Error categories determining how callers handle a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input, surfaced with full detail lists; never retried.
    Validation,
    /// The store is in a state the operation cannot run against; callers
    /// may retry with corrected input.
    StateConflict,
    /// Referential breakage; fatal for the current transaction.
    Integrity,
}

/// One detail/general pair that does not match on a batch line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationMismatch {
    /// Zero-based index of the violating line.
    pub line: usize,
    /// The detail account the line referenced.
    pub detail_account: DetailAccountId,
    /// The general account the line claimed as parent.
    pub given_general: GeneralAccountId,
    /// The detail account's actual parent.
    pub actual_general: GeneralAccountId,
}

/// Errors raised while validating a batch of ledger lines.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// The batch contains no lines.
    #[error("Batch contains no ledger lines")]
    EmptyBatch,

    /// One or more referenced accounts do not resolve to active accounts.
    /// Carries every missing reference.
    #[error("Accounts not found: {0:?}")]
    AccountsNotFound(Vec<Uuid>),

    /// One or more lines reference a general account that is not the
    /// detail account's parent. Carries every violating line.
    #[error("{} ledger line(s) reference a general account that is not the detail's parent", .0.len())]
    AccountRelationMismatch(Vec<RelationMismatch>),

    /// Debit and credit totals differ.
    #[error("Journal is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedJournal {
        /// Total debit amount.
        debit: Money,
        /// Total credit amount.
        credit: Money,
    },

    /// A monetary amount is missing, unparsable, or not positive.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl From<MoneyError> for LedgerError {
    fn from(err: MoneyError) -> Self {
        Self::InvalidAmount(err.to_string())
    }
}

impl LedgerError {
    /// Returns the error code for callers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyBatch => "EMPTY_BATCH",
            Self::AccountsNotFound(_) => "ACCOUNTS_NOT_FOUND",
            Self::AccountRelationMismatch(_) => "ACCOUNT_RELATION_MISMATCH",
            Self::UnbalancedJournal { .. } => "UNBALANCED_JOURNAL",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
        }
    }

    /// Returns the category this error falls in.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::EmptyBatch.error_code(), "EMPTY_BATCH");
        assert_eq!(
            LedgerError::AccountsNotFound(vec![Uuid::nil()]).error_code(),
            "ACCOUNTS_NOT_FOUND"
        );
        assert_eq!(
            LedgerError::UnbalancedJournal {
                debit: Money::from_decimal(dec!(100.00)),
                credit: Money::from_decimal(dec!(99.99)),
            }
            .error_code(),
            "UNBALANCED_JOURNAL"
        );
    }

    #[test]
    fn test_unbalanced_display_reports_both_totals() {
        let err = LedgerError::UnbalancedJournal {
            debit: Money::from_decimal(dec!(100.00)),
            credit: Money::from_decimal(dec!(99.99)),
        };
        assert_eq!(
            err.to_string(),
            "Journal is not balanced. Debit: 100.00, Credit: 99.99"
        );
    }

    #[test]
    fn test_all_variants_are_validation_errors() {
        assert_eq!(LedgerError::EmptyBatch.category(), ErrorCategory::Validation);
        assert_eq!(
            LedgerError::InvalidAmount("x".into()).category(),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn test_money_error_converts() {
        let err: LedgerError = MoneyError::InvalidAmount("abc".into()).into();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }
}
