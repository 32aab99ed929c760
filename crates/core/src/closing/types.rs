//! Domain types for period closing and balance application.

use kopera_shared::types::Money;
use serde::{Deserialize, Serialize};

use crate::account::{BalancePair, NormalSide};

/// Snapshot of one result-type detail account entering the net-result sum.
#[derive(Debug, Clone)]
pub struct ResultAccountBalance {
    /// The detail account number.
    pub number: String,
    /// The account's normal side.
    pub normal_side: NormalSide,
    /// The account's cumulative credit/debit pair.
    pub cumulative: BalancePair,
}

/// The computed net result for a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetResultBreakdown {
    /// Total revenue (credit-normal result accounts, credit side).
    pub revenue: Money,
    /// Total expense (debit-normal result accounts, debit side).
    pub expense: Money,
    /// Signed net result: revenue minus expense.
    pub net_result: Money,
}

/// Whether closing created or updated the period result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseOperation {
    /// A new period result row was inserted.
    Created,
    /// An existing (still open) period result row was overwritten.
    Updated,
}

/// Outcome of a period closing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseOutcome {
    /// The signed net result stored for the year.
    pub net_result: Money,
    /// Whether the row was created or updated.
    pub operation: CloseOperation,
}

/// Accounts touched by one balance-application pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceApplication {
    /// Numbers of the detail accounts whose balances were incremented.
    pub updated_accounts: Vec<String>,
}

/// Accounts touched by one balance-reversal pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceReversal {
    /// Numbers of the detail accounts whose balances were decremented.
    pub reverted_accounts: Vec<String>,
}
