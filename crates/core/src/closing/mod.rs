//! Period closing (net-result) logic.
//!
//! Computes the yearly net result across result-type accounts and the
//! credit/debit split written onto the receiving equity account.

pub mod service;
pub mod types;

pub use service::ClosingService;
pub use types::{
    BalanceApplication, BalanceReversal, CloseOperation, CloseOutcome, NetResultBreakdown,
    ResultAccountBalance,
};
