//! Account domain logic.
//!
//! This module implements the chart-of-accounts rules:
//! - Account classification (category, report grouping, normal side)
//! - Account number tombstones for soft deletes
//! - Balance pairs and delta application

pub mod balance;
pub mod types;

pub use balance::BalancePair;
pub use types::{AccountCategory, AccountNumber, NormalSide, ReportGroup};
