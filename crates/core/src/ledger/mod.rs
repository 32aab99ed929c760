//! Double-entry ledger logic.
//!
//! This module implements the core posting pipeline:
//! - Domain types for ledger lines and posting summaries
//! - Batch validation for bulk intake
//! - Per-account aggregation for the posting engine
//! - Validation error types

pub mod error;
pub mod grouping;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::{ErrorCategory, LedgerError, RelationMismatch};
pub use grouping::{group_by_detail_account, grouped_totals, JournalGroup, PendingLine};
pub use types::{
    BatchReceipt, BatchTotals, DetailAccountInfo, LedgerLineInput, MovementType, PostingStatus,
    PostingSummary, UnpostingSummary,
};
pub use validation::validate_batch;
