//! `SeaORM` Entity for the journal_entries table.
//!
//! Journal entries reference accounts BY NUMBER, not by surrogate id. The
//! columns are soft foreign keys: readers must re-resolve the number and
//! fail loudly when it no longer resolves.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PostingStatus;

/// Per-(detail account, date) aggregate produced by a posting run.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    /// Surrogate id.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Number of the detail account (soft reference).
    pub account_detail_number: String,
    /// Number of the detail's parent general account (soft reference).
    pub account_general_number: String,
    /// Summed debit amounts of the aggregated lines.
    pub debit_total: Decimal,
    /// Summed credit amounts of the aggregated lines.
    pub credit_total: Decimal,
    /// The ledger date the aggregate covers.
    pub ledger_date: Date,
    /// Pending until balance application realizes the aggregate.
    pub posting_status: PostingStatus,
    /// Stamped by balance application; null while pending.
    pub posted_at: Option<DateTimeWithTimeZone>,
    /// User who created the aggregate (posting engine actor).
    pub created_by: Uuid,
    /// User who last updated the aggregate.
    pub updated_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
