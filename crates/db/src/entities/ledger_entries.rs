//! `SeaORM` Entity for the ledger_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{MovementType, PostingStatus};

/// One pending/posted movement line.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    /// Surrogate id.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Reference number shared by all lines created in one batch.
    pub batch_ref: String,
    /// Movement amount (positive, 2-decimal precision).
    pub amount: Decimal,
    /// Line description.
    pub description: String,
    /// The detail account the movement belongs to.
    pub account_detail_id: Uuid,
    /// The detail's parent general account.
    pub account_general_id: Uuid,
    /// Debit or credit.
    pub movement_type: MovementType,
    /// The ledger date the movement falls on.
    pub ledger_date: Date,
    /// Pending until the posting engine finalizes the line.
    pub posting_status: PostingStatus,
    /// Stamped by the posting engine; null while pending.
    pub posted_at: Option<DateTimeWithTimeZone>,
    /// User who created the line.
    pub created_by: Uuid,
    /// User who last updated the line.
    pub updated_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
    /// Soft-delete timestamp (null = active). Posted rows are never deleted.
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_details::Entity",
        from = "Column::AccountDetailId",
        to = "super::account_details::Column::Id"
    )]
    AccountDetails,
    #[sea_orm(
        belongs_to = "super::account_generals::Entity",
        from = "Column::AccountGeneralId",
        to = "super::account_generals::Column::Id"
    )]
    AccountGenerals,
}

impl Related<super::account_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountDetails.def()
    }
}

impl Related<super::account_generals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountGenerals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
