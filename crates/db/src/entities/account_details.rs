//! `SeaORM` Entity for the account_details table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccountCategory, NormalSide, ReportGroup};

/// A detail (child) account; every detail belongs to exactly one general.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_details")]
pub struct Model {
    /// Surrogate id (immutable).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Parent general account.
    pub general_id: Uuid,
    /// Account number; unique among non-deleted accounts, rewritten with a
    /// tombstone suffix on soft delete.
    pub account_number: String,
    /// Account name.
    pub name: String,
    /// Account category (inherited from the parent general).
    pub category: AccountCategory,
    /// Report grouping (balance sheet vs result).
    pub report_group: ReportGroup,
    /// Natural increasing side.
    pub normal_side: NormalSide,
    /// Cumulative credit amount (balance application only).
    pub amount_credit: Decimal,
    /// Cumulative debit amount (balance application only).
    pub amount_debit: Decimal,
    /// Period-level credit total (period closing only).
    pub accumulation_credit: Decimal,
    /// Period-level debit total (period closing only).
    pub accumulation_debit: Decimal,
    /// User who created the account.
    pub created_by: Uuid,
    /// User who last updated the account.
    pub updated_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
    /// Soft-delete timestamp (null = active).
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_generals::Entity",
        from = "Column::GeneralId",
        to = "super::account_generals::Column::Id"
    )]
    AccountGenerals,
    #[sea_orm(has_many = "super::ledger_entries::Entity")]
    LedgerEntries,
    #[sea_orm(has_many = "super::period_results::Entity")]
    PeriodResults,
}

impl Related<super::account_generals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountGenerals.def()
    }
}

impl Related<super::ledger_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerEntries.def()
    }
}

impl Related<super::period_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PeriodResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
