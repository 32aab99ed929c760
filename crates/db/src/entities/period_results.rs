//! `SeaORM` Entity for the period_results table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The net result of a year, linked to the equity account receiving it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "period_results")]
pub struct Model {
    /// Surrogate id.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The year this result covers (one row per year).
    pub year: i32,
    /// Signed net result (revenue minus expense).
    pub amount: Decimal,
    /// The equity detail account receiving the result.
    pub equity_account_id: Uuid,
    /// One-way closed lock; once set, the row and the linked equity
    /// account's accumulation fields are immutable.
    pub is_closed: bool,
    /// User who created the row.
    pub created_by: Uuid,
    /// User who last updated the row.
    pub updated_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_details::Entity",
        from = "Column::EquityAccountId",
        to = "super::account_details::Column::Id"
    )]
    AccountDetails,
}

impl Related<super::account_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
