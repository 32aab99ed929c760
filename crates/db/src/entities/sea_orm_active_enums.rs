//! `SeaORM` active enums mirroring the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account category (`account_category` enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_category")]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    /// Asset accounts.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability accounts.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity accounts.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue accounts.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense accounts.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Report grouping (`report_group` enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "report_group")]
#[serde(rename_all = "snake_case")]
pub enum ReportGroup {
    /// Assets, liabilities, and equity.
    #[sea_orm(string_value = "balance_sheet")]
    BalanceSheet,
    /// Revenue and expense accounts.
    #[sea_orm(string_value = "result")]
    Result,
}

/// Normal side (`normal_side` enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "normal_side")]
#[serde(rename_all = "lowercase")]
pub enum NormalSide {
    /// Debit-normal.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Credit-normal.
    #[sea_orm(string_value = "credit")]
    Credit,
}

/// Movement type (`movement_type` enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_type")]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Debit movement.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Credit movement.
    #[sea_orm(string_value = "credit")]
    Credit,
}

/// Posting status (`posting_status` enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "posting_status")]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    /// Recorded but not yet posted.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Finalized / applied to balances.
    #[sea_orm(string_value = "posted")]
    Posted,
}

// Conversions between the storage enums and their core-domain counterparts.

impl From<AccountCategory> for kopera_core::account::AccountCategory {
    fn from(value: AccountCategory) -> Self {
        match value {
            AccountCategory::Asset => Self::Asset,
            AccountCategory::Liability => Self::Liability,
            AccountCategory::Equity => Self::Equity,
            AccountCategory::Revenue => Self::Revenue,
            AccountCategory::Expense => Self::Expense,
        }
    }
}

impl From<kopera_core::account::AccountCategory> for AccountCategory {
    fn from(value: kopera_core::account::AccountCategory) -> Self {
        use kopera_core::account::AccountCategory as Core;
        match value {
            Core::Asset => Self::Asset,
            Core::Liability => Self::Liability,
            Core::Equity => Self::Equity,
            Core::Revenue => Self::Revenue,
            Core::Expense => Self::Expense,
        }
    }
}

impl From<ReportGroup> for kopera_core::account::ReportGroup {
    fn from(value: ReportGroup) -> Self {
        match value {
            ReportGroup::BalanceSheet => Self::BalanceSheet,
            ReportGroup::Result => Self::Result,
        }
    }
}

impl From<kopera_core::account::ReportGroup> for ReportGroup {
    fn from(value: kopera_core::account::ReportGroup) -> Self {
        use kopera_core::account::ReportGroup as Core;
        match value {
            Core::BalanceSheet => Self::BalanceSheet,
            Core::Result => Self::Result,
        }
    }
}

impl From<NormalSide> for kopera_core::account::NormalSide {
    fn from(value: NormalSide) -> Self {
        match value {
            NormalSide::Debit => Self::Debit,
            NormalSide::Credit => Self::Credit,
        }
    }
}

impl From<kopera_core::account::NormalSide> for NormalSide {
    fn from(value: kopera_core::account::NormalSide) -> Self {
        use kopera_core::account::NormalSide as Core;
        match value {
            Core::Debit => Self::Debit,
            Core::Credit => Self::Credit,
        }
    }
}

impl From<MovementType> for kopera_core::ledger::MovementType {
    fn from(value: MovementType) -> Self {
        match value {
            MovementType::Debit => Self::Debit,
            MovementType::Credit => Self::Credit,
        }
    }
}

impl From<kopera_core::ledger::MovementType> for MovementType {
    fn from(value: kopera_core::ledger::MovementType) -> Self {
        use kopera_core::ledger::MovementType as Core;
        match value {
            Core::Debit => Self::Debit,
            Core::Credit => Self::Credit,
        }
    }
}
