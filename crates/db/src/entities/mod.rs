//! `SeaORM` entity definitions.

pub mod account_details;
pub mod account_generals;
pub mod journal_entries;
pub mod ledger_entries;
pub mod period_results;
pub mod sea_orm_active_enums;
