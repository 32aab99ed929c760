//! Balance application and period closing (net-result) engines.
//!
//! Balance application realizes pending journal aggregates into account
//! balances; the reversal pass un-applies them. Period closing computes the
//! yearly net result across result-type accounts, stores it, and supports a
//! one-way closed lock.

use chrono::{Datelike, NaiveDate, Utc};
use kopera_core::account::BalancePair;
use kopera_core::closing::{
    BalanceApplication, BalanceReversal, CloseOperation, CloseOutcome, ClosingService,
    ResultAccountBalance,
};
use kopera_core::ledger::ErrorCategory;
use kopera_shared::types::Money;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    account_details, journal_entries, period_results,
    sea_orm_active_enums::{PostingStatus, ReportGroup},
};
use crate::repositories::account::AccountRepository;

/// Error types for balance application and period closing.
#[derive(Debug, thiserror::Error)]
pub enum ClosingError {
    /// A journal entry's account number no longer resolves to an active
    /// detail account. The whole pass aborts.
    #[error("Account detail '{0}' not found")]
    AccountDetailNotFound(String),

    /// The equity account designated to receive the net result does not
    /// resolve to an active detail account.
    #[error("Equity account '{0}' not found")]
    EquityAccountNotFound(String),

    /// The period result for the year is closed; nothing may mutate it or
    /// the linked equity account's accumulation fields.
    #[error("Period {0} is closed")]
    PeriodClosed(i32),

    /// No period result row exists for the year.
    #[error("Period result not found for {0}")]
    PeriodNotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ClosingError {
    /// Returns the error code for callers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccountDetailNotFound(_) => "ACCOUNT_DETAIL_NOT_FOUND",
            Self::EquityAccountNotFound(_) => "EQUITY_ACCOUNT_NOT_FOUND",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the category this error falls in.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::PeriodClosed(_) => ErrorCategory::StateConflict,
            Self::AccountDetailNotFound(_)
            | Self::EquityAccountNotFound(_)
            | Self::PeriodNotFound(_)
            | Self::Database(_) => ErrorCategory::Integrity,
        }
    }
}

impl From<crate::repositories::account::AccountError> for ClosingError {
    fn from(err: crate::repositories::account::AccountError) -> Self {
        use crate::repositories::account::AccountError;
        match err {
            AccountError::DetailNotFound(id) | AccountError::GeneralNotFound(id) => {
                Self::AccountDetailNotFound(id.to_string())
            }
            AccountError::Database(db) => Self::Database(db),
            other => Self::Database(DbErr::Custom(other.to_string())),
        }
    }
}

/// Balance application and period closing engine.
///
/// Constructed with the number of the equity account receiving the yearly
/// net result.
#[derive(Debug, Clone)]
pub struct ClosingRepository {
    db: DatabaseConnection,
    equity_account_number: String,
}

impl ClosingRepository {
    /// Creates a new closing repository.
    #[must_use]
    pub fn new(db: DatabaseConnection, equity_account_number: impl Into<String>) -> Self {
        Self {
            db,
            equity_account_number: equity_account_number.into(),
        }
    }

    /// Applies every pending journal aggregate up to the given date to
    /// account balances, flipping the aggregates to posted.
    ///
    /// Accounts are resolved BY NUMBER (the journal's soft foreign key); a
    /// miss aborts the whole pass — no partial application commits.
    ///
    /// # Errors
    ///
    /// `AccountDetailNotFound` when a journal number no longer resolves.
    pub async fn apply_balances_up_to(
        &self,
        date: NaiveDate,
        actor: Uuid,
    ) -> Result<BalanceApplication, ClosingError> {
        let txn = self.db.begin().await?;

        let journals = journal_entries::Entity::find()
            .filter(journal_entries::Column::PostingStatus.eq(PostingStatus::Pending))
            .filter(journal_entries::Column::LedgerDate.lte(date))
            .order_by_asc(journal_entries::Column::LedgerDate)
            .all(&txn)
            .await?;

        let now = Utc::now().into();
        let mut updated_accounts: Vec<String> = Vec::new();
        for journal in journals {
            let detail = Self::resolve_detail(&txn, &journal.account_detail_number).await?;

            AccountRepository::increment_balances(
                &txn,
                detail.id,
                Money::from_decimal(journal.credit_total),
                Money::from_decimal(journal.debit_total),
                actor,
            )
            .await?;

            let number = journal.account_detail_number.clone();
            let mut active: journal_entries::ActiveModel = journal.into();
            active.posting_status = Set(PostingStatus::Posted);
            active.posted_at = Set(Some(now));
            active.updated_by = Set(actor);
            active.updated_at = Set(now);
            active.update(&txn).await?;

            if !updated_accounts.contains(&number) {
                updated_accounts.push(number);
            }
        }

        txn.commit().await?;

        tracing::info!(%date, accounts = updated_accounts.len(), "balances applied");
        Ok(BalanceApplication { updated_accounts })
    }

    /// Reverts balance application for the given date: decrements each
    /// affected account by the aggregate totals and flips the journal
    /// entries back to pending.
    ///
    /// Refused while the period result covering the date's year is closed.
    ///
    /// # Errors
    ///
    /// `PeriodClosed` under a closed period; `AccountDetailNotFound` when a
    /// journal number no longer resolves.
    pub async fn revert_balances_for(
        &self,
        date: NaiveDate,
        actor: Uuid,
    ) -> Result<BalanceReversal, ClosingError> {
        let txn = self.db.begin().await?;

        self.guard_period_open(&txn, date.year()).await?;

        let journals = journal_entries::Entity::find()
            .filter(journal_entries::Column::PostingStatus.eq(PostingStatus::Posted))
            .filter(journal_entries::Column::LedgerDate.eq(date))
            .all(&txn)
            .await?;

        let now = Utc::now().into();
        let mut reverted_accounts: Vec<String> = Vec::new();
        for journal in journals {
            let detail = Self::resolve_detail(&txn, &journal.account_detail_number).await?;

            AccountRepository::decrement_balances(
                &txn,
                detail.id,
                Money::from_decimal(journal.credit_total),
                Money::from_decimal(journal.debit_total),
                actor,
            )
            .await?;

            let number = journal.account_detail_number.clone();
            let mut active: journal_entries::ActiveModel = journal.into();
            active.posting_status = Set(PostingStatus::Pending);
            active.posted_at = Set(None);
            active.updated_by = Set(actor);
            active.updated_at = Set(now);
            active.update(&txn).await?;

            if !reverted_accounts.contains(&number) {
                reverted_accounts.push(number);
            }
        }

        txn.commit().await?;

        tracing::info!(%date, accounts = reverted_accounts.len(), "balances reverted");
        Ok(BalanceReversal { reverted_accounts })
    }

    /// Computes and stores the net result for a year.
    ///
    /// Sums, across all active result-group detail accounts, the
    /// cumulative amount on each account's normal side: credit-normal
    /// accounts feed revenue, debit-normal feed expense. The signed net
    /// result is upserted into the period row, and the receiving equity
    /// account's accumulation pair is OVERWRITTEN with its credit/debit
    /// split — the one deliberate exception to delta-only balance mutation.
    ///
    /// # Errors
    ///
    /// `PeriodClosed` once the year is locked; `EquityAccountNotFound` when
    /// the designated equity account does not resolve.
    pub async fn close_period(
        &self,
        year: i32,
        actor: Uuid,
    ) -> Result<CloseOutcome, ClosingError> {
        let txn = self.db.begin().await?;

        let existing = period_results::Entity::find()
            .filter(period_results::Column::Year.eq(year))
            .one(&txn)
            .await?;
        if let Some(row) = &existing
            && row.is_closed
        {
            return Err(ClosingError::PeriodClosed(year));
        }

        let result_accounts = account_details::Entity::find()
            .filter(account_details::Column::ReportGroup.eq(ReportGroup::Result))
            .filter(account_details::Column::DeletedAt.is_null())
            .all(&txn)
            .await?;
        let balances: Vec<ResultAccountBalance> = result_accounts
            .iter()
            .map(|a| ResultAccountBalance {
                number: a.account_number.clone(),
                normal_side: a.normal_side.clone().into(),
                cumulative: BalancePair::new(
                    Money::from_decimal(a.amount_credit),
                    Money::from_decimal(a.amount_debit),
                ),
            })
            .collect();
        let breakdown = ClosingService::compute_net_result(&balances);

        let equity = Self::resolve_detail(&txn, &self.equity_account_number)
            .await
            .map_err(|err| match err {
                ClosingError::AccountDetailNotFound(number) => {
                    ClosingError::EquityAccountNotFound(number)
                }
                other => other,
            })?;

        let now = Utc::now().into();
        let operation = match existing {
            Some(row) => {
                let mut active: period_results::ActiveModel = row.into();
                active.amount = Set(breakdown.net_result.into_inner());
                active.equity_account_id = Set(equity.id);
                active.updated_by = Set(actor);
                active.updated_at = Set(now);
                active.update(&txn).await?;
                CloseOperation::Updated
            }
            None => {
                let row = period_results::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    year: Set(year),
                    amount: Set(breakdown.net_result.into_inner()),
                    equity_account_id: Set(equity.id),
                    is_closed: Set(false),
                    created_by: Set(actor),
                    updated_by: Set(actor),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                row.insert(&txn).await?;
                CloseOperation::Created
            }
        };

        let (credit, debit) = ClosingService::split_net_result(breakdown.net_result);
        let mut equity_active: account_details::ActiveModel = equity.into();
        equity_active.accumulation_credit = Set(credit.into_inner());
        equity_active.accumulation_debit = Set(debit.into_inner());
        equity_active.updated_by = Set(actor);
        equity_active.updated_at = Set(now);
        equity_active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            year,
            revenue = %breakdown.revenue,
            expense = %breakdown.expense,
            net_result = %breakdown.net_result,
            ?operation,
            "period result stored"
        );

        Ok(CloseOutcome {
            net_result: breakdown.net_result,
            operation,
        })
    }

    /// Locks the period result for a year. One-way: a locked period can
    /// never be reopened.
    ///
    /// # Errors
    ///
    /// `PeriodNotFound` when no result row exists, `PeriodClosed` when it
    /// is already locked.
    pub async fn lock_period(&self, year: i32, actor: Uuid) -> Result<(), ClosingError> {
        let txn = self.db.begin().await?;

        let row = period_results::Entity::find()
            .filter(period_results::Column::Year.eq(year))
            .one(&txn)
            .await?
            .ok_or(ClosingError::PeriodNotFound(year))?;
        if row.is_closed {
            return Err(ClosingError::PeriodClosed(year));
        }

        let now = Utc::now().into();
        let mut active: period_results::ActiveModel = row.into();
        active.is_closed = Set(true);
        active.updated_by = Set(actor);
        active.updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(year, "period locked");
        Ok(())
    }

    /// Resolves an active detail account by number; the journal's soft
    /// foreign key makes this check mandatory on every read.
    async fn resolve_detail(
        txn: &DatabaseTransaction,
        number: &str,
    ) -> Result<account_details::Model, ClosingError> {
        account_details::Entity::find()
            .filter(account_details::Column::AccountNumber.eq(number))
            .filter(account_details::Column::DeletedAt.is_null())
            .one(txn)
            .await?
            .ok_or_else(|| ClosingError::AccountDetailNotFound(number.to_string()))
    }

    async fn guard_period_open(
        &self,
        txn: &DatabaseTransaction,
        year: i32,
    ) -> Result<(), ClosingError> {
        let closed = period_results::Entity::find()
            .filter(period_results::Column::Year.eq(year))
            .one(txn)
            .await?
            .is_some_and(|row| row.is_closed);
        if closed {
            return Err(ClosingError::PeriodClosed(year));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ClosingError::AccountDetailNotFound("1101.01".into()).error_code(),
            "ACCOUNT_DETAIL_NOT_FOUND"
        );
        assert_eq!(
            ClosingError::EquityAccountNotFound("3201".into()).error_code(),
            "EQUITY_ACCOUNT_NOT_FOUND"
        );
        assert_eq!(ClosingError::PeriodClosed(2026).error_code(), "PERIOD_CLOSED");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ClosingError::PeriodClosed(2026).category(),
            ErrorCategory::StateConflict
        );
        assert_eq!(
            ClosingError::AccountDetailNotFound("x".into()).category(),
            ErrorCategory::Integrity
        );
    }
}
