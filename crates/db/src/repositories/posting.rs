//! Posting and unposting engines.
//!
//! Posting aggregates one day's pending ledger lines into journal entries
//! and finalizes the lines; unposting is the exact inverse. Both run in one
//! transaction with read-then-act guards at the start, so concurrent calls
//! for the same date resolve to one winner.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use kopera_core::ledger::{
    group_by_detail_account, grouped_totals, ErrorCategory, PendingLine, PostingSummary,
    UnpostingSummary,
};
use kopera_shared::types::{DetailAccountId, Money};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    account_details, account_generals, journal_entries, ledger_entries,
    sea_orm_active_enums::PostingStatus,
};

/// Error types for posting and unposting.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// Journal entries at or before the date are already posted; posting is
    /// forward-only and never overlaps.
    #[error("Ledger is already posted through {0}")]
    AlreadyPosted(NaiveDate),

    /// No pending ledger entries exist for the date.
    #[error("Nothing to post for {0}")]
    NothingToPost(NaiveDate),

    /// Journal entries for the date are already applied to balances;
    /// revert balances first.
    #[error("Cannot unpost {0}: journal entries are already applied to balances")]
    CannotUnpost(NaiveDate),

    /// No posted ledger entries exist for the date.
    #[error("Nothing to unpost for {0}")]
    NothingToUnpost(NaiveDate),

    /// A ledger line references an account row that no longer resolves.
    #[error("Account not found: {0}")]
    AccountMissing(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl PostingError {
    /// Returns the error code for callers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyPosted(_) => "ALREADY_POSTED",
            Self::NothingToPost(_) => "NOTHING_TO_POST",
            Self::CannotUnpost(_) => "CANNOT_UNPOST",
            Self::NothingToUnpost(_) => "NOTHING_TO_UNPOST",
            Self::AccountMissing(_) => "ACCOUNT_MISSING",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the category this error falls in.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyPosted(_)
            | Self::NothingToPost(_)
            | Self::CannotUnpost(_)
            | Self::NothingToUnpost(_) => ErrorCategory::StateConflict,
            Self::AccountMissing(_) | Self::Database(_) => ErrorCategory::Integrity,
        }
    }

    /// Returns true if retrying the same call is safe.
    ///
    /// A transaction conflict between two same-date posting calls surfaces
    /// as `Database`; the retry then hits the `AlreadyPosted` guard.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Posting and unposting engine over ledger entries and journal aggregates.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts every pending ledger entry of the given date.
    ///
    /// Steps, all inside one transaction:
    /// 1. Reject when posted journal entries exist at or before the date.
    /// 2. Load the date's pending lines; nothing pending is an error.
    /// 3. Group lines per detail account, summing debits and credits.
    /// 4. Insert one pending journal entry per group.
    /// 5. Flip the lines to posted, stamping `posted_at` and the actor.
    ///
    /// # Errors
    ///
    /// `AlreadyPosted` re-entry guard, `NothingToPost` on an empty day;
    /// any failure rolls the whole run back.
    pub async fn post_for_date(
        &self,
        date: NaiveDate,
        actor: Uuid,
    ) -> Result<PostingSummary, PostingError> {
        let txn = self.db.begin().await?;

        let posted_before = journal_entries::Entity::find()
            .filter(journal_entries::Column::PostingStatus.eq(PostingStatus::Posted))
            .filter(journal_entries::Column::LedgerDate.lte(date))
            .count(&txn)
            .await?;
        if posted_before > 0 {
            return Err(PostingError::AlreadyPosted(date));
        }

        let lines = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::PostingStatus.eq(PostingStatus::Pending))
            .filter(ledger_entries::Column::LedgerDate.eq(date))
            .filter(ledger_entries::Column::DeletedAt.is_null())
            .all(&txn)
            .await?;
        if lines.is_empty() {
            return Err(PostingError::NothingToPost(date));
        }

        let detail_ids: HashSet<Uuid> = lines.iter().map(|l| l.account_detail_id).collect();
        let details: HashMap<Uuid, account_details::Model> = account_details::Entity::find()
            .filter(account_details::Column::Id.is_in(detail_ids))
            .all(&txn)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let general_ids: HashSet<Uuid> = details.values().map(|d| d.general_id).collect();
        let generals: HashMap<Uuid, account_generals::Model> = account_generals::Entity::find()
            .filter(account_generals::Column::Id.is_in(general_ids))
            .all(&txn)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let pending: Vec<PendingLine> = lines
            .iter()
            .map(|l| PendingLine {
                detail_account_id: DetailAccountId::from_uuid(l.account_detail_id),
                movement_type: l.movement_type.clone().into(),
                amount: Money::from_decimal(l.amount),
            })
            .collect();
        let groups = group_by_detail_account(&pending);

        let now = Utc::now();
        let now_tz = now.into();
        for group in &groups {
            let detail_id = group.detail_account_id.into_inner();
            let detail = details
                .get(&detail_id)
                .ok_or(PostingError::AccountMissing(detail_id))?;
            let general = generals
                .get(&detail.general_id)
                .ok_or(PostingError::AccountMissing(detail.general_id))?;

            let journal = journal_entries::ActiveModel {
                id: Set(Uuid::new_v4()),
                account_detail_number: Set(detail.account_number.clone()),
                account_general_number: Set(general.account_number.clone()),
                debit_total: Set(group.debit_total.into_inner()),
                credit_total: Set(group.credit_total.into_inner()),
                ledger_date: Set(date),
                posting_status: Set(PostingStatus::Pending),
                posted_at: Set(None),
                created_by: Set(actor),
                updated_by: Set(actor),
                created_at: Set(now_tz),
                updated_at: Set(now_tz),
            };
            journal.insert(&txn).await?;
        }

        let posted_count = lines.len() as u64;
        for line in lines {
            let mut active: ledger_entries::ActiveModel = line.into();
            active.posting_status = Set(PostingStatus::Posted);
            active.posted_at = Set(Some(now_tz));
            active.updated_by = Set(actor);
            active.updated_at = Set(now_tz);
            active.update(&txn).await?;
        }

        txn.commit().await?;

        let (debit, credit) = grouped_totals(&groups);
        tracing::info!(
            %date,
            posted = posted_count,
            groups = groups.len(),
            %debit,
            %credit,
            "ledger posted"
        );

        Ok(PostingSummary {
            posted_count,
            group_count: groups.len() as u64,
            posted_at: now,
        })
    }

    /// Reverts a posted date: the exact inverse of
    /// [`PostingRepository::post_for_date`].
    ///
    /// Steps, all inside one transaction:
    /// 1. Reject while journal entries for the date are applied to
    ///    balances (revert balances first).
    /// 2. Load the date's posted lines; nothing posted is an error.
    /// 3. Flip the lines back to pending, clearing `posted_at`.
    /// 4. Delete the date's still-pending journal entries.
    ///
    /// # Errors
    ///
    /// `CannotUnpost` while downstream journal entries are posted,
    /// `NothingToUnpost` when the date holds no posted lines.
    pub async fn unpost_for_date(
        &self,
        date: NaiveDate,
        actor: Uuid,
    ) -> Result<UnpostingSummary, PostingError> {
        let txn = self.db.begin().await?;

        let applied = journal_entries::Entity::find()
            .filter(journal_entries::Column::PostingStatus.eq(PostingStatus::Posted))
            .filter(journal_entries::Column::LedgerDate.eq(date))
            .count(&txn)
            .await?;
        if applied > 0 {
            return Err(PostingError::CannotUnpost(date));
        }

        let lines = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::PostingStatus.eq(PostingStatus::Posted))
            .filter(ledger_entries::Column::LedgerDate.eq(date))
            .filter(ledger_entries::Column::DeletedAt.is_null())
            .all(&txn)
            .await?;
        if lines.is_empty() {
            return Err(PostingError::NothingToUnpost(date));
        }

        let now = Utc::now();
        let now_tz = now.into();
        let unposted_count = lines.len() as u64;
        for line in lines {
            let mut active: ledger_entries::ActiveModel = line.into();
            active.posting_status = Set(PostingStatus::Pending);
            active.posted_at = Set(None);
            active.updated_by = Set(actor);
            active.updated_at = Set(now_tz);
            active.update(&txn).await?;
        }

        let deleted_groups = journal_entries::Entity::delete_many()
            .filter(journal_entries::Column::PostingStatus.eq(PostingStatus::Pending))
            .filter(journal_entries::Column::LedgerDate.eq(date))
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;

        tracing::info!(
            %date,
            unposted = unposted_count,
            deleted_groups,
            "ledger unposted"
        );

        Ok(UnpostingSummary {
            unposted_count,
            deleted_groups,
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(PostingError::AlreadyPosted(date).error_code(), "ALREADY_POSTED");
        assert_eq!(PostingError::NothingToPost(date).error_code(), "NOTHING_TO_POST");
        assert_eq!(PostingError::CannotUnpost(date).error_code(), "CANNOT_UNPOST");
        assert_eq!(
            PostingError::NothingToUnpost(date).error_code(),
            "NOTHING_TO_UNPOST"
        );
    }

    #[test]
    fn test_state_conflicts_are_not_retryable() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(
            PostingError::AlreadyPosted(date).category(),
            ErrorCategory::StateConflict
        );
        assert!(!PostingError::AlreadyPosted(date).is_retryable());
    }
}
