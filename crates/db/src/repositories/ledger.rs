//! Ledger repository: bulk intake of movement batches.
//!
//! A batch is validated and persisted inside one transaction; any failure
//! aborts the whole batch, so partial inserts never survive.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use kopera_core::ledger::{
    validate_batch, BatchReceipt, DetailAccountInfo, ErrorCategory, LedgerError, LedgerLineInput,
    PostingStatus,
};
use kopera_shared::types::{DetailAccountId, GeneralAccountId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    account_details, account_generals, ledger_entries,
    sea_orm_active_enums::PostingStatus as DbPostingStatus,
};

/// Error types for bulk intake and batch maintenance.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// The batch failed validation.
    #[error(transparent)]
    Validation(#[from] LedgerError),

    /// The generated batch reference collided with an existing batch.
    /// The whole batch is rejected; retry with a fresh submission.
    #[error("Batch reference '{0}' already exists")]
    ReferenceCollision(String),

    /// The batch contains posted lines; posted rows are never hard-deleted.
    #[error("Batch '{0}' contains posted lines and cannot be deleted")]
    CannotDeletePosted(String),

    /// No lines carry the given batch reference.
    #[error("Batch not found: {0}")]
    BatchNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl IntakeError {
    /// Returns the error code for callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(inner) => inner.error_code(),
            Self::ReferenceCollision(_) => "REFERENCE_COLLISION",
            Self::CannotDeletePosted(_) => "CANNOT_DELETE_POSTED",
            Self::BatchNotFound(_) => "BATCH_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the category this error falls in.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::ReferenceCollision(_) | Self::CannotDeletePosted(_) => {
                ErrorCategory::StateConflict
            }
            Self::BatchNotFound(_) | Self::Database(_) => ErrorCategory::Integrity,
        }
    }
}

/// Ledger repository for bulk intake and batch queries.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and persists a batch of proposed ledger lines as PENDING.
    ///
    /// Steps, all inside one transaction:
    /// 1. Resolve every referenced account; fail listing all misses.
    /// 2. Verify each detail's parent equals the line's general account.
    /// 3. Verify debit and credit totals balance.
    /// 4. Generate a unique batch reference.
    /// 5. Insert all lines as pending.
    ///
    /// # Errors
    ///
    /// Any validation failure or reference collision rejects the whole
    /// batch; nothing is persisted.
    pub async fn submit_batch(
        &self,
        lines: &[LedgerLineInput],
        actor: Uuid,
    ) -> Result<BatchReceipt, IntakeError> {
        let txn = self.db.begin().await?;

        let detail_ids: HashSet<Uuid> = lines
            .iter()
            .map(|l| l.detail_account_id.into_inner())
            .collect();
        let general_ids: HashSet<Uuid> = lines
            .iter()
            .map(|l| l.general_account_id.into_inner())
            .collect();

        let details: HashMap<Uuid, account_details::Model> = account_details::Entity::find()
            .filter(account_details::Column::Id.is_in(detail_ids))
            .filter(account_details::Column::DeletedAt.is_null())
            .all(&txn)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let generals: HashSet<Uuid> = account_generals::Entity::find()
            .filter(account_generals::Column::Id.is_in(general_ids))
            .filter(account_generals::Column::DeletedAt.is_null())
            .all(&txn)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();

        let detail_lookup = |id: DetailAccountId| {
            details.get(&id.into_inner()).map(|m| DetailAccountInfo {
                id,
                general_id: GeneralAccountId::from_uuid(m.general_id),
                number: m.account_number.clone(),
            })
        };
        let general_exists = |id: GeneralAccountId| generals.contains(&id.into_inner());

        let totals = validate_batch(lines, detail_lookup, general_exists)
            .map_err(IntakeError::Validation)?;

        let batch_ref = generate_batch_ref();
        let collision = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::BatchRef.eq(&batch_ref))
            .count(&txn)
            .await?;
        if collision > 0 {
            return Err(IntakeError::ReferenceCollision(batch_ref));
        }

        let now = Utc::now().into();
        for line in lines {
            let entry = ledger_entries::ActiveModel {
                id: Set(Uuid::new_v4()),
                batch_ref: Set(batch_ref.clone()),
                amount: Set(line.amount.into_inner()),
                description: Set(line.description.clone()),
                account_detail_id: Set(line.detail_account_id.into_inner()),
                account_general_id: Set(line.general_account_id.into_inner()),
                movement_type: Set(line.movement_type.into()),
                ledger_date: Set(line.ledger_date),
                posting_status: Set(DbPostingStatus::Pending),
                posted_at: Set(None),
                created_by: Set(actor),
                updated_by: Set(actor),
                created_at: Set(now),
                updated_at: Set(now),
                deleted_at: Set(None),
            };
            entry.insert(&txn).await?;
        }

        txn.commit().await?;

        tracing::info!(
            batch_ref = %batch_ref,
            lines = lines.len(),
            debit = %totals.debit,
            credit = %totals.credit,
            "ledger batch accepted"
        );

        Ok(BatchReceipt {
            batch_ref,
            count: lines.len(),
        })
    }

    /// Loads every line of a batch in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_batch(
        &self,
        batch_ref: &str,
    ) -> Result<Vec<ledger_entries::Model>, IntakeError> {
        Ok(ledger_entries::Entity::find()
            .filter(ledger_entries::Column::BatchRef.eq(batch_ref))
            .filter(ledger_entries::Column::DeletedAt.is_null())
            .order_by_asc(ledger_entries::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Loads entries for a ledger date with the given posting status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_date(
        &self,
        date: chrono::NaiveDate,
        status: PostingStatus,
    ) -> Result<Vec<ledger_entries::Model>, IntakeError> {
        let db_status = match status {
            PostingStatus::Pending => DbPostingStatus::Pending,
            PostingStatus::Posted => DbPostingStatus::Posted,
        };
        Ok(ledger_entries::Entity::find()
            .filter(ledger_entries::Column::LedgerDate.eq(date))
            .filter(ledger_entries::Column::PostingStatus.eq(db_status))
            .filter(ledger_entries::Column::DeletedAt.is_null())
            .order_by_asc(ledger_entries::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Hard-deletes a batch while every line is still pending.
    ///
    /// Returns the number of deleted lines.
    ///
    /// # Errors
    ///
    /// Fails with `CannotDeletePosted` once any line of the batch has been
    /// posted.
    pub async fn delete_pending_batch(
        &self,
        batch_ref: &str,
        _actor: Uuid,
    ) -> Result<u64, IntakeError> {
        let txn = self.db.begin().await?;

        let lines = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::BatchRef.eq(batch_ref))
            .filter(ledger_entries::Column::DeletedAt.is_null())
            .all(&txn)
            .await?;
        if lines.is_empty() {
            return Err(IntakeError::BatchNotFound(batch_ref.to_string()));
        }
        if lines
            .iter()
            .any(|l| l.posting_status == DbPostingStatus::Posted)
        {
            return Err(IntakeError::CannotDeletePosted(batch_ref.to_string()));
        }

        let deleted = ledger_entries::Entity::delete_many()
            .filter(ledger_entries::Column::BatchRef.eq(batch_ref))
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;
        Ok(deleted)
    }
}

/// Generates a batch reference: a millisecond-resolution time token plus a
/// url-safe random suffix.
fn generate_batch_ref() -> String {
    let token = Utc::now().format("%Y%m%d%H%M%S%3f");
    let bytes: [u8; 6] = rand::random();
    format!("{token}-{}", base64_url::encode(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_ref_shape() {
        let batch_ref = generate_batch_ref();
        let (token, suffix) = batch_ref.split_once('-').unwrap();
        assert_eq!(token.len(), 17); // yyyymmddhhmmssSSS
        assert!(token.chars().all(|c| c.is_ascii_digit()));
        assert!(!suffix.is_empty());
    }

    #[test]
    fn test_batch_refs_differ() {
        // The random suffix alone makes same-millisecond collisions
        // vanishingly unlikely.
        assert_ne!(generate_batch_ref(), generate_batch_ref());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            IntakeError::ReferenceCollision("x".into()).category(),
            ErrorCategory::StateConflict
        );
        assert_eq!(
            IntakeError::Validation(LedgerError::EmptyBatch).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            IntakeError::Validation(LedgerError::EmptyBatch).error_code(),
            "EMPTY_BATCH"
        );
    }
}
