//! Account repository: the single owner of account balance fields.
//!
//! Balance mutation is always a relative delta applied inside the caller's
//! transaction, never an absolute overwrite. The one exception is the period
//! closing engine's accumulation write, which lives in the closing
//! repository.

use chrono::Utc;
use kopera_core::account::{AccountCategory, AccountNumber, BalancePair};
use kopera_core::ledger::ErrorCategory;
use kopera_shared::types::Money;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{account_details, account_generals, ledger_entries};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account number already in use by an active account.
    #[error("Account number '{0}' already exists")]
    DuplicateNumber(String),

    /// General account not found or soft-deleted.
    #[error("General account not found: {0}")]
    GeneralNotFound(Uuid),

    /// Detail account not found or soft-deleted.
    #[error("Detail account not found: {0}")]
    DetailNotFound(Uuid),

    /// The account still has referencing ledger entries or child accounts.
    #[error("Account has dependents: {ledger_entries} ledger entries, {detail_accounts} detail accounts")]
    HasDependents {
        /// Non-deleted ledger entries referencing the account.
        ledger_entries: u64,
        /// Active detail accounts under the account (generals only).
        detail_accounts: u64,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl AccountError {
    /// Returns the error code for callers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateNumber(_) => "DUPLICATE_NUMBER",
            Self::GeneralNotFound(_) => "GENERAL_NOT_FOUND",
            Self::DetailNotFound(_) => "DETAIL_NOT_FOUND",
            Self::HasDependents { .. } => "HAS_DEPENDENTS",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the category this error falls in.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateNumber(_) => ErrorCategory::Validation,
            Self::GeneralNotFound(_)
            | Self::DetailNotFound(_)
            | Self::HasDependents { .. }
            | Self::Database(_) => ErrorCategory::Integrity,
        }
    }
}

/// Input for creating a general account.
#[derive(Debug, Clone)]
pub struct CreateGeneralAccountInput {
    /// Account number (unique among active accounts).
    pub account_number: String,
    /// Account name.
    pub name: String,
    /// Account category; report group and normal side derive from it.
    pub category: AccountCategory,
    /// User creating the account.
    pub actor: Uuid,
}

/// Input for creating a detail account under a general.
#[derive(Debug, Clone)]
pub struct CreateDetailAccountInput {
    /// Parent general account.
    pub general_id: Uuid,
    /// Account number (unique among active accounts).
    pub account_number: String,
    /// Account name.
    pub name: String,
    /// User creating the account.
    pub actor: Uuid,
}

/// Account repository for chart-of-accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a general account.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateNumber` when an active account already carries
    /// the number.
    pub async fn create_general(
        &self,
        input: CreateGeneralAccountInput,
    ) -> Result<account_generals::Model, AccountError> {
        let existing = account_generals::Entity::find()
            .filter(account_generals::Column::AccountNumber.eq(&input.account_number))
            .filter(account_generals::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateNumber(input.account_number));
        }

        let now = Utc::now().into();
        let account = account_generals::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_number: Set(input.account_number),
            name: Set(input.name),
            category: Set(input.category.into()),
            report_group: Set(input.category.report_group().into()),
            normal_side: Set(input.category.normal_side().into()),
            amount_credit: Set(Decimal::ZERO),
            amount_debit: Set(Decimal::ZERO),
            accumulation_credit: Set(Decimal::ZERO),
            accumulation_debit: Set(Decimal::ZERO),
            created_by: Set(input.actor),
            updated_by: Set(input.actor),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Creates a detail account under an active general account.
    ///
    /// Classification (category, report group, normal side) is inherited
    /// from the parent.
    ///
    /// # Errors
    ///
    /// Fails with `GeneralNotFound` when the parent does not resolve to an
    /// active general account, or `DuplicateNumber` on a number clash.
    pub async fn create_detail(
        &self,
        input: CreateDetailAccountInput,
    ) -> Result<account_details::Model, AccountError> {
        let general = self
            .find_active_general_by_id(input.general_id)
            .await?
            .ok_or(AccountError::GeneralNotFound(input.general_id))?;

        let existing = account_details::Entity::find()
            .filter(account_details::Column::AccountNumber.eq(&input.account_number))
            .filter(account_details::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateNumber(input.account_number));
        }

        let now = Utc::now().into();
        let account = account_details::ActiveModel {
            id: Set(Uuid::new_v4()),
            general_id: Set(general.id),
            account_number: Set(input.account_number),
            name: Set(input.name),
            category: Set(general.category),
            report_group: Set(general.report_group),
            normal_side: Set(general.normal_side),
            amount_credit: Set(Decimal::ZERO),
            amount_debit: Set(Decimal::ZERO),
            accumulation_credit: Set(Decimal::ZERO),
            accumulation_debit: Set(Decimal::ZERO),
            created_by: Set(input.actor),
            updated_by: Set(input.actor),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Finds an active general account by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active_general_by_number(
        &self,
        number: &str,
    ) -> Result<Option<account_generals::Model>, AccountError> {
        Ok(account_generals::Entity::find()
            .filter(account_generals::Column::AccountNumber.eq(number))
            .filter(account_generals::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?)
    }

    /// Finds an active detail account by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active_detail_by_number(
        &self,
        number: &str,
    ) -> Result<Option<account_details::Model>, AccountError> {
        Ok(account_details::Entity::find()
            .filter(account_details::Column::AccountNumber.eq(number))
            .filter(account_details::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?)
    }

    /// Finds an active general account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active_general_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<account_generals::Model>, AccountError> {
        Ok(account_generals::Entity::find_by_id(id)
            .filter(account_generals::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?)
    }

    /// Finds an active detail account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active_detail_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<account_details::Model>, AccountError> {
        Ok(account_details::Entity::find_by_id(id)
            .filter(account_details::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?)
    }

    /// Increments the cumulative balances of a detail account and its
    /// parent general by the given deltas, inside the caller's transaction.
    ///
    /// # Errors
    ///
    /// Fails with `DetailNotFound`/`GeneralNotFound` when either row does
    /// not resolve to an active account.
    pub async fn increment_balances(
        txn: &DatabaseTransaction,
        detail_id: Uuid,
        credit_delta: Money,
        debit_delta: Money,
        actor: Uuid,
    ) -> Result<account_details::Model, AccountError> {
        Self::apply_balance_delta(txn, detail_id, credit_delta, debit_delta, actor, false).await
    }

    /// Decrements the cumulative balances of a detail account and its
    /// parent general by the given deltas. Exact inverse of
    /// [`AccountRepository::increment_balances`].
    ///
    /// # Errors
    ///
    /// Fails with `DetailNotFound`/`GeneralNotFound` when either row does
    /// not resolve to an active account.
    pub async fn decrement_balances(
        txn: &DatabaseTransaction,
        detail_id: Uuid,
        credit_delta: Money,
        debit_delta: Money,
        actor: Uuid,
    ) -> Result<account_details::Model, AccountError> {
        Self::apply_balance_delta(txn, detail_id, credit_delta, debit_delta, actor, true).await
    }

    async fn apply_balance_delta(
        txn: &DatabaseTransaction,
        detail_id: Uuid,
        credit_delta: Money,
        debit_delta: Money,
        actor: Uuid,
        negate: bool,
    ) -> Result<account_details::Model, AccountError> {
        let detail = account_details::Entity::find_by_id(detail_id)
            .filter(account_details::Column::DeletedAt.is_null())
            .one(txn)
            .await?
            .ok_or(AccountError::DetailNotFound(detail_id))?;

        let general = account_generals::Entity::find_by_id(detail.general_id)
            .filter(account_generals::Column::DeletedAt.is_null())
            .one(txn)
            .await?
            .ok_or(AccountError::GeneralNotFound(detail.general_id))?;

        let apply = |credit: Decimal, debit: Decimal| -> BalancePair {
            let pair = BalancePair::new(Money::from_decimal(credit), Money::from_decimal(debit));
            if negate {
                pair.decremented(credit_delta, debit_delta)
            } else {
                pair.incremented(credit_delta, debit_delta)
            }
        };

        let now = Utc::now().into();

        let detail_pair = apply(detail.amount_credit, detail.amount_debit);
        let mut detail_active: account_details::ActiveModel = detail.into();
        detail_active.amount_credit = Set(detail_pair.credit.into_inner());
        detail_active.amount_debit = Set(detail_pair.debit.into_inner());
        detail_active.updated_by = Set(actor);
        detail_active.updated_at = Set(now);
        let updated_detail = detail_active.update(txn).await?;

        let general_pair = apply(general.amount_credit, general.amount_debit);
        let mut general_active: account_generals::ActiveModel = general.into();
        general_active.amount_credit = Set(general_pair.credit.into_inner());
        general_active.amount_debit = Set(general_pair.debit.into_inner());
        general_active.updated_by = Set(actor);
        general_active.updated_at = Set(now);
        general_active.update(txn).await?;

        Ok(updated_detail)
    }

    /// Soft-deletes a general account.
    ///
    /// The account number is rewritten with a tombstone suffix to free the
    /// unique index before the delete timestamp is stamped.
    ///
    /// # Errors
    ///
    /// Fails with `HasDependents` when any non-deleted ledger entry
    /// references the account or any active detail account remains under it.
    pub async fn soft_delete_general(&self, id: Uuid, actor: Uuid) -> Result<(), AccountError> {
        let txn = self.db.begin().await?;

        let general = account_generals::Entity::find_by_id(id)
            .filter(account_generals::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
            .ok_or(AccountError::GeneralNotFound(id))?;

        let entry_count = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::AccountGeneralId.eq(id))
            .filter(ledger_entries::Column::DeletedAt.is_null())
            .count(&txn)
            .await?;
        let child_count = account_details::Entity::find()
            .filter(account_details::Column::GeneralId.eq(id))
            .filter(account_details::Column::DeletedAt.is_null())
            .count(&txn)
            .await?;
        if entry_count > 0 || child_count > 0 {
            return Err(AccountError::HasDependents {
                ledger_entries: entry_count,
                detail_accounts: child_count,
            });
        }

        let tombstoned = AccountNumber::active(general.account_number.clone())
            .tombstone(tombstone_suffix());
        let now = Utc::now().into();
        let mut active: account_generals::ActiveModel = general.into();
        active.account_number = Set(tombstoned.storage_value());
        active.deleted_at = Set(Some(now));
        active.updated_by = Set(actor);
        active.updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Soft-deletes a detail account.
    ///
    /// # Errors
    ///
    /// Fails with `HasDependents` when any non-deleted ledger entry
    /// references the account.
    pub async fn soft_delete_detail(&self, id: Uuid, actor: Uuid) -> Result<(), AccountError> {
        let txn = self.db.begin().await?;

        let detail = account_details::Entity::find_by_id(id)
            .filter(account_details::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
            .ok_or(AccountError::DetailNotFound(id))?;

        let entry_count = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::AccountDetailId.eq(id))
            .filter(ledger_entries::Column::DeletedAt.is_null())
            .count(&txn)
            .await?;
        if entry_count > 0 {
            return Err(AccountError::HasDependents {
                ledger_entries: entry_count,
                detail_accounts: 0,
            });
        }

        let tombstoned = AccountNumber::active(detail.account_number.clone())
            .tombstone(tombstone_suffix());
        let now = Utc::now().into();
        let mut active: account_details::ActiveModel = detail.into();
        active.account_number = Set(tombstoned.storage_value());
        active.deleted_at = Set(Some(now));
        active.updated_by = Set(actor);
        active.updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}

/// Short random suffix for tombstoned account numbers.
fn tombstone_suffix() -> String {
    let bytes: [u8; 4] = rand::random();
    base64_url::encode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tombstone_suffix_is_short_and_url_safe() {
        let suffix = tombstone_suffix();
        assert!(!suffix.is_empty());
        assert!(suffix.len() <= 8);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_error_codes_and_categories() {
        let err = AccountError::HasDependents {
            ledger_entries: 2,
            detail_accounts: 0,
        };
        assert_eq!(err.error_code(), "HAS_DEPENDENTS");
        assert_eq!(err.category(), ErrorCategory::Integrity);

        let err = AccountError::DuplicateNumber("1101".into());
        assert_eq!(err.error_code(), "DUPLICATE_NUMBER");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
