//! Initial database migration.
//!
//! Creates the enums, chart-of-accounts tables, ledger/journal tables, and
//! the period_results table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNT_GENERALS_SQL).await?;
        db.execute_unprepared(ACCOUNT_DETAILS_SQL).await?;

        // ============================================================
        // PART 3: LEDGER & JOURNAL
        // ============================================================
        db.execute_unprepared(LEDGER_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;

        // ============================================================
        // PART 4: PERIOD RESULTS
        // ============================================================
        db.execute_unprepared(PERIOD_RESULTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account classification
CREATE TYPE account_category AS ENUM (
    'asset',
    'liability',
    'equity',
    'revenue',
    'expense'
);

-- Balance sheet vs result reporting
CREATE TYPE report_group AS ENUM ('balance_sheet', 'result');

-- Natural increasing side of an account
CREATE TYPE normal_side AS ENUM ('debit', 'credit');

-- Ledger movement type
CREATE TYPE movement_type AS ENUM ('debit', 'credit');

-- Ledger entry / journal entry posting status
CREATE TYPE posting_status AS ENUM ('pending', 'posted');
";

const ACCOUNT_GENERALS_SQL: &str = r"
CREATE TABLE account_generals (
    id UUID PRIMARY KEY,
    account_number VARCHAR(32) NOT NULL,
    name VARCHAR(255) NOT NULL,
    category account_category NOT NULL,
    report_group report_group NOT NULL,
    normal_side normal_side NOT NULL,
    amount_credit NUMERIC(18,2) NOT NULL DEFAULT 0,
    amount_debit NUMERIC(18,2) NOT NULL DEFAULT 0,
    accumulation_credit NUMERIC(18,2) NOT NULL DEFAULT 0,
    accumulation_debit NUMERIC(18,2) NOT NULL DEFAULT 0,
    created_by UUID NOT NULL,
    updated_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
);

-- Uniqueness applies to active accounts only; soft deletes free the number
-- by rewriting it with a tombstone suffix.
CREATE UNIQUE INDEX idx_account_generals_number_active
    ON account_generals (account_number)
    WHERE deleted_at IS NULL;
";

const ACCOUNT_DETAILS_SQL: &str = r"
CREATE TABLE account_details (
    id UUID PRIMARY KEY,
    general_id UUID NOT NULL REFERENCES account_generals(id),
    account_number VARCHAR(32) NOT NULL,
    name VARCHAR(255) NOT NULL,
    category account_category NOT NULL,
    report_group report_group NOT NULL,
    normal_side normal_side NOT NULL,
    amount_credit NUMERIC(18,2) NOT NULL DEFAULT 0,
    amount_debit NUMERIC(18,2) NOT NULL DEFAULT 0,
    accumulation_credit NUMERIC(18,2) NOT NULL DEFAULT 0,
    accumulation_debit NUMERIC(18,2) NOT NULL DEFAULT 0,
    created_by UUID NOT NULL,
    updated_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
);

CREATE UNIQUE INDEX idx_account_details_number_active
    ON account_details (account_number)
    WHERE deleted_at IS NULL;

CREATE INDEX idx_account_details_general ON account_details (general_id);
CREATE INDEX idx_account_details_report_group
    ON account_details (report_group)
    WHERE deleted_at IS NULL;
";

const LEDGER_ENTRIES_SQL: &str = r"
CREATE TABLE ledger_entries (
    id UUID PRIMARY KEY,
    batch_ref VARCHAR(64) NOT NULL,
    amount NUMERIC(18,2) NOT NULL CHECK (amount > 0),
    description TEXT NOT NULL,
    account_detail_id UUID NOT NULL REFERENCES account_details(id),
    account_general_id UUID NOT NULL REFERENCES account_generals(id),
    movement_type movement_type NOT NULL,
    ledger_date DATE NOT NULL,
    posting_status posting_status NOT NULL DEFAULT 'pending',
    posted_at TIMESTAMPTZ,
    created_by UUID NOT NULL,
    updated_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_ledger_entries_batch_ref ON ledger_entries (batch_ref);
CREATE INDEX idx_ledger_entries_status_date
    ON ledger_entries (posting_status, ledger_date)
    WHERE deleted_at IS NULL;
CREATE INDEX idx_ledger_entries_detail ON ledger_entries (account_detail_id);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    -- Account references are BY NUMBER: soft foreign keys with no
    -- database-enforced integrity. Readers re-resolve on every pass.
    account_detail_number VARCHAR(32) NOT NULL,
    account_general_number VARCHAR(32) NOT NULL,
    debit_total NUMERIC(18,2) NOT NULL DEFAULT 0,
    credit_total NUMERIC(18,2) NOT NULL DEFAULT 0,
    ledger_date DATE NOT NULL,
    posting_status posting_status NOT NULL DEFAULT 'pending',
    posted_at TIMESTAMPTZ,
    created_by UUID NOT NULL,
    updated_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_journal_entries_status_date
    ON journal_entries (posting_status, ledger_date);
CREATE INDEX idx_journal_entries_detail_number
    ON journal_entries (account_detail_number);
";

const PERIOD_RESULTS_SQL: &str = r"
CREATE TABLE period_results (
    id UUID PRIMARY KEY,
    year INTEGER NOT NULL UNIQUE,
    amount NUMERIC(18,2) NOT NULL DEFAULT 0,
    equity_account_id UUID NOT NULL REFERENCES account_details(id),
    is_closed BOOLEAN NOT NULL DEFAULT FALSE,
    created_by UUID NOT NULL,
    updated_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS period_results;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS ledger_entries;
DROP TABLE IF EXISTS account_details;
DROP TABLE IF EXISTS account_generals;

DROP TYPE IF EXISTS posting_status;
DROP TYPE IF EXISTS movement_type;
DROP TYPE IF EXISTS normal_side;
DROP TYPE IF EXISTS report_group;
DROP TYPE IF EXISTS account_category;
";
