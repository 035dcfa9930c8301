//! Initial database migration.
//!
//! Creates the category hierarchy, procurement items, planned amounts and the
//! append-only monthly actual entries.

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
        // PART 2: HIERARCHY
        // ============================================================
        db.execute_unprepared(BUDGET_CATEGORIES_SQL).await?;
        db.execute_unprepared(PROCUREMENT_ITEMS_SQL).await?;

        // ============================================================
        // PART 3: FIGURES
        // ============================================================
        db.execute_unprepared(PLAN_FINANCIAL_DATA_SQL).await?;
        db.execute_unprepared(MONTHLY_ACTUAL_ENTRIES_SQL).await?;

        // ============================================================
        // PART 4: TRIGGERS
        // ============================================================
        db.execute_unprepared(APPEND_ONLY_SQL).await?;

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
CREATE TYPE category_type AS ENUM ('revenue', 'expense');
";

const BUDGET_CATEGORIES_SQL: &str = r"
CREATE TABLE budget_categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    code VARCHAR(50) NOT NULL UNIQUE,
    level SMALLINT NOT NULL,
    category_type category_type NOT NULL,
    parent_id UUID REFERENCES budget_categories(id) ON DELETE RESTRICT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_category_level CHECK (level BETWEEN 1 AND 5),
    CONSTRAINT chk_category_root CHECK ((level = 1) = (parent_id IS NULL))
);

CREATE INDEX idx_budget_categories_parent ON budget_categories(parent_id, code);
CREATE INDEX idx_budget_categories_level ON budget_categories(level, code);
";

const PROCUREMENT_ITEMS_SQL: &str = r"
CREATE TABLE procurement_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category_id UUID NOT NULL REFERENCES budget_categories(id) ON DELETE RESTRICT,
    name VARCHAR(255) NOT NULL,
    code VARCHAR(50),
    unit VARCHAR(50) NOT NULL,
    quantity NUMERIC(19, 4) NOT NULL DEFAULT 0,
    unit_price NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_procurement_items_category ON procurement_items(category_id);
";

const PLAN_FINANCIAL_DATA_SQL: &str = r"
CREATE TABLE plan_financial_data (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    fiscal_year INTEGER NOT NULL,
    category_id UUID REFERENCES budget_categories(id) ON DELETE CASCADE,
    item_id UUID REFERENCES procurement_items(id) ON DELETE CASCADE,
    amount NUMERIC(19, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Exactly one owner per plan row
    CONSTRAINT chk_plan_single_owner CHECK ((category_id IS NULL) <> (item_id IS NULL))
);

CREATE INDEX idx_plan_category ON plan_financial_data(fiscal_year, category_id) WHERE category_id IS NOT NULL;
CREATE INDEX idx_plan_item ON plan_financial_data(fiscal_year, item_id) WHERE item_id IS NOT NULL;
";

const MONTHLY_ACTUAL_ENTRIES_SQL: &str = r"
CREATE TABLE monthly_actual_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    fiscal_year INTEGER NOT NULL,
    month SMALLINT NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    category_id UUID REFERENCES budget_categories(id) ON DELETE RESTRICT,
    item_id UUID REFERENCES procurement_items(id) ON DELETE RESTRICT,
    quantity NUMERIC(19, 4),
    notes TEXT,
    recorded_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_entry_month CHECK (month BETWEEN 1 AND 12),
    CONSTRAINT chk_entry_amount CHECK (amount >= 0),
    CONSTRAINT chk_entry_owner CHECK (category_id IS NOT NULL OR item_id IS NOT NULL)
);

CREATE INDEX idx_actual_category ON monthly_actual_entries(fiscal_year, category_id, month) WHERE category_id IS NOT NULL;
CREATE INDEX idx_actual_item ON monthly_actual_entries(fiscal_year, item_id, month) WHERE item_id IS NOT NULL;
";

const APPEND_ONLY_SQL: &str = r"
-- ============================================================
-- FUNCTION: prevent_actual_entry_modification
-- Actual entries are append-only; corrections are new entries
-- ============================================================
CREATE OR REPLACE FUNCTION prevent_actual_entry_modification()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'Actual entries are append-only. Record a correcting entry instead.';
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_actual_entries_append_only
BEFORE UPDATE OR DELETE ON monthly_actual_entries
FOR EACH ROW
EXECUTE FUNCTION prevent_actual_entry_modification();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS monthly_actual_entries CASCADE;
DROP TABLE IF EXISTS plan_financial_data CASCADE;
DROP TABLE IF EXISTS procurement_items CASCADE;
DROP TABLE IF EXISTS budget_categories CASCADE;
DROP FUNCTION IF EXISTS prevent_actual_entry_modification();
DROP TYPE IF EXISTS category_type;
";
