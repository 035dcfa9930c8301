//! Persistent store contract.
//!
//! The aggregation core reads through [`BudgetStore`] only. The Postgres
//! adapter lives in the database crate; [`memory::MemoryStore`] serves tests
//! and local runs.

pub mod memory;

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use budgetlens_shared::types::{CategoryId, ItemId};

use crate::fiscal::FiscalYear;
use crate::hierarchy::{ActualEntry, ActualEntryFilter, BudgetCategory, ProcurementItem, Subtree};

pub use memory::MemoryStore;

/// Result alias for store calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store failures. Never retried by callers.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the query.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read queries used by the aggregation core plus the append-only entry write.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Every category record.
    async fn all_categories(&self) -> StoreResult<Vec<BudgetCategory>>;

    /// Procurement items owned by any of `category_ids`.
    async fn items_for_categories(
        &self,
        category_ids: &BTreeSet<CategoryId>,
    ) -> StoreResult<Vec<ProcurementItem>>;

    /// A single procurement item.
    async fn find_item(&self, id: ItemId) -> StoreResult<Option<ProcurementItem>>;

    /// Sum of planned amounts of `fiscal_year` owned by anything in `scope`.
    async fn sum_plan(&self, fiscal_year: FiscalYear, scope: &Subtree) -> StoreResult<Decimal>;

    /// Sum of actual entries of `fiscal_year` owned by anything in `scope`,
    /// optionally restricted to the given month numbers.
    async fn sum_actual(
        &self,
        fiscal_year: FiscalYear,
        scope: &Subtree,
        months: Option<&[u32]>,
    ) -> StoreResult<Decimal>;

    /// Actual sums of `fiscal_year` grouped by month number. Months without
    /// entries are absent.
    async fn monthly_actuals(
        &self,
        fiscal_year: FiscalYear,
        scope: &Subtree,
    ) -> StoreResult<BTreeMap<u32, Decimal>>;

    /// Actual entries matching `filter`.
    async fn list_actual_entries(&self, filter: &ActualEntryFilter) -> StoreResult<Vec<ActualEntry>>;

    /// Appends one actual entry.
    async fn insert_actual_entry(&self, entry: &ActualEntry) -> StoreResult<()>;
}
