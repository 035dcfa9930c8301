//! In-memory store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use budgetlens_shared::types::{CategoryId, ItemId};

use super::{BudgetStore, StoreError, StoreResult};
use crate::fiscal::FiscalYear;
use crate::hierarchy::{
    ActualEntry, ActualEntryFilter, BudgetCategory, PlanOwner, PlanRecord, ProcurementItem,
    Subtree,
};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<BudgetCategory>,
    items: Vec<ProcurementItem>,
    plans: Vec<PlanRecord>,
    entries: Vec<ActualEntry>,
}

/// A [`BudgetStore`] over vectors guarded by a lock.
///
/// Sums are computed by scanning; results match the SQL adapter exactly.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
    category_loads: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category.
    pub fn add_category(&self, category: BudgetCategory) {
        self.write(|t| t.categories.push(category));
    }

    /// Adds a procurement item.
    pub fn add_item(&self, item: ProcurementItem) {
        self.write(|t| t.items.push(item));
    }

    /// Adds a plan record.
    pub fn add_plan(&self, plan: PlanRecord) {
        self.write(|t| t.plans.push(plan));
    }

    /// Adds an actual entry without validation.
    pub fn add_entry(&self, entry: ActualEntry) {
        self.write(|t| t.entries.push(entry));
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of times the category table has been read.
    #[must_use]
    pub fn category_loads(&self) -> usize {
        self.category_loads.load(Ordering::SeqCst)
    }

    fn write(&self, f: impl FnOnce(&mut Tables)) {
        let mut tables = self
            .tables
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut tables);
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> StoreResult<T> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        let tables = self
            .tables
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(f(&tables))
    }
}

fn plan_in_scope(plan: &PlanRecord, scope: &Subtree) -> bool {
    match plan.owner {
        PlanOwner::Category(id) => scope.category_ids.contains(&id),
        PlanOwner::Item(id) => scope.item_ids.contains(&id),
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn all_categories(&self) -> StoreResult<Vec<BudgetCategory>> {
        self.category_loads.fetch_add(1, Ordering::SeqCst);
        self.read(|t| t.categories.clone())
    }

    async fn items_for_categories(
        &self,
        category_ids: &BTreeSet<CategoryId>,
    ) -> StoreResult<Vec<ProcurementItem>> {
        self.read(|t| {
            t.items
                .iter()
                .filter(|item| category_ids.contains(&item.category_id))
                .cloned()
                .collect()
        })
    }

    async fn find_item(&self, id: ItemId) -> StoreResult<Option<ProcurementItem>> {
        self.read(|t| t.items.iter().find(|item| item.id == id).cloned())
    }

    async fn sum_plan(&self, fiscal_year: FiscalYear, scope: &Subtree) -> StoreResult<Decimal> {
        self.read(|t| {
            t.plans
                .iter()
                .filter(|p| p.fiscal_year == fiscal_year && plan_in_scope(p, scope))
                .map(|p| p.amount)
                .sum()
        })
    }

    async fn sum_actual(
        &self,
        fiscal_year: FiscalYear,
        scope: &Subtree,
        months: Option<&[u32]>,
    ) -> StoreResult<Decimal> {
        self.read(|t| {
            t.entries
                .iter()
                .filter(|e| e.fiscal_year == fiscal_year)
                .filter(|e| months.is_none_or(|m| m.contains(&e.month)))
                .filter(|e| e.is_owned_by(&scope.category_ids, &scope.item_ids))
                .map(|e| e.amount)
                .sum()
        })
    }

    async fn monthly_actuals(
        &self,
        fiscal_year: FiscalYear,
        scope: &Subtree,
    ) -> StoreResult<BTreeMap<u32, Decimal>> {
        self.read(|t| {
            let mut by_month: BTreeMap<u32, Decimal> = BTreeMap::new();
            for entry in t
                .entries
                .iter()
                .filter(|e| e.fiscal_year == fiscal_year)
                .filter(|e| e.is_owned_by(&scope.category_ids, &scope.item_ids))
            {
                *by_month.entry(entry.month).or_default() += entry.amount;
            }
            by_month
        })
    }

    async fn list_actual_entries(&self, filter: &ActualEntryFilter) -> StoreResult<Vec<ActualEntry>> {
        self.read(|t| t.entries.iter().filter(|e| filter.matches(e)).cloned().collect())
    }

    async fn insert_actual_entry(&self, entry: &ActualEntry) -> StoreResult<()> {
        self.read(|_| ())?;
        self.add_entry(entry.clone());
        Ok(())
    }
}
