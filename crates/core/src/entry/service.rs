//! Actual entry service.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use budgetlens_shared::types::ActualEntryId;

use super::error::EntryError;
use super::types::{EntryListQuery, NewActualEntry};
use crate::fiscal::{FiscalYear, month_index};
use crate::hierarchy::{ActualEntry, ActualEntryFilter, CategoryTreeCache};
use crate::store::BudgetStore;

/// Exclusive upper bound of an amount once rounded to four places.
const AMOUNT_LIMIT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Decimal places kept for stored amounts.
const AMOUNT_SCALE: u32 = 4;

/// Validates and appends actual entries.
#[derive(Clone)]
pub struct ActualEntryService {
    store: Arc<dyn BudgetStore>,
    trees: CategoryTreeCache,
}

impl ActualEntryService {
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn BudgetStore>, trees: CategoryTreeCache) -> Self {
        Self { store, trees }
    }

    /// Records one entry.
    ///
    /// # Errors
    ///
    /// - `Fiscal` for a malformed year or month
    /// - `NegativeAmount`, `AmountTooLarge`, `MissingOwner` or
    ///   `ItemCategoryMismatch` for a malformed entry
    /// - `CategoryNotFound` / `ItemNotFound` for unknown owners
    /// - `Store` if the store fails
    #[instrument(skip(self, new), fields(fiscal_year = new.fiscal_year, month = new.month))]
    pub async fn record(&self, new: NewActualEntry) -> Result<ActualEntry, EntryError> {
        let fiscal_year = FiscalYear::new(new.fiscal_year)?;
        month_index(new.month)?;
        if new.amount < Decimal::ZERO {
            return Err(EntryError::NegativeAmount);
        }
        if new.amount.round_dp(AMOUNT_SCALE) >= AMOUNT_LIMIT {
            return Err(EntryError::AmountTooLarge);
        }
        if new.category_id.is_none() && new.item_id.is_none() {
            return Err(EntryError::MissingOwner);
        }

        if let Some(category_id) = new.category_id {
            let tree = self.trees.get_or_load(self.store.as_ref()).await?;
            if tree.get(category_id).is_none() {
                return Err(EntryError::CategoryNotFound(category_id));
            }
        }
        if let Some(item_id) = new.item_id {
            let item = self
                .store
                .find_item(item_id)
                .await?
                .ok_or(EntryError::ItemNotFound(item_id))?;
            if let Some(category_id) = new.category_id
                && item.category_id != category_id
            {
                return Err(EntryError::ItemCategoryMismatch {
                    item: item_id,
                    category: category_id,
                });
            }
        }

        let entry = ActualEntry {
            id: ActualEntryId::new(),
            fiscal_year,
            month: new.month,
            amount: new.amount,
            category_id: new.category_id,
            item_id: new.item_id,
            quantity: new.quantity,
            notes: new.notes,
            recorded_by: new.recorded_by,
            created_at: Utc::now(),
        };
        self.store.insert_actual_entry(&entry).await?;

        info!(entry_id = %entry.id, amount = %entry.amount, "Actual entry recorded");
        Ok(entry)
    }

    /// Entries of one fiscal year, ordered by fiscal month then creation time.
    ///
    /// # Errors
    ///
    /// Returns `Fiscal` for a malformed year, or `Store` if the store fails.
    pub async fn list(&self, query: EntryListQuery) -> Result<Vec<ActualEntry>, EntryError> {
        let filter = ActualEntryFilter {
            fiscal_year: FiscalYear::new(query.fiscal_year)?,
            category_id: query.category_id,
            item_id: query.item_id,
        };
        let mut entries = self.store.list_actual_entries(&filter).await?;
        entries.sort_by_key(|e| (month_index(e.month).unwrap_or(usize::MAX), e.created_at));
        Ok(entries)
    }
}

impl std::fmt::Debug for ActualEntryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActualEntryService")
            .field("trees", &self.trees)
            .finish_non_exhaustive()
    }
}
