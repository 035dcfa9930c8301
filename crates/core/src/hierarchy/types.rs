//! Hierarchy data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use budgetlens_shared::types::{ActualEntryId, CategoryId, ItemId, PlanId, UserId};

use crate::fiscal::FiscalYear;

/// Deepest category level.
pub const MAX_LEVEL: u8 = 5;

/// Whether a branch of the tree books revenue or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Income lines; spending over plan is good news.
    Revenue,
    /// Cost lines; spending over plan is bad news.
    Expense,
}

impl CategoryType {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown category type: {other}")),
        }
    }
}

/// A node in the L1-L5 category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Short code; siblings are ordered by it.
    pub code: String,
    /// Depth, 1 (strategic) to 5.
    pub level: u8,
    /// Revenue or expense branch.
    pub category_type: CategoryType,
    /// Parent category, `None` at level 1.
    pub parent_id: Option<CategoryId>,
}

/// A procurement line owned by one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcurementItem {
    /// Item ID.
    pub id: ItemId,
    /// Owning category.
    pub category_id: CategoryId,
    /// Item name.
    pub name: String,
    /// Optional procurement code.
    pub code: Option<String>,
    /// Unit of measure.
    pub unit: String,
    /// Planned quantity.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// Owner of a planned amount: exactly one of a category or an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum PlanOwner {
    /// Plan booked against a category.
    Category(CategoryId),
    /// Plan booked against a procurement item.
    Item(ItemId),
}

/// Annual planned amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Plan ID.
    pub id: PlanId,
    /// Fiscal year.
    pub fiscal_year: FiscalYear,
    /// Planned amount.
    pub amount: Decimal,
    /// Category or item that owns the plan.
    pub owner: PlanOwner,
}

/// A recorded real transaction. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualEntry {
    /// Entry ID.
    pub id: ActualEntryId,
    /// Fiscal year.
    pub fiscal_year: FiscalYear,
    /// Calendar month number, 1-12.
    pub month: u32,
    /// Amount.
    pub amount: Decimal,
    /// Owning category, if booked against one.
    pub category_id: Option<CategoryId>,
    /// Owning procurement item, if booked against one.
    pub item_id: Option<ItemId>,
    /// Optional quantity received.
    pub quantity: Option<Decimal>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// User who recorded the entry.
    pub recorded_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ActualEntry {
    /// Returns true if this entry is owned by any id in the given sets.
    #[must_use]
    pub fn is_owned_by(
        &self,
        categories: &std::collections::BTreeSet<CategoryId>,
        items: &std::collections::BTreeSet<ItemId>,
    ) -> bool {
        self.category_id.is_some_and(|id| categories.contains(&id))
            || self.item_id.is_some_and(|id| items.contains(&id))
    }
}

/// Selection of actual entries for the data-entry listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualEntryFilter {
    /// Fiscal year.
    pub fiscal_year: FiscalYear,
    /// Restrict to entries booked against this category.
    pub category_id: Option<CategoryId>,
    /// Restrict to entries booked against this item.
    pub item_id: Option<ItemId>,
}

impl ActualEntryFilter {
    /// Returns true if `entry` matches every set criterion.
    #[must_use]
    pub fn matches(&self, entry: &ActualEntry) -> bool {
        entry.fiscal_year == self.fiscal_year
            && self.category_id.is_none_or(|id| entry.category_id == Some(id))
            && self.item_id.is_none_or(|id| entry.item_id == Some(id))
    }
}
