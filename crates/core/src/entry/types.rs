//! Actual entry request types.

use rust_decimal::Decimal;
use serde::Deserialize;

use budgetlens_shared::types::{CategoryId, ItemId, UserId};

/// A new actual entry as submitted by a data-entry user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewActualEntry {
    /// Fiscal year (Buddhist Era).
    pub fiscal_year: i32,
    /// Calendar month number, 1-12.
    pub month: u32,
    /// Amount; zero is allowed, negative is not.
    pub amount: Decimal,
    /// Owning category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Owning procurement item.
    #[serde(default)]
    pub item_id: Option<ItemId>,
    /// Quantity received.
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Recording user; taken from the caller's token, never from the body.
    #[serde(skip)]
    pub recorded_by: UserId,
}

/// Listing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EntryListQuery {
    /// Fiscal year (Buddhist Era).
    pub fiscal_year: i32,
    /// Only entries booked against this category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Only entries booked against this item.
    #[serde(default)]
    pub item_id: Option<ItemId>,
}
