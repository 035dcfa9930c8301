//! Actual entry error types.

use budgetlens_shared::AppError;
use budgetlens_shared::types::{CategoryId, ItemId};
use thiserror::Error;

use crate::fiscal::FiscalError;
use crate::store::StoreError;

/// Errors raised while recording or listing actual entries.
#[derive(Debug, Error)]
pub enum EntryError {
    /// Malformed fiscal year or month.
    #[error(transparent)]
    Fiscal(#[from] FiscalError),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Amount does not fit the stored precision.
    #[error("Amount must be below 1,000,000,000,000,000")]
    AmountTooLarge,

    /// Neither a category nor an item was given.
    #[error("An entry must reference a category or a procurement item")]
    MissingOwner,

    /// Item does not belong to the given category.
    #[error("Item {item} does not belong to category {category}")]
    ItemCategoryMismatch {
        /// Item given.
        item: ItemId,
        /// Category given.
        category: CategoryId,
    },

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Procurement item not found.
    #[error("Procurement item not found: {0}")]
    ItemNotFound(ItemId),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<EntryError> for AppError {
    fn from(e: EntryError) -> Self {
        match e {
            EntryError::CategoryNotFound(_) | EntryError::ItemNotFound(_) => {
                Self::NotFound(e.to_string())
            }
            EntryError::Store(inner) => Self::StoreUnavailable(inner.to_string()),
            EntryError::Fiscal(_)
            | EntryError::NegativeAmount
            | EntryError::AmountTooLarge
            | EntryError::MissingOwner
            | EntryError::ItemCategoryMismatch { .. } => Self::InvalidArgument(e.to_string()),
        }
    }
}
