//! Drill-down error types.

use budgetlens_shared::AppError;
use budgetlens_shared::types::CategoryId;
use thiserror::Error;

use crate::fiscal::FiscalError;
use crate::store::StoreError;

/// Errors raised by the read-side aggregation services.
#[derive(Debug, Error)]
pub enum DrillDownError {
    /// Malformed level or fiscal year, or a level-5 request without a parent.
    #[error("{0}")]
    InvalidArgument(String),

    /// The requested category does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// The store failed; the whole request fails with it.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<FiscalError> for DrillDownError {
    fn from(e: FiscalError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

impl From<DrillDownError> for AppError {
    fn from(e: DrillDownError) -> Self {
        match e {
            DrillDownError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            DrillDownError::CategoryNotFound(_) => Self::NotFound(e.to_string()),
            DrillDownError::Store(inner) => Self::StoreUnavailable(inner.to_string()),
        }
    }
}
