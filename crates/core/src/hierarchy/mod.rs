//! The five-level budget category hierarchy.
//!
//! - `types` - categories, procurement items, plan records and actual entries
//! - `tree` - in-memory category tree and level/parent selection
//! - `walker` - subtree resolution (descendant categories and items)
//! - `cache` - process-wide cache of the loaded tree

pub mod cache;
pub mod tree;
pub mod types;
pub mod walker;

pub use cache::CategoryTreeCache;
pub use tree::{CategoryFilter, CategoryTree, ParentFilter};
pub use types::{
    ActualEntry, ActualEntryFilter, BudgetCategory, CategoryType, MAX_LEVEL, PlanOwner,
    PlanRecord, ProcurementItem,
};
pub use walker::{Subtree, TreeWalker};
