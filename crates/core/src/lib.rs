//! Core budget aggregation logic for BudgetLens.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the [`store::BudgetStore`] trait only.
//!
//! # Modules
//!
//! - `fiscal` - Buddhist-Era fiscal years, fiscal month order and quarters
//! - `hierarchy` - The L1-L5 category tree, subtree walking and tree caching
//! - `metrics` - Plan/actual sums, variance and status classification
//! - `drilldown` - Level and parent-scoped drill-down views
//! - `visualization` - Treemap, heatmap and quarterly trend builders
//! - `entry` - Recording and listing monthly actual entries
//! - `store` - Persistent store contract and in-memory implementation

pub mod drilldown;
pub mod entry;
pub mod fiscal;
pub mod hierarchy;
pub mod metrics;
pub mod store;
pub mod visualization;

#[cfg(test)]
mod test_support;
