//! Hierarchical drill-down aggregation.
//!
//! Given a fiscal year and a node, lists the next level of nodes with plan,
//! actual, variance and history figures rolled up from their subtrees.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::DrillDownError;
pub use service::{DrillDownService, parse_category_level};
pub use types::{DrillDownQuery, DrillDownResponse, DrillDownRow, NodeKind, ParentInfo};
