//! Drill-down request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use budgetlens_shared::types::CategoryId;

use crate::hierarchy::{BudgetCategory, CategoryType};
use crate::metrics::{FinancialMetrics, History, NodeFigures};

/// Drill-down request.
///
/// `level` is the depth being viewed: 0 asks for level-1 nodes, 4 asks for the
/// procurement items of a level-4 category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DrillDownQuery {
    /// Fiscal year (Buddhist Era).
    pub fiscal_year: i32,
    /// Node being expanded; `None` for the root view.
    pub parent_id: Option<CategoryId>,
    /// Current depth, 0-4.
    pub level: i32,
}

/// Kind of node in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A budget category.
    Category,
    /// A procurement item.
    Item,
}

/// One computed row. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrillDownRow {
    /// Category or item ID.
    pub id: Uuid,
    /// Category or item.
    pub kind: NodeKind,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: Option<String>,
    /// Level tag, `L1` to `L5`.
    pub level: String,
    /// Revenue or expense sense used for the status.
    pub category_type: CategoryType,
    /// Whether the row can be expanded further.
    pub has_children: bool,
    /// Plan vs actual block.
    pub financial: FinancialMetrics,
    /// History block.
    pub history: History,
}

impl DrillDownRow {
    /// Builds a category row.
    #[must_use]
    pub fn for_category(category: &BudgetCategory, has_children: bool, figures: NodeFigures) -> Self {
        Self {
            id: category.id.into_inner(),
            kind: NodeKind::Category,
            name: category.name.clone(),
            code: Some(category.code.clone()),
            level: level_tag(category.level),
            category_type: category.category_type,
            has_children,
            financial: FinancialMetrics::compute(figures.plan, figures.actual, category.category_type),
            history: figures.history,
        }
    }
}

/// Formats a level tag.
#[must_use]
pub fn level_tag(level: u8) -> String {
    format!("L{level}")
}

/// The expanded node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentInfo {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Level number.
    pub level: u8,
}

impl From<&BudgetCategory> for ParentInfo {
    fn from(category: &BudgetCategory) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            level: category.level,
        }
    }
}

/// Drill-down response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrillDownResponse {
    /// Expanded node, `None` at the root.
    pub parent: Option<ParentInfo>,
    /// Rows of the next level, ordered by code.
    pub items: Vec<DrillDownRow>,
}
