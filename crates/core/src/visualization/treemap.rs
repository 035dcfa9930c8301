//! Treemap build.
//!
//! `size` is plan and `value` is actual. A node with child categories always
//! reports the exact sum of its children; only leaf categories read their own
//! figures (including the procurement items they own).

use std::collections::HashMap;

use futures::future::try_join_all;
use rust_decimal::Decimal;
use serde::Serialize;

use budgetlens_shared::types::CategoryId;

use crate::drilldown::{DrillDownError, DrillDownService};
use crate::fiscal::FiscalYear;
use crate::hierarchy::{CategoryFilter, CategoryTree, CategoryType, TreeWalker};
use crate::metrics::MetricAggregator;

/// One treemap node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreemapNode {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: String,
    /// Level number.
    pub level: u8,
    /// Revenue or expense.
    pub category_type: CategoryType,
    /// Planned amount.
    pub size: Decimal,
    /// Actual amount.
    pub value: Decimal,
    /// Child categories, ordered by code.
    pub children: Vec<TreemapNode>,
}

/// Builds treemaps from a drill-down service's store and tree.
pub struct TreemapBuilder<'a> {
    service: &'a DrillDownService,
}

impl<'a> TreemapBuilder<'a> {
    /// Creates a builder.
    #[must_use]
    pub const fn new(service: &'a DrillDownService) -> Self {
        Self { service }
    }

    /// Builds the tree below `root`, or the whole forest of level-1 nodes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a malformed fiscal year, `CategoryNotFound`
    /// for an unknown root, or `Store` if any sum fails.
    pub async fn build(
        &self,
        fiscal_year: i32,
        root: Option<CategoryId>,
    ) -> Result<Vec<TreemapNode>, DrillDownError> {
        let fiscal_year = FiscalYear::new(fiscal_year)?;
        let tree = self.service.tree().await?;

        let roots: Vec<CategoryId> = match root {
            Some(id) => {
                tree.get(id).ok_or(DrillDownError::CategoryNotFound(id))?;
                vec![id]
            }
            None => tree
                .select(&CategoryFilter::children_of(None, 1))
                .iter()
                .map(|c| c.id)
                .collect(),
        };

        let leaves: Vec<CategoryId> = roots.iter().flat_map(|id| tree.leaf_ids(*id)).collect();
        let leaf_figures = self.leaf_figures(&tree, &leaves, fiscal_year).await?;

        Ok(roots
            .into_iter()
            .filter_map(|id| assemble(&tree, id, &leaf_figures))
            .collect())
    }

    async fn leaf_figures(
        &self,
        tree: &CategoryTree,
        leaves: &[CategoryId],
        fiscal_year: FiscalYear,
    ) -> Result<HashMap<CategoryId, (Decimal, Decimal)>, DrillDownError> {
        let store = self.service.store();
        let figures = try_join_all(leaves.iter().map(|id| async move {
            let subtree = TreeWalker::new(tree, store).walk(*id).await?;
            let sums = MetricAggregator::new(store)
                .plan_and_actual(&subtree, fiscal_year)
                .await?;
            Ok::<_, DrillDownError>((*id, sums))
        }))
        .await?;

        Ok(figures.into_iter().collect())
    }
}

fn assemble(
    tree: &CategoryTree,
    id: CategoryId,
    leaf_figures: &HashMap<CategoryId, (Decimal, Decimal)>,
) -> Option<TreemapNode> {
    let category = tree.get(id)?;
    let children: Vec<TreemapNode> = tree
        .children(id)
        .filter_map(|child| assemble(tree, child.id, leaf_figures))
        .collect();

    let (size, value) = if children.is_empty() {
        leaf_figures.get(&id).copied().unwrap_or_default()
    } else {
        children
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(size, value), child| {
                (size + child.size, value + child.value)
            })
    };

    Some(TreemapNode {
        id,
        name: category.name.clone(),
        code: category.code.clone(),
        level: category.level,
        category_type: category.category_type,
        size,
        value,
        children,
    })
}
