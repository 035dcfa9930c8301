//! Drill-down orchestration.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, instrument};

use budgetlens_shared::types::CategoryId;

use super::error::DrillDownError;
use super::types::{DrillDownQuery, DrillDownResponse, DrillDownRow, NodeKind, ParentInfo, level_tag};
use crate::fiscal::FiscalYear;
use crate::hierarchy::{
    BudgetCategory, CategoryFilter, CategoryTree, CategoryTreeCache, CategoryType, MAX_LEVEL,
    ProcurementItem, Subtree, TreeWalker,
};
use crate::metrics::{FinancialMetrics, MetricAggregator};
use crate::store::BudgetStore;

/// Deepest level a drill-down can start from.
const MAX_VIEW_LEVEL: i32 = 4;

/// Read-only aggregation over the category hierarchy.
///
/// Holds no per-request state; every call loads (or reuses) the cached tree
/// and computes rows independently.
#[derive(Clone)]
pub struct DrillDownService {
    store: Arc<dyn BudgetStore>,
    trees: CategoryTreeCache,
}

impl DrillDownService {
    /// Creates a service over `store`, sharing `trees` with other services.
    #[must_use]
    pub fn new(store: Arc<dyn BudgetStore>, trees: CategoryTreeCache) -> Self {
        Self { store, trees }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn BudgetStore {
        self.store.as_ref()
    }

    /// Returns the loaded category tree.
    ///
    /// # Errors
    ///
    /// Returns `DrillDownError::Store` if the tree cannot be loaded.
    pub async fn tree(&self) -> Result<Arc<CategoryTree>, DrillDownError> {
        Ok(self.trees.get_or_load(self.store.as_ref()).await?)
    }

    /// Lists the nodes one level below `query.parent_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a level outside 0-4, a malformed fiscal year, or
    ///   level 4 without a parent
    /// - `CategoryNotFound` if the parent does not exist
    /// - `Store` if any store call fails
    #[instrument(skip(self))]
    pub async fn drill_down(&self, query: DrillDownQuery) -> Result<DrillDownResponse, DrillDownError> {
        let fiscal_year = FiscalYear::new(query.fiscal_year)?;
        if !(0..=MAX_VIEW_LEVEL).contains(&query.level) {
            return Err(DrillDownError::InvalidArgument(format!(
                "level must be between 0 and {MAX_VIEW_LEVEL}, got {}",
                query.level
            )));
        }
        if query.level == MAX_VIEW_LEVEL && query.parent_id.is_none() {
            return Err(DrillDownError::InvalidArgument(
                "level 4 drill-down requires a parent category".to_string(),
            ));
        }

        let tree = self.tree().await?;
        let parent = match query.parent_id {
            Some(id) => Some(tree.get(id).ok_or(DrillDownError::CategoryNotFound(id))?),
            None => None,
        };

        let items = match parent {
            Some(parent) if query.level == MAX_VIEW_LEVEL => {
                self.item_rows(parent, fiscal_year).await?
            }
            _ => {
                let next_level = u8::try_from(query.level + 1)
                    .map_err(|e| DrillDownError::InvalidArgument(e.to_string()))?;
                let filter = CategoryFilter::children_of(query.parent_id, next_level);
                self.category_rows(&tree, &tree.select(&filter), fiscal_year)
                    .await?
            }
        };

        debug!(rows = items.len(), "Drill-down computed");
        Ok(DrillDownResponse {
            parent: parent.map(ParentInfo::from),
            items,
        })
    }

    /// Lists every category at `level` (1-5), optionally of one type.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a malformed level or fiscal year, or
    /// `Store` if any store call fails.
    #[instrument(skip(self))]
    pub async fn level_overview(
        &self,
        fiscal_year: i32,
        level: i32,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<DrillDownRow>, DrillDownError> {
        let fiscal_year = FiscalYear::new(fiscal_year)?;
        let level = parse_category_level(level)?;

        let tree = self.tree().await?;
        let filter = CategoryFilter::at_level(level).of_type(category_type);
        self.category_rows(&tree, &tree.select(&filter), fiscal_year)
            .await
    }

    async fn category_rows(
        &self,
        tree: &CategoryTree,
        categories: &[&BudgetCategory],
        fiscal_year: FiscalYear,
    ) -> Result<Vec<DrillDownRow>, DrillDownError> {
        try_join_all(
            categories
                .iter()
                .map(|category| self.category_row(tree, category, fiscal_year)),
        )
        .await
    }

    async fn category_row(
        &self,
        tree: &CategoryTree,
        category: &BudgetCategory,
        fiscal_year: FiscalYear,
    ) -> Result<DrillDownRow, DrillDownError> {
        let subtree = TreeWalker::new(tree, self.store()).walk(category.id).await?;
        let figures = MetricAggregator::new(self.store())
            .figures(&subtree, fiscal_year)
            .await?;
        let has_children =
            tree.has_child_categories(category.id) || !subtree.direct_item_ids.is_empty();

        Ok(DrillDownRow::for_category(category, has_children, figures))
    }

    async fn item_rows(
        &self,
        parent: &BudgetCategory,
        fiscal_year: FiscalYear,
    ) -> Result<Vec<DrillDownRow>, DrillDownError> {
        let mut items = self.direct_items(parent.id).await?;
        items.sort_by(|a, b| {
            (a.code.is_none(), &a.code, &a.name).cmp(&(b.code.is_none(), &b.code, &b.name))
        });

        try_join_all(
            items
                .iter()
                .map(|item| self.item_row(item, parent.category_type, fiscal_year)),
        )
        .await
    }

    async fn item_row(
        &self,
        item: &ProcurementItem,
        category_type: CategoryType,
        fiscal_year: FiscalYear,
    ) -> Result<DrillDownRow, DrillDownError> {
        let figures = MetricAggregator::new(self.store())
            .figures(&Subtree::item(item.id), fiscal_year)
            .await?;

        Ok(DrillDownRow {
            id: item.id.into_inner(),
            kind: NodeKind::Item,
            name: item.name.clone(),
            code: item.code.clone(),
            level: level_tag(MAX_LEVEL),
            category_type,
            has_children: false,
            financial: FinancialMetrics::compute(figures.plan, figures.actual, category_type),
            history: figures.history,
        })
    }

    /// Procurement items owned directly by `category_id`.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the lookup fails.
    pub async fn direct_items(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProcurementItem>, DrillDownError> {
        let items = self
            .store
            .items_for_categories(&BTreeSet::from([category_id]))
            .await?;
        Ok(items)
    }
}

/// Validates a category level (1-5).
///
/// # Errors
///
/// Returns `InvalidArgument` outside 1-5.
pub fn parse_category_level(level: i32) -> Result<u8, DrillDownError> {
    u8::try_from(level)
        .ok()
        .filter(|l| (1..=MAX_LEVEL).contains(l))
        .ok_or_else(|| {
            DrillDownError::InvalidArgument(format!(
                "level must be between 1 and {MAX_LEVEL}, got {level}"
            ))
        })
}

impl std::fmt::Debug for DrillDownService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrillDownService")
            .field("trees", &self.trees)
            .finish_non_exhaustive()
    }
}
