//! Top-spend heatmap: monthly actual against a flat monthly target.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use budgetlens_shared::types::CategoryId;

use crate::drilldown::{DrillDownError, DrillDownService, parse_category_level};
use crate::fiscal::FiscalYear;
use crate::hierarchy::{BudgetCategory, CategoryFilter, CategoryTree, CategoryType, TreeWalker};
use crate::metrics::{FinancialMetrics, MetricAggregator, VarianceStatus};

/// Number of categories in a heatmap.
pub const TOP_CATEGORIES: usize = 10;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// One month of one heatmap row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    /// Calendar month number.
    pub month: u32,
    /// Actual booked in the month.
    pub actual: Decimal,
    /// Annual plan divided by twelve.
    pub target: Decimal,
    /// `actual - target`.
    pub variance: Decimal,
    /// Variance as a percentage of target.
    pub variance_percent: Decimal,
    /// Traffic-light status of the month.
    pub status: VarianceStatus,
}

/// One category with its twelve fiscal months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: String,
    /// Annual plan.
    pub plan: Decimal,
    /// Annual actual.
    pub actual: Decimal,
    /// Months in fiscal order, October first.
    pub months: Vec<HeatmapCell>,
}

struct Ranked<'t> {
    category: &'t BudgetCategory,
    plan: Decimal,
    actual: Decimal,
    monthly: BTreeMap<u32, Decimal>,
}

/// Builds heatmaps from a drill-down service's store and tree.
pub struct HeatmapBuilder<'a> {
    service: &'a DrillDownService,
}

impl<'a> HeatmapBuilder<'a> {
    /// Creates a builder.
    #[must_use]
    pub const fn new(service: &'a DrillDownService) -> Self {
        Self { service }
    }

    /// The ten expense categories at `level` with the highest actual spend.
    ///
    /// Ties keep code order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a malformed level or fiscal year, or
    /// `Store` if any store call fails.
    #[instrument(skip(self))]
    pub async fn build(&self, fiscal_year: i32, level: i32) -> Result<Vec<HeatmapRow>, DrillDownError> {
        let fiscal_year = FiscalYear::new(fiscal_year)?;
        let level = parse_category_level(level)?;

        let tree = self.service.tree().await?;
        let filter = CategoryFilter::at_level(level).of_type(Some(CategoryType::Expense));
        let categories = tree.select(&filter);

        let mut ranked = try_join_all(
            categories
                .iter()
                .map(|category| self.rank(&tree, category, fiscal_year)),
        )
        .await?;
        ranked.sort_by(|a, b| b.actual.cmp(&a.actual));
        ranked.truncate(TOP_CATEGORIES);

        Ok(ranked
            .into_iter()
            .map(|r| row(r, fiscal_year))
            .collect())
    }

    async fn rank<'t>(
        &self,
        tree: &'t CategoryTree,
        category: &'t BudgetCategory,
        fiscal_year: FiscalYear,
    ) -> Result<Ranked<'t>, DrillDownError> {
        let store = self.service.store();
        let aggregator = MetricAggregator::new(store);
        let subtree = TreeWalker::new(tree, store).walk(category.id).await?;
        let ((plan, actual), monthly) = futures::try_join!(
            aggregator.plan_and_actual(&subtree, fiscal_year),
            store.monthly_actuals(fiscal_year, &subtree),
        )?;

        Ok(Ranked {
            category,
            plan,
            actual,
            monthly,
        })
    }
}

fn row(ranked: Ranked<'_>, fiscal_year: FiscalYear) -> HeatmapRow {
    let target = (ranked.plan / MONTHS_PER_YEAR).round_dp(2);
    let months = fiscal_year
        .months()
        .into_iter()
        .map(|month| {
            let actual = ranked.monthly.get(&month).copied().unwrap_or_default();
            let metrics = FinancialMetrics::compute(target, actual, CategoryType::Expense);
            HeatmapCell {
                month,
                actual,
                target,
                variance: metrics.variance,
                variance_percent: metrics.variance_percent,
                status: metrics.status,
            }
        })
        .collect();

    HeatmapRow {
        id: ranked.category.id,
        name: ranked.category.name.clone(),
        code: ranked.category.code.clone(),
        plan: ranked.plan,
        actual: ranked.actual,
        months,
    }
}
