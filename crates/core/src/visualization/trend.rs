//! Quarterly actual series for sparklines.

use futures::TryFutureExt;
use futures::future::try_join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use budgetlens_shared::types::CategoryId;

use crate::drilldown::{DrillDownError, DrillDownService};
use crate::fiscal::{FiscalYear, Quarter};
use crate::hierarchy::{Subtree, TreeWalker};
use crate::store::BudgetStore;

/// Years returned when the caller does not ask for a count.
pub const DEFAULT_YEARS: u32 = 3;

/// Upper bound on the number of years in one series.
pub const MAX_YEARS: u32 = 5;

/// Actual of one fiscal quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterActual {
    /// Quarter.
    pub quarter: Quarter,
    /// Actual booked in the quarter's three months.
    pub actual: Decimal,
}

/// One fiscal year of a trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTrend {
    /// Fiscal year.
    pub fiscal_year: FiscalYear,
    /// Annual plan.
    pub plan: Decimal,
    /// Annual actual; equals the sum of `quarters`.
    pub actual: Decimal,
    /// Q1 to Q4.
    pub quarters: Vec<QuarterActual>,
}

/// Trend of one category, oldest year first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSeries {
    /// Category ID.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
    /// Years, oldest first, ending at the requested year.
    pub years: Vec<YearTrend>,
}

/// Builds quarterly trends from a drill-down service's store and tree.
pub struct TrendBuilder<'a> {
    service: &'a DrillDownService,
}

impl<'a> TrendBuilder<'a> {
    /// Creates a builder.
    #[must_use]
    pub const fn new(service: &'a DrillDownService) -> Self {
        Self { service }
    }

    /// Quarterly actuals of `category_id` for the `years` fiscal years ending
    /// at `fiscal_year`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a malformed year or a count outside 1-5,
    /// `CategoryNotFound` for an unknown category, or `Store` if any sum fails.
    #[instrument(skip(self))]
    pub async fn quarterly(
        &self,
        fiscal_year: i32,
        category_id: CategoryId,
        years: Option<u32>,
    ) -> Result<TrendSeries, DrillDownError> {
        let fiscal_year = FiscalYear::new(fiscal_year)?;
        let years = years.unwrap_or(DEFAULT_YEARS);
        if !(1..=MAX_YEARS).contains(&years) {
            return Err(DrillDownError::InvalidArgument(format!(
                "years must be between 1 and {MAX_YEARS}, got {years}"
            )));
        }

        let tree = self.service.tree().await?;
        let category = tree
            .get(category_id)
            .ok_or(DrillDownError::CategoryNotFound(category_id))?;
        let store = self.service.store();
        let subtree = TreeWalker::new(&tree, store).walk(category_id).await?;

        let span = i32::try_from(years).map_err(|e| DrillDownError::InvalidArgument(e.to_string()))?;
        let series = try_join_all(
            (1 - span..=0).map(|offset| year_trend(store, &subtree, fiscal_year.offset(offset))),
        )
        .await?;

        Ok(TrendSeries {
            category_id,
            name: category.name.clone(),
            years: series,
        })
    }
}

async fn year_trend(
    store: &dyn BudgetStore,
    scope: &Subtree,
    fiscal_year: FiscalYear,
) -> Result<YearTrend, DrillDownError> {
    let plan = store
        .sum_plan(fiscal_year, scope)
        .err_into::<DrillDownError>();
    let quarters = try_join_all(Quarter::ALL.into_iter().map(|quarter| async move {
        let months = quarter.months();
        let actual = store.sum_actual(fiscal_year, scope, Some(months.as_slice())).await?;
        Ok::<_, DrillDownError>(QuarterActual { quarter, actual })
    }));
    let (plan, quarters) = futures::try_join!(plan, quarters)?;
    let actual = quarters.iter().map(|q| q.actual).sum();

    Ok(YearTrend {
        fiscal_year,
        plan,
        actual,
        quarters,
    })
}
