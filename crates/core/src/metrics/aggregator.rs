//! Per-node plan/actual sums across the current and neighbouring years.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::FiscalYear;
use crate::hierarchy::Subtree;
use crate::store::{BudgetStore, StoreError};

/// Historical and forward-looking figures shown next to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    /// Actual of the previous fiscal year.
    pub last_year_actual: Decimal,
    /// Actual of the fiscal year before that.
    pub two_years_ago_actual: Decimal,
    /// Plan of the next fiscal year.
    pub next_year_plan: Decimal,
}

/// Raw sums for one subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeFigures {
    /// Plan of the requested year.
    pub plan: Decimal,
    /// Actual of the requested year.
    pub actual: Decimal,
    /// History block.
    pub history: History,
}

/// Runs the independent sum queries for a subtree.
pub struct MetricAggregator<'a> {
    store: &'a dyn BudgetStore,
}

impl<'a> MetricAggregator<'a> {
    /// Creates an aggregator over `store`.
    #[must_use]
    pub const fn new(store: &'a dyn BudgetStore) -> Self {
        Self { store }
    }

    /// Computes the five sums for `scope`, concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError`; no partial figures are produced.
    pub async fn figures(&self, scope: &Subtree, fiscal_year: FiscalYear) -> Result<NodeFigures, StoreError> {
        if scope.is_empty() {
            return Ok(NodeFigures::default());
        }

        let (plan, actual, last_year_actual, two_years_ago_actual, next_year_plan) = futures::try_join!(
            self.store.sum_plan(fiscal_year, scope),
            self.store.sum_actual(fiscal_year, scope, None),
            self.store.sum_actual(fiscal_year.previous(), scope, None),
            self.store.sum_actual(fiscal_year.offset(-2), scope, None),
            self.store.sum_plan(fiscal_year.next(), scope),
        )?;

        Ok(NodeFigures {
            plan,
            actual,
            history: History {
                last_year_actual,
                two_years_ago_actual,
                next_year_plan,
            },
        })
    }

    /// Plan and actual of one year only.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError`.
    pub async fn plan_and_actual(
        &self,
        scope: &Subtree,
        fiscal_year: FiscalYear,
    ) -> Result<(Decimal, Decimal), StoreError> {
        if scope.is_empty() {
            return Ok((Decimal::ZERO, Decimal::ZERO));
        }
        futures::try_join!(
            self.store.sum_plan(fiscal_year, scope),
            self.store.sum_actual(fiscal_year, scope, None),
        )
    }
}
