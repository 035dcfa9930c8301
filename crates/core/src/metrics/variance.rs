//! Variance calculations.
//!
//! Missing plan or actual rows count as zero, and a zero plan always yields a
//! zero percentage. Both rules live here and nowhere else.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::hierarchy::CategoryType;

/// Threshold, in percent, beyond which a variance is flagged as danger.
const DANGER_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Traffic-light status of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceStatus {
    /// On or better than plan.
    Success,
    /// Slightly off plan in the unfavourable direction.
    Warning,
    /// More than 5% off plan in the unfavourable direction.
    Danger,
}

impl VarianceStatus {
    /// Classifies a variance percentage.
    ///
    /// Expense nodes go bad when actual exceeds plan; revenue nodes go bad when
    /// actual falls short of it.
    #[must_use]
    pub fn classify(variance_percent: Decimal, category_type: CategoryType) -> Self {
        let unfavourable = match category_type {
            CategoryType::Expense => variance_percent,
            CategoryType::Revenue => -variance_percent,
        };

        if unfavourable > DANGER_THRESHOLD {
            Self::Danger
        } else if unfavourable > Decimal::ZERO {
            Self::Warning
        } else {
            Self::Success
        }
    }
}

/// Treats a missing aggregate as zero.
#[must_use]
pub fn amount_or_zero(amount: Option<Decimal>) -> Decimal {
    amount.unwrap_or(Decimal::ZERO)
}

/// `part / whole * 100` at full precision, or zero when `whole` is zero.
///
/// A quotient beyond the `Decimal` range saturates at `Decimal::MAX` or
/// `Decimal::MIN` according to its sign.
#[must_use]
pub fn exact_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }

    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// [`exact_percent`] rounded to two places for display.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    exact_percent(part, whole).round_dp(2)
}

/// Plan vs actual figures of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Planned amount.
    pub plan: Decimal,
    /// Actual amount.
    pub actual: Decimal,
    /// `actual - plan`.
    pub variance: Decimal,
    /// `variance / plan * 100` to two places, zero when plan is zero.
    pub variance_percent: Decimal,
    /// `actual / plan * 100` to two places, zero when plan is zero.
    pub utilization_percent: Decimal,
    /// Status classified on the unrounded variance percentage.
    pub status: VarianceStatus,
}

impl FinancialMetrics {
    /// Derives variance, percentages and status from plan and actual.
    #[must_use]
    pub fn compute(plan: Decimal, actual: Decimal, category_type: CategoryType) -> Self {
        let variance = actual.saturating_sub(plan);
        let exact = exact_percent(variance, plan);

        Self {
            plan,
            actual,
            variance,
            variance_percent: exact.round_dp(2),
            utilization_percent: percent_of(actual, plan),
            status: VarianceStatus::classify(exact, category_type),
        }
    }
}
