//! Property-based tests for the metrics module.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::variance::{
    FinancialMetrics, VarianceStatus, amount_or_zero, exact_percent, percent_of,
};
use crate::hierarchy::CategoryType;

fn category_type_strategy() -> impl Strategy<Value = CategoryType> {
    prop_oneof![Just(CategoryType::Expense), Just(CategoryType::Revenue)]
}

proptest! {
    /// A zero plan yields exactly zero percentages whatever the actual.
    #[test]
    fn prop_zero_plan_gives_zero_percent(
        actual in -1_000_000_000i64..1_000_000_000,
        category_type in category_type_strategy(),
    ) {
        let metrics = FinancialMetrics::compute(Decimal::ZERO, Decimal::from(actual), category_type);

        prop_assert_eq!(metrics.variance_percent, Decimal::ZERO);
        prop_assert_eq!(metrics.utilization_percent, Decimal::ZERO);
        prop_assert_eq!(metrics.variance, Decimal::from(actual));
    }

    /// variance = actual - plan for both category types.
    #[test]
    fn prop_variance_is_actual_minus_plan(
        plan in 0i64..1_000_000_000,
        actual in 0i64..1_000_000_000,
        category_type in category_type_strategy(),
    ) {
        let plan = Decimal::from(plan);
        let actual = Decimal::from(actual);
        let metrics = FinancialMetrics::compute(plan, actual, category_type);

        prop_assert_eq!(metrics.variance, actual - plan);
        prop_assert_eq!(metrics.variance_percent, percent_of(actual - plan, plan));
    }

    /// Revenue status mirrors expense status of the negated percentage.
    #[test]
    fn prop_revenue_is_inverse_of_expense(cents in -100_000i64..100_000) {
        let pct = Decimal::new(cents, 2);
        prop_assert_eq!(
            VarianceStatus::classify(pct, CategoryType::Revenue),
            VarianceStatus::classify(-pct, CategoryType::Expense)
        );
    }
}

#[rstest]
#[case(dec!(5.01), VarianceStatus::Danger)]
#[case(dec!(5), VarianceStatus::Warning)]
#[case(dec!(0.01), VarianceStatus::Warning)]
#[case(dec!(0), VarianceStatus::Success)]
#[case(dec!(-30), VarianceStatus::Success)]
fn test_expense_thresholds(#[case] pct: Decimal, #[case] expected: VarianceStatus) {
    assert_eq!(VarianceStatus::classify(pct, CategoryType::Expense), expected);
}

#[rstest]
#[case(dec!(-5.01), VarianceStatus::Danger)]
#[case(dec!(-5), VarianceStatus::Warning)]
#[case(dec!(-0.01), VarianceStatus::Warning)]
#[case(dec!(0), VarianceStatus::Success)]
#[case(dec!(30), VarianceStatus::Success)]
fn test_revenue_thresholds(#[case] pct: Decimal, #[case] expected: VarianceStatus) {
    assert_eq!(VarianceStatus::classify(pct, CategoryType::Revenue), expected);
}

#[test]
fn test_utilization_percent() {
    let metrics = FinancialMetrics::compute(dec!(300), dec!(100), CategoryType::Expense);
    assert_eq!(metrics.utilization_percent, dec!(33.33));
    assert_eq!(metrics.variance_percent, dec!(-66.67));
}

#[test]
fn test_amount_or_zero() {
    assert_eq!(amount_or_zero(None), Decimal::ZERO);
    assert_eq!(amount_or_zero(Some(dec!(12.5))), dec!(12.5));
}

#[rstest]
#[case(dec!(105004), VarianceStatus::Danger)]
#[case(dec!(105000), VarianceStatus::Warning)]
#[case(dec!(100004), VarianceStatus::Warning)]
#[case(dec!(100000), VarianceStatus::Success)]
fn test_expense_status_uses_unrounded_percent(#[case] actual: Decimal, #[case] expected: VarianceStatus) {
    let metrics = FinancialMetrics::compute(dec!(100000), actual, CategoryType::Expense);
    assert_eq!(metrics.status, expected);
}

#[rstest]
#[case(dec!(94996), VarianceStatus::Danger)]
#[case(dec!(95000), VarianceStatus::Warning)]
#[case(dec!(99996), VarianceStatus::Warning)]
#[case(dec!(100000), VarianceStatus::Success)]
fn test_revenue_status_uses_unrounded_percent(#[case] actual: Decimal, #[case] expected: VarianceStatus) {
    let metrics = FinancialMetrics::compute(dec!(100000), actual, CategoryType::Revenue);
    assert_eq!(metrics.status, expected);
}

#[test]
fn test_displayed_percent_is_rounded() {
    let metrics = FinancialMetrics::compute(dec!(100000), dec!(105004), CategoryType::Expense);
    assert_eq!(metrics.variance_percent, dec!(5.00));
    assert_eq!(metrics.status, VarianceStatus::Danger);
}

#[test]
fn test_overflowing_percent_saturates() {
    let metrics = FinancialMetrics::compute(dec!(0.01), dec!(1e27), CategoryType::Expense);

    assert_eq!(metrics.variance_percent, Decimal::MAX);
    assert_eq!(metrics.utilization_percent, Decimal::MAX);
    assert_eq!(metrics.status, VarianceStatus::Danger);
    assert_eq!(exact_percent(dec!(-1e27), dec!(0.01)), Decimal::MIN);
}
