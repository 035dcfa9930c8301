//! Drill-down service tests.

use rust_decimal_macros::dec;

use super::{DrillDownError, DrillDownQuery, NodeKind};
use crate::hierarchy::CategoryType;
use crate::metrics::VarianceStatus;
use crate::test_support::{FY, Fixture, cat_id, item_id};

/// A (L1, expense) with children B and C (L2).
fn scenario() -> Fixture {
    let fx = Fixture::new();
    fx.expense(1, "A", 1, None);
    fx.expense(2, "A.01", 2, Some(1));
    fx.expense(3, "A.02", 2, Some(1));
    fx.category_plan(FY, 2, dec!(100));
    fx.category_actual(FY, 10, 2, dec!(70));
    fx.category_actual(FY, 2, 2, dec!(50));
    fx.category_plan(FY, 3, dec!(50));
    fx.category_actual(FY, 5, 3, dec!(40));
    fx
}

fn query(parent: Option<u128>, level: i32) -> DrillDownQuery {
    DrillDownQuery {
        fiscal_year: FY,
        parent_id: parent.map(cat_id),
        level,
    }
}

#[tokio::test]
async fn test_children_of_level_one_node() {
    let fx = scenario();
    let response = fx.service().drill_down(query(Some(1), 1)).await.unwrap();

    let parent = response.parent.unwrap();
    assert_eq!(parent.id, cat_id(1));
    assert_eq!(parent.level, 1);

    assert_eq!(response.items.len(), 2);
    let b = &response.items[0];
    assert_eq!(b.code.as_deref(), Some("A.01"));
    assert_eq!(b.financial.plan, dec!(100));
    assert_eq!(b.financial.actual, dec!(120));
    assert_eq!(b.financial.variance, dec!(20));
    assert_eq!(b.financial.variance_percent, dec!(20));
    assert_eq!(b.financial.status, VarianceStatus::Danger);

    let c = &response.items[1];
    assert_eq!(c.financial.variance, dec!(-10));
    assert_eq!(c.financial.variance_percent, dec!(-20));
    assert_eq!(c.financial.status, VarianceStatus::Success);
}

#[tokio::test]
async fn test_root_view_rolls_up_whole_subtree() {
    let fx = scenario();
    fx.expense(4, "A.01.1", 3, Some(2));
    fx.category_actual(FY, 3, 4, dec!(5));

    let response = fx.service().drill_down(query(None, 0)).await.unwrap();

    assert!(response.parent.is_none());
    assert_eq!(response.items.len(), 1);
    let a = &response.items[0];
    assert_eq!(a.level, "L1");
    assert!(a.has_children);
    assert_eq!(a.financial.plan, dec!(150));
    assert_eq!(a.financial.actual, dec!(165));
}

#[tokio::test]
async fn test_rows_are_only_next_level() {
    let fx = scenario();
    fx.expense(4, "A.01.1", 3, Some(2));
    fx.expense(5, "A.01.1.1", 4, Some(4));

    let service = fx.service();
    for (parent, level, tag) in [(None, 0, "L1"), (Some(1), 1, "L2"), (Some(2), 2, "L3"), (Some(4), 3, "L4")] {
        let response = service.drill_down(query(parent, level)).await.unwrap();
        assert!(!response.items.is_empty());
        assert!(response.items.iter().all(|row| row.level == tag));
    }
}

#[tokio::test]
async fn test_level_four_lists_items() {
    let fx = Fixture::new();
    fx.expense(1, "M", 1, None);
    fx.expense(2, "M.1", 2, Some(1));
    fx.expense(3, "M.1.1", 3, Some(2));
    fx.expense(4, "M.1.1.1", 4, Some(3));
    fx.item(1, 4, "Syringe", Some("P-002"));
    fx.item(2, 4, "Gauze", Some("P-001"));
    fx.item(3, 4, "Gloves", None);
    fx.item_plan(FY, 1, dec!(1000));
    fx.actual(FY, 11, None, Some(1), dec!(1020));

    let response = fx.service().drill_down(query(Some(4), 4)).await.unwrap();

    let names: Vec<&str> = response.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Gauze", "Syringe", "Gloves"]);
    assert!(response.items.iter().all(|r| r.level == "L5"));
    assert!(response.items.iter().all(|r| r.kind == NodeKind::Item));
    assert!(response.items.iter().all(|r| !r.has_children));

    let syringe = &response.items[1];
    assert_eq!(syringe.id, item_id(1).into_inner());
    assert_eq!(syringe.financial.variance_percent, dec!(2));
    assert_eq!(syringe.financial.status, VarianceStatus::Warning);
}

#[tokio::test]
async fn test_item_without_plan_uses_zero_guard() {
    let fx = Fixture::new();
    fx.expense(4, "X", 4, None);
    fx.item(1, 4, "Monitor", None);
    fx.actual(crate::test_support::FY, 1, None, Some(1), dec!(500));

    let response = fx.service().drill_down(query(Some(4), 4)).await.unwrap();
    let row = &response.items[0];

    assert_eq!(row.financial.plan, dec!(0));
    assert_eq!(row.financial.actual, dec!(500));
    assert_eq!(row.financial.variance, dec!(500));
    assert_eq!(row.financial.variance_percent, dec!(0));
    assert_eq!(row.financial.utilization_percent, dec!(0));
}

#[tokio::test]
async fn test_items_count_toward_category_and_has_children() {
    let fx = Fixture::new();
    fx.expense(1, "A", 1, None);
    fx.expense(2, "A.1", 2, Some(1));
    fx.expense(3, "A.2", 2, Some(1));
    fx.item(1, 2, "Bed", None);
    fx.item_plan(FY, 1, dec!(40));
    fx.actual(FY, 4, Some(2), Some(1), dec!(10));

    let rows = fx.service().drill_down(query(Some(1), 1)).await.unwrap().items;

    assert!(rows[0].has_children);
    assert!(!rows[1].has_children);
    // Entry carries both owners but is counted once.
    assert_eq!(rows[0].financial.actual, dec!(10));
    assert_eq!(rows[0].financial.plan, dec!(40));
}

#[tokio::test]
async fn test_history_block() {
    let fx = scenario();
    fx.category_actual(FY - 1, 10, 2, dec!(90));
    fx.category_actual(FY - 2, 9, 2, dec!(80));
    fx.category_plan(FY + 1, 2, dec!(130));
    fx.category_plan(FY - 1, 2, dec!(999));

    let rows = fx.service().drill_down(query(Some(1), 1)).await.unwrap().items;
    let history = &rows[0].history;

    assert_eq!(history.last_year_actual, dec!(90));
    assert_eq!(history.two_years_ago_actual, dec!(80));
    assert_eq!(history.next_year_plan, dec!(130));
    assert_eq!(rows[0].financial.plan, dec!(100));
}

#[tokio::test]
async fn test_revenue_rows_use_inverse_sense() {
    let fx = Fixture::new();
    fx.category(1, "R", 1, None, CategoryType::Revenue);
    fx.category(2, "R.1", 2, Some(1), CategoryType::Revenue);
    fx.category(3, "R.2", 2, Some(1), CategoryType::Revenue);
    fx.category_plan(FY, 2, dec!(100));
    fx.category_actual(FY, 1, 2, dec!(120));
    fx.category_plan(FY, 3, dec!(100));
    fx.category_actual(FY, 1, 3, dec!(90));

    let rows = fx.service().drill_down(query(Some(1), 1)).await.unwrap().items;

    assert_eq!(rows[0].financial.status, VarianceStatus::Success);
    assert_eq!(rows[1].financial.status, VarianceStatus::Danger);
}

#[tokio::test]
async fn test_empty_result_is_not_an_error() {
    let fx = scenario();
    let response = fx.service().drill_down(query(Some(3), 2)).await.unwrap();
    assert!(response.items.is_empty());
    assert!(response.parent.is_some());
}

#[tokio::test]
async fn test_unknown_parent_is_not_found() {
    let fx = scenario();
    let result = fx.service().drill_down(query(Some(42), 1)).await;
    assert!(matches!(result, Err(DrillDownError::CategoryNotFound(id)) if id == cat_id(42)));
}

#[tokio::test]
async fn test_invalid_arguments_fail_fast() {
    let fx = scenario();
    let service = fx.service();

    for bad in [query(None, 4), query(Some(1), 5), query(None, -1)] {
        assert!(matches!(
            service.drill_down(bad).await,
            Err(DrillDownError::InvalidArgument(_))
        ));
    }

    let bad_year = DrillDownQuery {
        fiscal_year: 2026,
        parent_id: None,
        level: 0,
    };
    assert!(matches!(
        service.drill_down(bad_year).await,
        Err(DrillDownError::InvalidArgument(_))
    ));
    assert_eq!(fx.store.category_loads(), 0);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let fx = scenario();
    fx.store.set_unavailable(true);

    let result = fx.service().drill_down(query(None, 0)).await;
    assert!(matches!(result, Err(DrillDownError::Store(_))));
}

#[tokio::test]
async fn test_repeated_query_is_identical_and_reuses_tree() {
    let fx = scenario();
    let service = fx.service();

    let first = service.drill_down(query(Some(1), 1)).await.unwrap();
    let second = service.drill_down(query(Some(1), 1)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fx.store.category_loads(), 1);
}

#[tokio::test]
async fn test_level_overview_lists_flat_level() {
    let fx = scenario();
    fx.category(10, "R", 1, None, CategoryType::Revenue);
    fx.category(11, "R.01", 2, Some(10), CategoryType::Revenue);

    let service = fx.service();
    let all = service.level_overview(FY, 2, None).await.unwrap();
    let codes: Vec<_> = all.iter().filter_map(|r| r.code.as_deref()).collect();
    assert_eq!(codes, vec!["A.01", "A.02", "R.01"]);

    let revenue = service
        .level_overview(FY, 2, Some(CategoryType::Revenue))
        .await
        .unwrap();
    assert_eq!(revenue.len(), 1);

    assert!(matches!(
        service.level_overview(FY, 6, None).await,
        Err(DrillDownError::InvalidArgument(_))
    ));
}
