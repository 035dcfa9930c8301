//! Actual entry service tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use budgetlens_shared::types::UserId;

use super::{ActualEntryService, EntryError, EntryListQuery, NewActualEntry};
use crate::fiscal::FiscalError;
use crate::hierarchy::CategoryTreeCache;
use crate::test_support::{FY, Fixture, cat_id, item_id};

fn fixture() -> Fixture {
    let fx = Fixture::new();
    fx.expense(1, "A", 1, None);
    fx.expense(2, "B", 1, None);
    fx.item(1, 1, "Gauze", None);
    fx
}

fn service(fx: &Fixture) -> ActualEntryService {
    ActualEntryService::new(fx.store.clone(), CategoryTreeCache::new())
}

fn entry(month: u32, amount: Decimal) -> NewActualEntry {
    NewActualEntry {
        fiscal_year: FY,
        month,
        amount,
        category_id: Some(cat_id(1)),
        item_id: None,
        quantity: None,
        notes: None,
        recorded_by: UserId::from_uuid(Uuid::from_u128(7)),
    }
}

fn list_all() -> EntryListQuery {
    EntryListQuery {
        fiscal_year: FY,
        category_id: None,
        item_id: None,
    }
}

#[tokio::test]
async fn test_record_appends_entry() {
    let fx = fixture();
    let service = service(&fx);

    let mut new = entry(3, dec!(125.50));
    new.item_id = Some(item_id(1));
    new.notes = Some("delivery 1".to_string());
    let recorded = service.record(new).await.unwrap();

    assert_eq!(recorded.amount, dec!(125.50));
    assert_eq!(recorded.item_id, Some(item_id(1)));
    let listed = service.list(list_all()).await.unwrap();
    assert_eq!(listed, vec![recorded]);
}

#[tokio::test]
async fn test_zero_amount_is_allowed() {
    let fx = fixture();
    assert!(service(&fx).record(entry(1, Decimal::ZERO)).await.is_ok());
}

#[tokio::test]
async fn test_invalid_entries_are_rejected() {
    let fx = fixture();
    let service = service(&fx);

    let result = service.record(entry(13, dec!(1))).await;
    assert!(matches!(
        result,
        Err(EntryError::Fiscal(FiscalError::InvalidMonth(13)))
    ));

    let result = service.record(entry(1, dec!(-1))).await;
    assert!(matches!(result, Err(EntryError::NegativeAmount)));

    let mut orphan = entry(1, dec!(1));
    orphan.category_id = None;
    let result = service.record(orphan).await;
    assert!(matches!(result, Err(EntryError::MissingOwner)));

    let mut old = entry(1, dec!(1));
    old.fiscal_year = 2026;
    let result = service.record(old).await;
    assert!(matches!(result, Err(EntryError::Fiscal(_))));

    assert!(service.list(list_all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_amount_must_fit_stored_precision() {
    let fx = fixture();
    let service = service(&fx);

    let largest = dec!(999999999999999.9999);
    assert!(service.record(entry(1, largest)).await.is_ok());

    let result = service.record(entry(1, dec!(1000000000000000))).await;
    assert!(matches!(result, Err(EntryError::AmountTooLarge)));

    let result = service.record(entry(1, dec!(999999999999999.99999))).await;
    assert!(matches!(result, Err(EntryError::AmountTooLarge)));

    let result = service.record(entry(1, dec!(1e27))).await;
    assert!(matches!(result, Err(EntryError::AmountTooLarge)));

    assert_eq!(service.list(list_all()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_owners_are_not_found() {
    let fx = fixture();
    let service = service(&fx);

    let mut unknown_category = entry(1, dec!(1));
    unknown_category.category_id = Some(cat_id(99));
    let result = service.record(unknown_category).await;
    assert!(matches!(result, Err(EntryError::CategoryNotFound(_))));

    let mut unknown_item = entry(1, dec!(1));
    unknown_item.category_id = None;
    unknown_item.item_id = Some(item_id(99));
    let result = service.record(unknown_item).await;
    assert!(matches!(result, Err(EntryError::ItemNotFound(_))));
}

#[tokio::test]
async fn test_item_must_belong_to_category() {
    let fx = fixture();
    let mut new = entry(1, dec!(1));
    new.category_id = Some(cat_id(2));
    new.item_id = Some(item_id(1));

    let result = service(&fx).record(new).await;
    assert!(matches!(
        result,
        Err(EntryError::ItemCategoryMismatch { .. })
    ));
}

#[tokio::test]
async fn test_list_orders_by_fiscal_month() {
    let fx = fixture();
    let service = service(&fx);
    for month in [1, 10, 9, 12] {
        service.record(entry(month, dec!(1))).await.unwrap();
    }

    let months: Vec<u32> = service
        .list(list_all())
        .await
        .unwrap()
        .iter()
        .map(|e| e.month)
        .collect();
    assert_eq!(months, [10, 12, 1, 9]);
}

#[tokio::test]
async fn test_list_filters_by_owner_and_year() {
    let fx = fixture();
    let service = service(&fx);
    service.record(entry(1, dec!(1))).await.unwrap();
    let mut other = entry(1, dec!(2));
    other.category_id = Some(cat_id(2));
    service.record(other).await.unwrap();
    let mut previous = entry(1, dec!(3));
    previous.fiscal_year = FY - 1;
    service.record(previous).await.unwrap();

    let query = EntryListQuery {
        category_id: Some(cat_id(2)),
        ..list_all()
    };
    let listed = service.list(query).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].amount, dec!(2));
}

#[tokio::test]
async fn test_recorded_entries_roll_up() {
    let fx = fixture();
    fx.expense(3, "A.01", 2, Some(1));
    let entries = service(&fx);
    let mut new = entry(11, dec!(40));
    new.category_id = Some(cat_id(3));
    entries.record(new).await.unwrap();

    let response = fx
        .service()
        .drill_down(crate::drilldown::DrillDownQuery {
            fiscal_year: FY,
            parent_id: None,
            level: 0,
        })
        .await
        .unwrap();
    let a = response.items.iter().find(|r| r.code.as_deref() == Some("A")).unwrap();
    assert_eq!(a.financial.actual, dec!(40));
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let fx = fixture();
    fx.store.set_unavailable(true);

    let result = service(&fx).record(entry(1, dec!(1))).await;
    assert!(matches!(result, Err(EntryError::Store(_))));
}
