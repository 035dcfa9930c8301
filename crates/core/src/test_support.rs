//! Fixture builders shared by unit tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use budgetlens_shared::types::{ActualEntryId, CategoryId, ItemId, PlanId, UserId};

use crate::drilldown::DrillDownService;
use crate::fiscal::FiscalYear;
use crate::hierarchy::{
    ActualEntry, BudgetCategory, CategoryTreeCache, CategoryType, PlanOwner, PlanRecord,
    ProcurementItem,
};
use crate::store::MemoryStore;

pub const FY: i32 = 2569;

pub fn fy(year: i32) -> FiscalYear {
    FiscalYear::new(year).unwrap()
}

pub fn cat_id(n: u128) -> CategoryId {
    CategoryId::from_uuid(Uuid::from_u128(n))
}

pub fn item_id(n: u128) -> ItemId {
    ItemId::from_uuid(Uuid::from_u128(1_000 + n))
}

/// Builder over a [`MemoryStore`].
pub struct Fixture {
    pub store: Arc<MemoryStore>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
        }
    }

    pub fn category(
        &self,
        n: u128,
        code: &str,
        level: u8,
        parent: Option<u128>,
        category_type: CategoryType,
    ) -> CategoryId {
        let id = cat_id(n);
        self.store.add_category(BudgetCategory {
            id,
            name: format!("Category {code}"),
            code: code.to_string(),
            level,
            category_type,
            parent_id: parent.map(cat_id),
        });
        id
    }

    pub fn expense(&self, n: u128, code: &str, level: u8, parent: Option<u128>) -> CategoryId {
        self.category(n, code, level, parent, CategoryType::Expense)
    }

    pub fn item(&self, n: u128, category: u128, name: &str, code: Option<&str>) -> ItemId {
        let id = item_id(n);
        self.store.add_item(ProcurementItem {
            id,
            category_id: cat_id(category),
            name: name.to_string(),
            code: code.map(str::to_string),
            unit: "unit".to_string(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
        });
        id
    }

    pub fn plan(&self, year: i32, owner: PlanOwner, amount: Decimal) {
        self.store.add_plan(PlanRecord {
            id: PlanId::new(),
            fiscal_year: fy(year),
            amount,
            owner,
        });
    }

    pub fn category_plan(&self, year: i32, category: u128, amount: Decimal) {
        self.plan(year, PlanOwner::Category(cat_id(category)), amount);
    }

    pub fn item_plan(&self, year: i32, item: u128, amount: Decimal) {
        self.plan(year, PlanOwner::Item(item_id(item)), amount);
    }

    pub fn actual(
        &self,
        year: i32,
        month: u32,
        category: Option<u128>,
        item: Option<u128>,
        amount: Decimal,
    ) {
        self.store.add_entry(ActualEntry {
            id: ActualEntryId::new(),
            fiscal_year: fy(year),
            month,
            amount,
            category_id: category.map(cat_id),
            item_id: item.map(item_id),
            quantity: None,
            notes: None,
            recorded_by: UserId::from_uuid(Uuid::from_u128(7)),
            created_at: Utc.with_ymd_and_hms(2025, 11, 1, 8, 0, 0).unwrap(),
        });
    }

    pub fn category_actual(&self, year: i32, month: u32, category: u128, amount: Decimal) {
        self.actual(year, month, Some(category), None, amount);
    }

    pub fn service(&self) -> DrillDownService {
        DrillDownService::new(self.store.clone(), CategoryTreeCache::new())
    }
}
