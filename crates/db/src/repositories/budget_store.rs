//! Postgres-backed budget store.
//!
//! Every aggregate is a single `SUM` query scoped by the subtree's category
//! and item ids; rows are never fetched to be summed in process.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::error;
use uuid::Uuid;

use budgetlens_core::fiscal::FiscalYear;
use budgetlens_core::hierarchy::{
    ActualEntry, ActualEntryFilter, BudgetCategory, PlanOwner, PlanRecord, ProcurementItem,
    Subtree,
};
use budgetlens_core::metrics::amount_or_zero;
use budgetlens_core::store::{BudgetStore, StoreError, StoreResult};
use budgetlens_shared::types::{ActualEntryId, CategoryId, ItemId, UserId};

use crate::entities::{
    budget_categories, monthly_actual_entries, plan_financial_data, procurement_items,
};

/// Budget store over a `SeaORM` connection.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_category(&self, category: &BudgetCategory) -> Result<(), DbErr> {
        budget_categories::ActiveModel {
            id: Set(category.id.into_inner()),
            name: Set(category.name.clone()),
            code: Set(category.code.clone()),
            level: Set(i16::from(category.level)),
            category_type: Set(category.category_type.into()),
            parent_id: Set(category.parent_id.map(CategoryId::into_inner)),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }

    /// Inserts a procurement item.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_item(&self, item: &ProcurementItem) -> Result<(), DbErr> {
        procurement_items::ActiveModel {
            id: Set(item.id.into_inner()),
            category_id: Set(item.category_id.into_inner()),
            name: Set(item.name.clone()),
            code: Set(item.code.clone()),
            unit: Set(item.unit.clone()),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }

    /// Inserts a planned amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_plan(&self, plan: &PlanRecord) -> Result<(), DbErr> {
        let (category_id, item_id) = match plan.owner {
            PlanOwner::Category(id) => (Some(id.into_inner()), None),
            PlanOwner::Item(id) => (None, Some(id.into_inner())),
        };
        plan_financial_data::ActiveModel {
            id: Set(plan.id.into_inner()),
            fiscal_year: Set(plan.fiscal_year.value()),
            category_id: Set(category_id),
            item_id: Set(item_id),
            amount: Set(plan.amount),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl BudgetStore for BudgetRepository {
    async fn all_categories(&self) -> StoreResult<Vec<BudgetCategory>> {
        budget_categories::Entity::find()
            .order_by_asc(budget_categories::Column::Code)
            .all(&self.db)
            .await
            .map_err(unavailable)?
            .into_iter()
            .map(category_from_model)
            .collect()
    }

    async fn items_for_categories(
        &self,
        category_ids: &BTreeSet<CategoryId>,
    ) -> StoreResult<Vec<ProcurementItem>> {
        if category_ids.is_empty() {
            return Ok(vec![]);
        }

        let items = procurement_items::Entity::find()
            .filter(procurement_items::Column::CategoryId.is_in(uuids(category_ids)))
            .order_by_asc(procurement_items::Column::Code)
            .all(&self.db)
            .await
            .map_err(unavailable)?;

        Ok(items.into_iter().map(item_from_model).collect())
    }

    async fn find_item(&self, id: ItemId) -> StoreResult<Option<ProcurementItem>> {
        let item = procurement_items::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(unavailable)?;

        Ok(item.map(item_from_model))
    }

    async fn sum_plan(&self, fiscal_year: FiscalYear, scope: &Subtree) -> StoreResult<Decimal> {
        if scope.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let total: Option<Option<Decimal>> = plan_financial_data::Entity::find()
            .select_only()
            .column_as(Expr::col(plan_financial_data::Column::Amount).sum(), "total")
            .filter(plan_financial_data::Column::FiscalYear.eq(fiscal_year.value()))
            .filter(owned_by(
                plan_financial_data::Column::CategoryId,
                plan_financial_data::Column::ItemId,
                scope,
            ))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(unavailable)?;

        Ok(amount_or_zero(total.flatten()))
    }

    async fn sum_actual(
        &self,
        fiscal_year: FiscalYear,
        scope: &Subtree,
        months: Option<&[u32]>,
    ) -> StoreResult<Decimal> {
        if scope.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let mut query = monthly_actual_entries::Entity::find()
            .select_only()
            .column_as(Expr::col(monthly_actual_entries::Column::Amount).sum(), "total")
            .filter(monthly_actual_entries::Column::FiscalYear.eq(fiscal_year.value()))
            .filter(owned_by(
                monthly_actual_entries::Column::CategoryId,
                monthly_actual_entries::Column::ItemId,
                scope,
            ));
        if let Some(months) = months {
            let months: Vec<i16> = months.iter().filter_map(|m| i16::try_from(*m).ok()).collect();
            query = query.filter(monthly_actual_entries::Column::Month.is_in(months));
        }

        let total: Option<Option<Decimal>> = query
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(unavailable)?;

        Ok(amount_or_zero(total.flatten()))
    }

    async fn monthly_actuals(
        &self,
        fiscal_year: FiscalYear,
        scope: &Subtree,
    ) -> StoreResult<BTreeMap<u32, Decimal>> {
        if scope.is_empty() {
            return Ok(BTreeMap::new());
        }

        let rows: Vec<(i16, Option<Decimal>)> = monthly_actual_entries::Entity::find()
            .select_only()
            .column(monthly_actual_entries::Column::Month)
            .column_as(Expr::col(monthly_actual_entries::Column::Amount).sum(), "total")
            .filter(monthly_actual_entries::Column::FiscalYear.eq(fiscal_year.value()))
            .filter(owned_by(
                monthly_actual_entries::Column::CategoryId,
                monthly_actual_entries::Column::ItemId,
                scope,
            ))
            .group_by(monthly_actual_entries::Column::Month)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(unavailable)?;

        rows.into_iter()
            .map(|(month, total)| Ok((month_from_db(month)?, amount_or_zero(total))))
            .collect()
    }

    async fn list_actual_entries(&self, filter: &ActualEntryFilter) -> StoreResult<Vec<ActualEntry>> {
        let mut query = monthly_actual_entries::Entity::find()
            .filter(monthly_actual_entries::Column::FiscalYear.eq(filter.fiscal_year.value()));
        if let Some(category_id) = filter.category_id {
            query = query.filter(monthly_actual_entries::Column::CategoryId.eq(category_id.into_inner()));
        }
        if let Some(item_id) = filter.item_id {
            query = query.filter(monthly_actual_entries::Column::ItemId.eq(item_id.into_inner()));
        }

        query
            .order_by_asc(monthly_actual_entries::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(unavailable)?
            .into_iter()
            .map(entry_from_model)
            .collect()
    }

    async fn insert_actual_entry(&self, entry: &ActualEntry) -> StoreResult<()> {
        let month = i16::try_from(entry.month)
            .map_err(|_| StoreError::Unavailable(format!("month {} out of range", entry.month)))?;

        monthly_actual_entries::ActiveModel {
            id: Set(entry.id.into_inner()),
            fiscal_year: Set(entry.fiscal_year.value()),
            month: Set(month),
            amount: Set(entry.amount),
            category_id: Set(entry.category_id.map(CategoryId::into_inner)),
            item_id: Set(entry.item_id.map(ItemId::into_inner)),
            quantity: Set(entry.quantity),
            notes: Set(entry.notes.clone()),
            recorded_by: Set(entry.recorded_by.into_inner()),
            created_at: Set(entry.created_at.into()),
        }
        .insert(&self.db)
        .await
        .map_err(unavailable)?;

        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn unavailable(e: DbErr) -> StoreError {
    error!(error = %e, "Budget store query failed");
    StoreError::Unavailable(e.to_string())
}

fn corrupt(what: &str) -> StoreError {
    error!(what, "Budget store returned an out-of-range value");
    StoreError::Unavailable(format!("invalid {what} in store"))
}

fn uuids<T: Copy + Into<Uuid>>(ids: &BTreeSet<T>) -> Vec<Uuid> {
    ids.iter().map(|id| (*id).into()).collect()
}

/// Rows owned by any category or item of `scope`. An entry owned by both
/// matches once.
fn owned_by<C: ColumnTrait>(category_column: C, item_column: C, scope: &Subtree) -> Condition {
    let mut condition = Condition::any();
    if !scope.category_ids.is_empty() {
        condition = condition.add(category_column.is_in(uuids(&scope.category_ids)));
    }
    if !scope.item_ids.is_empty() {
        condition = condition.add(item_column.is_in(uuids(&scope.item_ids)));
    }
    condition
}

fn month_from_db(month: i16) -> StoreResult<u32> {
    u32::try_from(month).map_err(|_| corrupt("month"))
}

fn category_from_model(model: budget_categories::Model) -> StoreResult<BudgetCategory> {
    Ok(BudgetCategory {
        id: CategoryId::from_uuid(model.id),
        name: model.name,
        code: model.code,
        level: u8::try_from(model.level).map_err(|_| corrupt("level"))?,
        category_type: model.category_type.into(),
        parent_id: model.parent_id.map(CategoryId::from_uuid),
    })
}

fn item_from_model(model: procurement_items::Model) -> ProcurementItem {
    ProcurementItem {
        id: ItemId::from_uuid(model.id),
        category_id: CategoryId::from_uuid(model.category_id),
        name: model.name,
        code: model.code,
        unit: model.unit,
        quantity: model.quantity,
        unit_price: model.unit_price,
    }
}

fn entry_from_model(model: monthly_actual_entries::Model) -> StoreResult<ActualEntry> {
    Ok(ActualEntry {
        id: ActualEntryId::from_uuid(model.id),
        fiscal_year: FiscalYear::new(model.fiscal_year).map_err(|_| corrupt("fiscal year"))?,
        month: month_from_db(model.month)?,
        amount: model.amount,
        category_id: model.category_id.map(CategoryId::from_uuid),
        item_id: model.item_id.map(ItemId::from_uuid),
        quantity: model.quantity,
        notes: model.notes,
        recorded_by: UserId::from_uuid(model.recorded_by),
        created_at: model.created_at.with_timezone(&Utc),
    })
}
