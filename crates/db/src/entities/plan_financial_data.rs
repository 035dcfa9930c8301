//! `SeaORM` Entity for plan_financial_data table.
//!
//! Exactly one of `category_id` and `item_id` is set (enforced by a CHECK).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "plan_financial_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fiscal_year: i32,
    pub category_id: Option<Uuid>,
    pub item_id: Option<Uuid>,
    pub amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budget_categories::Entity",
        from = "Column::CategoryId",
        to = "super::budget_categories::Column::Id"
    )]
    BudgetCategories,
    #[sea_orm(
        belongs_to = "super::procurement_items::Entity",
        from = "Column::ItemId",
        to = "super::procurement_items::Column::Id"
    )]
    ProcurementItems,
}

impl ActiveModelBehavior for ActiveModel {}
