//! `SeaORM` Entity for monthly_actual_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_actual_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fiscal_year: i32,
    pub month: i16,
    pub amount: Decimal,
    pub category_id: Option<Uuid>,
    pub item_id: Option<Uuid>,
    pub quantity: Option<Decimal>,
    pub notes: Option<String>,
    pub recorded_by: Uuid,
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
