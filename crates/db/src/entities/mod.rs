//! `SeaORM` entity definitions.

pub mod budget_categories;
pub mod monthly_actual_entries;
pub mod plan_financial_data;
pub mod procurement_items;
pub mod sea_orm_active_enums;
