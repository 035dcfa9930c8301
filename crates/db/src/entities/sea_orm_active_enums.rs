//! `SeaORM` active enums mirroring Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use budgetlens_core::hierarchy::CategoryType as DomainCategoryType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "category_type")]
pub enum CategoryType {
    #[sea_orm(string_value = "revenue")]
    Revenue,
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<CategoryType> for DomainCategoryType {
    fn from(value: CategoryType) -> Self {
        match value {
            CategoryType::Revenue => Self::Revenue,
            CategoryType::Expense => Self::Expense,
        }
    }
}

impl From<DomainCategoryType> for CategoryType {
    fn from(value: DomainCategoryType) -> Self {
        match value {
            DomainCategoryType::Revenue => Self::Revenue,
            DomainCategoryType::Expense => Self::Expense,
        }
    }
}
