//! `SeaORM` active enums.

use fintrack_core::category::CategoryType as DomainCategoryType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category type, stored as a short string so the schema stays portable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CategoryType {
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<CategoryType> for DomainCategoryType {
    fn from(value: CategoryType) -> Self {
        match value {
            CategoryType::Income => Self::Income,
            CategoryType::Expense => Self::Expense,
        }
    }
}

impl From<DomainCategoryType> for CategoryType {
    fn from(value: DomainCategoryType) -> Self {
        match value {
            DomainCategoryType::Income => Self::Income,
            DomainCategoryType::Expense => Self::Expense,
        }
    }
}
