//! Wire representation of categories.

use fintrack_shared::CategoryId;
use serde::{Deserialize, Serialize};

use super::types::{Category, CategoryType};

/// Body of a create or full update. The owner is never read from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    /// Display name.
    pub name: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// Body of a partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    /// New name.
    pub name: Option<String>,
    /// New type.
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
}

impl From<CategoryPayload> for CategoryPatch {
    fn from(payload: CategoryPayload) -> Self {
        Self {
            name: Some(payload.name),
            category_type: Some(payload.category_type),
        }
    }
}

/// Category as returned to clients: `{id, name, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl From<Category> for CategoryRecord {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            category_type: category.category_type,
        }
    }
}
