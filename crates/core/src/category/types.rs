//! Category records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use fintrack_shared::{CategoryId, UserId};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

use crate::access::Owned;

/// Whether a category classifies money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl CategoryType {
    /// Returns the wire/storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("\"{other}\" is not a valid choice.")),
        }
    }
}

/// A user-defined category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Owner.
    pub user_id: UserId,
    /// Display name, unique per owner and type.
    pub name: String,
    /// Income or expense.
    pub category_type: CategoryType,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Owned for Category {
    fn owner(&self) -> UserId {
        self.user_id
    }
}

/// Input for inserting a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Owner, always the authenticated caller.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Income or expense.
    pub category_type: CategoryType,
}

/// Restriction applied when listing categories.
#[serde_as]
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CategoryFilter {
    /// Only categories of this type.
    #[serde(rename = "type", default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub category_type: Option<CategoryType>,
}

impl CategoryFilter {
    /// Returns `true` when `category` passes the filter.
    #[must_use]
    pub fn matches(&self, category: &Category) -> bool {
        self.category_type
            .is_none_or(|wanted| category.category_type == wanted)
    }
}
