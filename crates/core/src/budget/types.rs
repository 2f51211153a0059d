//! Budget data types.

use chrono::{DateTime, Utc};
use fintrack_shared::{BudgetId, UserId};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::access::Owned;

/// A spending limit for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owner.
    pub user_id: UserId,
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 through 12.
    pub month: i32,
    /// Budgeted amount.
    pub amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// The budget period as `YYYY-MM`.
    #[must_use]
    pub fn period(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

impl Owned for Budget {
    fn owner(&self) -> UserId {
        self.user_id
    }
}

/// Input for inserting a budget.
#[derive(Debug, Clone)]
pub struct NewBudget {
    /// Owner, always the authenticated caller.
    pub user_id: UserId,
    /// Calendar year.
    pub year: i32,
    /// Month number.
    pub month: i32,
    /// Budgeted amount.
    pub amount: Decimal,
}

/// Restriction applied when listing budgets.
#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct BudgetFilter {
    /// Exact year.
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub year: Option<i32>,
    /// Exact month.
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub month: Option<i32>,
}

impl BudgetFilter {
    /// Returns `true` when `budget` passes the filter.
    #[must_use]
    pub fn matches(&self, budget: &Budget) -> bool {
        self.year.is_none_or(|y| budget.year == y) && self.month.is_none_or(|m| budget.month == m)
    }
}
