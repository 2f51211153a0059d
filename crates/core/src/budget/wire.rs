//! Wire representation of budgets.

use fintrack_shared::BudgetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Budget;

/// Body of a create or full update.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetPayload {
    /// Calendar year.
    pub year: i32,
    /// Month number.
    pub month: i32,
    /// Budgeted amount.
    pub amount: Decimal,
}

/// Body of a partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetPatch {
    /// New year.
    pub year: Option<i32>,
    /// New month.
    pub month: Option<i32>,
    /// New amount.
    pub amount: Option<Decimal>,
}

impl From<BudgetPayload> for BudgetPatch {
    fn from(payload: BudgetPayload) -> Self {
        Self {
            year: Some(payload.year),
            month: Some(payload.month),
            amount: Some(payload.amount),
        }
    }
}

/// Budget as returned to clients: `{id, year, month, amount}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetRecord {
    /// Budget ID.
    pub id: BudgetId,
    /// Calendar year.
    pub year: i32,
    /// Month number.
    pub month: i32,
    /// Budgeted amount.
    pub amount: Decimal,
}

impl From<Budget> for BudgetRecord {
    fn from(budget: Budget) -> Self {
        Self {
            id: budget.id,
            year: budget.year,
            month: budget.month,
            amount: budget.amount,
        }
    }
}
