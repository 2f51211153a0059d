//! Monthly spending budgets.

pub mod service;
pub mod types;
pub mod wire;

#[cfg(test)]
mod tests;

pub use service::BudgetService;
pub use types::{Budget, BudgetFilter, NewBudget};
pub use wire::{BudgetPatch, BudgetPayload, BudgetRecord};
