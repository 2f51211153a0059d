//! Budget operations scoped to the calling user.

use fintrack_shared::{BudgetId, FieldErrors, UserId};

use super::types::{Budget, BudgetFilter, NewBudget};
use super::wire::{BudgetPatch, BudgetPayload, BudgetRecord};
use crate::access;
use crate::error::{FinanceError, FinanceResult};
use crate::repository::BudgetStore;
use crate::validation::{check_amount, check_month, with_cents};

/// Budget service composing storage, access policy, and representation.
pub struct BudgetService<S> {
    store: S,
}

impl<S: BudgetStore> BudgetService<S> {
    /// Creates a new budget service.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists the caller's budgets, newest period first.
    pub async fn list(&self, caller: UserId, filter: &BudgetFilter) -> FinanceResult<Vec<BudgetRecord>> {
        let budgets = self.store.list(caller, filter).await?;
        Ok(budgets.into_iter().map(BudgetRecord::from).collect())
    }

    /// Returns one of the caller's budgets.
    pub async fn retrieve(&self, caller: UserId, id: BudgetId) -> FinanceResult<BudgetRecord> {
        self.owned(caller, id).await.map(BudgetRecord::from)
    }

    /// Creates a budget for a period the caller has not budgeted yet.
    pub async fn create(&self, caller: UserId, payload: BudgetPayload) -> FinanceResult<BudgetRecord> {
        let mut errors = FieldErrors::new();
        check_month(&mut errors, "month", payload.month);
        check_amount(&mut errors, "amount", payload.amount);
        errors.into_result()?;

        if self
            .store
            .period_taken(caller, payload.year, payload.month)
            .await?
        {
            return Err(FieldErrors::non_field(format!(
                "Budget for {}-{:02} already exists. Please update the existing budget instead.",
                payload.year, payload.month
            ))
            .into());
        }

        let budget = self
            .store
            .insert(NewBudget {
                user_id: caller,
                year: payload.year,
                month: payload.month,
                amount: with_cents(payload.amount),
            })
            .await?;
        Ok(budget.into())
    }

    /// Applies `changes` to one of the caller's budgets.
    ///
    /// Moving a budget onto a period that already has one is rejected by the
    /// store's unique key.
    pub async fn update(
        &self,
        caller: UserId,
        id: BudgetId,
        changes: BudgetPatch,
    ) -> FinanceResult<BudgetRecord> {
        let mut budget = self.owned(caller, id).await?;

        let mut errors = FieldErrors::new();
        if let Some(year) = changes.year {
            budget.year = year;
        }
        if let Some(month) = changes.month {
            check_month(&mut errors, "month", month);
            budget.month = month;
        }
        if let Some(amount) = changes.amount {
            check_amount(&mut errors, "amount", amount);
            budget.amount = with_cents(amount);
        }
        errors.into_result()?;

        let updated = self.store.update(&budget).await?;
        Ok(updated.into())
    }

    /// Deletes one of the caller's budgets.
    pub async fn delete(&self, caller: UserId, id: BudgetId) -> FinanceResult<()> {
        self.owned(caller, id).await?;
        self.store.delete(id).await
    }

    async fn owned(&self, caller: UserId, id: BudgetId) -> FinanceResult<Budget> {
        access::visible_to(self.store.find(id).await?, caller)
            .ok_or_else(|| FinanceError::not_found("Budget", id))
    }
}
