//! Transaction operations scoped to the calling user.

use fintrack_shared::{CategoryId, FieldErrors, TransactionId, UserId};

use super::filter::{TransactionFilter, TransactionOrdering};
use super::summary::{Summary, SummaryPeriod, summarize};
use super::types::{NewTransaction, TransactionDetail};
use super::wire::{TransactionPatch, TransactionPayload, TransactionRecord};
use crate::access;
use crate::error::{FinanceError, FinanceResult};
use crate::repository::{CategoryStore, TransactionStore};
use crate::validation::{check_amount, with_cents};

/// Transaction service composing storage, access policy, and representation.
pub struct TransactionService<T, C> {
    transactions: T,
    categories: C,
}

impl<T: TransactionStore, C: CategoryStore> TransactionService<T, C> {
    /// Creates a new transaction service.
    #[must_use]
    pub const fn new(transactions: T, categories: C) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    /// Lists the caller's transactions matching `filter`.
    pub async fn list(
        &self,
        caller: UserId,
        filter: &TransactionFilter,
        ordering: TransactionOrdering,
    ) -> FinanceResult<Vec<TransactionRecord>> {
        let rows = self.transactions.list(caller, filter, ordering).await?;
        Ok(rows.into_iter().map(TransactionRecord::from).collect())
    }

    /// Returns one of the caller's transactions.
    pub async fn retrieve(
        &self,
        caller: UserId,
        id: TransactionId,
    ) -> FinanceResult<TransactionRecord> {
        self.owned(caller, id).await.map(TransactionRecord::from)
    }

    /// Records a transaction for the caller.
    pub async fn create(
        &self,
        caller: UserId,
        payload: TransactionPayload,
    ) -> FinanceResult<TransactionRecord> {
        let mut errors = FieldErrors::new();
        check_amount(&mut errors, "amount", payload.amount);
        self.check_category(caller, payload.category, &mut errors)
            .await?;
        errors.into_result()?;

        let created = self
            .transactions
            .insert(NewTransaction {
                user_id: caller,
                category_id: payload.category,
                amount: with_cents(payload.amount),
                date: payload.date,
                description: payload.description,
            })
            .await?;
        Ok(created.into())
    }

    /// Applies `changes` to one of the caller's transactions.
    ///
    /// The category is re-checked even when the patch leaves it unchanged.
    pub async fn update(
        &self,
        caller: UserId,
        id: TransactionId,
        changes: TransactionPatch,
    ) -> FinanceResult<TransactionRecord> {
        let mut tx = self.owned(caller, id).await?.transaction;

        let mut errors = FieldErrors::new();
        if let Some(amount) = changes.amount {
            check_amount(&mut errors, "amount", amount);
            tx.amount = with_cents(amount);
        }
        if let Some(category) = changes.category {
            tx.category_id = category;
        }
        self.check_category(caller, tx.category_id, &mut errors)
            .await?;
        errors.into_result()?;

        if let Some(date) = changes.date {
            tx.date = date;
        }
        if let Some(description) = changes.description {
            tx.description = description;
        }

        let updated = self.transactions.update(&tx).await?;
        Ok(updated.into())
    }

    /// Deletes one of the caller's transactions.
    pub async fn delete(&self, caller: UserId, id: TransactionId) -> FinanceResult<()> {
        self.owned(caller, id).await?;
        self.transactions.delete(id).await
    }

    /// Aggregates the caller's transactions over `period`.
    pub async fn summary(&self, caller: UserId, period: SummaryPeriod) -> FinanceResult<Summary> {
        let Some(filter) = period.filter() else {
            return Ok(summarize(&[]));
        };
        let rows = self
            .transactions
            .list(caller, &filter, TransactionOrdering::default())
            .await?;
        Ok(summarize(&rows))
    }

    async fn owned(&self, caller: UserId, id: TransactionId) -> FinanceResult<TransactionDetail> {
        access::visible_to(self.transactions.find(id).await?, caller)
            .ok_or_else(|| FinanceError::not_found("Transaction", id))
    }

    /// Records a `category` error unless the category exists and is the caller's.
    async fn check_category(
        &self,
        caller: UserId,
        id: CategoryId,
        errors: &mut FieldErrors,
    ) -> FinanceResult<()> {
        match self.categories.find(id).await? {
            None => errors.add(
                "category",
                format!("Invalid pk \"{id}\" - object does not exist."),
            ),
            Some(category) if !access::is_owner(&category, caller) => {
                errors.add("category", "Category does not belong to the user.");
            }
            Some(_) => {}
        }
        Ok(())
    }
}
