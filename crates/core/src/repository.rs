//! Storage interfaces, one per entity.
//!
//! Implementations live in `fintrack-db`. `find` lookups are unscoped: the
//! services apply the access policy on top, because the transaction checks
//! need to tell "missing" apart from "owned by someone else".
//!
//! Every write is a single statement and therefore atomic in the store.
//! Unique-key and foreign-key violations must come back as
//! `FinanceError::Conflict`.

use async_trait::async_trait;
use fintrack_shared::{BudgetId, CategoryId, TransactionId, UserId};

use crate::budget::{Budget, BudgetFilter, NewBudget};
use crate::category::{Category, CategoryFilter, CategoryType, NewCategory};
use crate::error::FinanceResult;
use crate::transaction::{
    NewTransaction, Transaction, TransactionDetail, TransactionFilter, TransactionOrdering,
};

/// Category storage.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Inserts a category.
    async fn insert(&self, category: NewCategory) -> FinanceResult<Category>;

    /// Finds a category by ID regardless of owner.
    async fn find(&self, id: CategoryId) -> FinanceResult<Option<Category>>;

    /// Lists the owner's categories ordered by name.
    async fn list(&self, owner: UserId, filter: &CategoryFilter) -> FinanceResult<Vec<Category>>;

    /// Persists the mutable fields of `category`.
    async fn update(&self, category: &Category) -> FinanceResult<Category>;

    /// Deletes a category.
    async fn delete(&self, id: CategoryId) -> FinanceResult<()>;

    /// Returns `true` if the owner already has a category with this name and
    /// type, ignoring `excluding`.
    async fn name_taken(
        &self,
        owner: UserId,
        name: &str,
        category_type: CategoryType,
        excluding: Option<CategoryId>,
    ) -> FinanceResult<bool>;

    /// Returns `true` if any transaction references the category.
    async fn is_referenced(&self, id: CategoryId) -> FinanceResult<bool>;
}

/// Transaction storage.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Inserts a transaction and returns it joined with its category.
    async fn insert(&self, transaction: NewTransaction) -> FinanceResult<TransactionDetail>;

    /// Finds a transaction by ID regardless of owner.
    async fn find(&self, id: TransactionId) -> FinanceResult<Option<TransactionDetail>>;

    /// Lists the owner's transactions matching `filter`.
    async fn list(
        &self,
        owner: UserId,
        filter: &TransactionFilter,
        ordering: TransactionOrdering,
    ) -> FinanceResult<Vec<TransactionDetail>>;

    /// Persists the mutable fields of `transaction`.
    async fn update(&self, transaction: &Transaction) -> FinanceResult<TransactionDetail>;

    /// Deletes a transaction.
    async fn delete(&self, id: TransactionId) -> FinanceResult<()>;
}

/// Budget storage.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Inserts a budget.
    async fn insert(&self, budget: NewBudget) -> FinanceResult<Budget>;

    /// Finds a budget by ID regardless of owner.
    async fn find(&self, id: BudgetId) -> FinanceResult<Option<Budget>>;

    /// Lists the owner's budgets, newest period first.
    async fn list(&self, owner: UserId, filter: &BudgetFilter) -> FinanceResult<Vec<Budget>>;

    /// Persists the mutable fields of `budget`.
    async fn update(&self, budget: &Budget) -> FinanceResult<Budget>;

    /// Deletes a budget.
    async fn delete(&self, id: BudgetId) -> FinanceResult<()>;

    /// Returns `true` if the owner already has a budget for the period.
    async fn period_taken(&self, owner: UserId, year: i32, month: i32) -> FinanceResult<bool>;
}
