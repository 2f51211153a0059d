//! In-memory stores for service tests.
//!
//! Mirrors the database constraints: unique keys and the restrictive
//! category foreign key fail with `FinanceError::Conflict`.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use fintrack_shared::{BudgetId, CategoryId, TransactionId, UserId};

use crate::budget::{Budget, BudgetFilter, NewBudget};
use crate::category::{Category, CategoryFilter, CategoryType, NewCategory};
use crate::error::{FinanceError, FinanceResult};
use crate::repository::{BudgetStore, CategoryStore, TransactionStore};
use crate::transaction::{
    NewTransaction, Transaction, TransactionDetail, TransactionFilter, TransactionOrdering,
};

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

/// Shared in-memory store. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Inserts a category directly, bypassing the services.
    pub fn seed_category(&self, owner: UserId, name: &str, category_type: CategoryType) -> Category {
        let category = Category {
            id: CategoryId::new(),
            user_id: owner,
            name: name.to_string(),
            category_type,
            created_at: Utc::now(),
        };
        self.lock().categories.push(category.clone());
        category
    }

    pub fn transaction_count(&self) -> usize {
        self.lock().transactions.len()
    }
}

impl State {
    fn detail(&self, tx: &Transaction) -> FinanceResult<TransactionDetail> {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == tx.category_id)
            .ok_or_else(|| FinanceError::Conflict("category does not exist".to_string()))?;
        Ok(TransactionDetail {
            transaction: tx.clone(),
            category_name: category.name.clone(),
            category_type: category.category_type,
        })
    }

    fn category_clash(&self, candidate: &Category) -> bool {
        self.categories.iter().any(|c| {
            c.id != candidate.id
                && c.user_id == candidate.user_id
                && c.name == candidate.name
                && c.category_type == candidate.category_type
        })
    }

    fn budget_clash(&self, candidate: &Budget) -> bool {
        self.budgets.iter().any(|b| {
            b.id != candidate.id
                && b.user_id == candidate.user_id
                && b.year == candidate.year
                && b.month == candidate.month
        })
    }
}

fn compare(ordering: TransactionOrdering, a: &TransactionDetail, b: &TransactionDetail) -> Ordering {
    let (a, b) = (&a.transaction, &b.transaction);
    let primary = match ordering {
        TransactionOrdering::DateAsc => a.date.cmp(&b.date),
        TransactionOrdering::DateDesc => b.date.cmp(&a.date),
        TransactionOrdering::AmountAsc => a.amount.cmp(&b.amount),
        TransactionOrdering::AmountDesc => b.amount.cmp(&a.amount),
        TransactionOrdering::IdAsc => a.id.cmp(&b.id),
        TransactionOrdering::IdDesc => Ordering::Equal,
    };
    primary.then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn insert(&self, category: NewCategory) -> FinanceResult<Category> {
        let mut state = self.lock();
        let category = Category {
            id: CategoryId::new(),
            user_id: category.user_id,
            name: category.name,
            category_type: category.category_type,
            created_at: Utc::now(),
        };
        if state.category_clash(&category) {
            return Err(FinanceError::Conflict("duplicate category".to_string()));
        }
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn find(&self, id: CategoryId) -> FinanceResult<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, owner: UserId, filter: &CategoryFilter) -> FinanceResult<Vec<Category>> {
        let mut rows: Vec<_> = self
            .lock()
            .categories
            .iter()
            .filter(|c| c.user_id == owner && filter.matches(c))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn update(&self, category: &Category) -> FinanceResult<Category> {
        let mut state = self.lock();
        if state.category_clash(category) {
            return Err(FinanceError::Conflict("duplicate category".to_string()));
        }
        let slot = state
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| FinanceError::not_found("Category", category.id))?;
        *slot = category.clone();
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> FinanceResult<()> {
        let mut state = self.lock();
        if state.transactions.iter().any(|t| t.category_id == id) {
            return Err(FinanceError::Conflict("category is referenced".to_string()));
        }
        state.categories.retain(|c| c.id != id);
        Ok(())
    }

    async fn name_taken(
        &self,
        owner: UserId,
        name: &str,
        category_type: CategoryType,
        excluding: Option<CategoryId>,
    ) -> FinanceResult<bool> {
        Ok(self.lock().categories.iter().any(|c| {
            c.user_id == owner
                && c.name == name
                && c.category_type == category_type
                && Some(c.id) != excluding
        }))
    }

    async fn is_referenced(&self, id: CategoryId) -> FinanceResult<bool> {
        Ok(self.lock().transactions.iter().any(|t| t.category_id == id))
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn insert(&self, transaction: NewTransaction) -> FinanceResult<TransactionDetail> {
        let mut state = self.lock();
        let tx = Transaction {
            id: TransactionId::new(),
            user_id: transaction.user_id,
            category_id: transaction.category_id,
            amount: transaction.amount,
            date: transaction.date,
            description: transaction.description,
            created_at: Utc::now(),
        };
        let detail = state.detail(&tx)?;
        state.transactions.push(tx);
        Ok(detail)
    }

    async fn find(&self, id: TransactionId) -> FinanceResult<Option<TransactionDetail>> {
        let state = self.lock();
        state
            .transactions
            .iter()
            .find(|t| t.id == id)
            .map(|t| state.detail(t))
            .transpose()
    }

    async fn list(
        &self,
        owner: UserId,
        filter: &TransactionFilter,
        ordering: TransactionOrdering,
    ) -> FinanceResult<Vec<TransactionDetail>> {
        let state = self.lock();
        let mut rows = state
            .transactions
            .iter()
            .filter(|t| t.user_id == owner)
            .map(|t| state.detail(t))
            .collect::<FinanceResult<Vec<_>>>()?;
        rows.retain(|r| filter.matches(r));
        rows.sort_by(|a, b| compare(ordering, a, b));
        Ok(rows)
    }

    async fn update(&self, transaction: &Transaction) -> FinanceResult<TransactionDetail> {
        let mut state = self.lock();
        let detail = state.detail(transaction)?;
        let slot = state
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| FinanceError::not_found("Transaction", transaction.id))?;
        *slot = transaction.clone();
        Ok(detail)
    }

    async fn delete(&self, id: TransactionId) -> FinanceResult<()> {
        self.lock().transactions.retain(|t| t.id != id);
        Ok(())
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn insert(&self, budget: NewBudget) -> FinanceResult<Budget> {
        let mut state = self.lock();
        let budget = Budget {
            id: BudgetId::new(),
            user_id: budget.user_id,
            year: budget.year,
            month: budget.month,
            amount: budget.amount,
            created_at: Utc::now(),
        };
        if state.budget_clash(&budget) {
            return Err(FinanceError::Conflict("duplicate budget".to_string()));
        }
        state.budgets.push(budget.clone());
        Ok(budget)
    }

    async fn find(&self, id: BudgetId) -> FinanceResult<Option<Budget>> {
        Ok(self.lock().budgets.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self, owner: UserId, filter: &BudgetFilter) -> FinanceResult<Vec<Budget>> {
        let mut rows: Vec<_> = self
            .lock()
            .budgets
            .iter()
            .filter(|b| b.user_id == owner && filter.matches(b))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        Ok(rows)
    }

    async fn update(&self, budget: &Budget) -> FinanceResult<Budget> {
        let mut state = self.lock();
        if state.budget_clash(budget) {
            return Err(FinanceError::Conflict("duplicate budget".to_string()));
        }
        let slot = state
            .budgets
            .iter_mut()
            .find(|b| b.id == budget.id)
            .ok_or_else(|| FinanceError::not_found("Budget", budget.id))?;
        *slot = budget.clone();
        Ok(budget.clone())
    }

    async fn delete(&self, id: BudgetId) -> FinanceResult<()> {
        self.lock().budgets.retain(|b| b.id != id);
        Ok(())
    }

    async fn period_taken(&self, owner: UserId, year: i32, month: i32) -> FinanceResult<bool> {
        Ok(self
            .lock()
            .budgets
            .iter()
            .any(|b| b.user_id == owner && b.year == year && b.month == month))
    }
}
