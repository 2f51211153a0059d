//! Budget repository for budget database operations.

use async_trait::async_trait;
use chrono::Utc;
use fintrack_core::budget::{Budget, BudgetFilter, NewBudget};
use fintrack_core::repository::BudgetStore;
use fintrack_core::{FinanceError, FinanceResult};
use fintrack_shared::{BudgetId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Unchanged,
};

use super::{describe_conflict, money, storage_error, utc};
use crate::entities::budgets;

/// Budget repository backed by the `budgets` table.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_domain(model: budgets::Model) -> Budget {
    Budget {
        id: model.id.into(),
        user_id: model.user_id.into(),
        year: model.year,
        month: model.month,
        amount: money(model.amount),
        created_at: utc(model.created_at),
    }
}

fn duplicate(year: i32, month: i32) -> String {
    format!("Budget for {year}-{month:02} already exists.")
}

#[async_trait]
impl BudgetStore for BudgetRepository {
    async fn insert(&self, budget: NewBudget) -> FinanceResult<Budget> {
        let (year, month) = (budget.year, budget.month);
        let model = budgets::ActiveModel {
            id: Set(BudgetId::new().into_inner()),
            user_id: Set(budget.user_id.into_inner()),
            year: Set(year),
            month: Set(month),
            amount: Set(budget.amount),
            created_at: Set(Utc::now().into()),
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| describe_conflict(e, || duplicate(year, month)))?;
        Ok(into_domain(created))
    }

    async fn find(&self, id: BudgetId) -> FinanceResult<Option<Budget>> {
        let model = budgets::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(model.map(into_domain))
    }

    async fn list(&self, owner: UserId, filter: &BudgetFilter) -> FinanceResult<Vec<Budget>> {
        let mut query =
            budgets::Entity::find().filter(budgets::Column::UserId.eq(owner.into_inner()));
        if let Some(year) = filter.year {
            query = query.filter(budgets::Column::Year.eq(year));
        }
        if let Some(month) = filter.month {
            query = query.filter(budgets::Column::Month.eq(month));
        }

        let models = query
            .order_by_desc(budgets::Column::Year)
            .order_by_desc(budgets::Column::Month)
            .all(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    async fn update(&self, budget: &Budget) -> FinanceResult<Budget> {
        let model = budgets::ActiveModel {
            id: Unchanged(budget.id.into_inner()),
            year: Set(budget.year),
            month: Set(budget.month),
            amount: Set(budget.amount),
            ..Default::default()
        };

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => FinanceError::not_found("Budget", budget.id),
            other => describe_conflict(other, || duplicate(budget.year, budget.month)),
        })?;
        Ok(into_domain(updated))
    }

    async fn delete(&self, id: BudgetId) -> FinanceResult<()> {
        budgets::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn period_taken(&self, owner: UserId, year: i32, month: i32) -> FinanceResult<bool> {
        let count = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(owner.into_inner()))
            .filter(budgets::Column::Year.eq(year))
            .filter(budgets::Column::Month.eq(month))
            .count(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(count > 0)
    }
}
