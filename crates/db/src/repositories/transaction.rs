//! Transaction repository for database operations.
//!
//! Every read joins the owning category so callers get its name and type
//! without a second lookup.

use async_trait::async_trait;
use chrono::Utc;
use fintrack_core::repository::TransactionStore;
use fintrack_core::transaction::{
    NewTransaction, Transaction, TransactionDetail, TransactionFilter, TransactionOrdering,
};
use fintrack_core::{FinanceError, FinanceResult};
use fintrack_shared::{TransactionId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Select, Set, Unchanged,
};

use super::{describe_conflict, money, storage_error, utc};
use crate::entities::{categories, transactions};

const MISSING_CATEGORY: &str = "Category does not exist.";

/// Transaction repository backed by the `transactions` table.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn detail(&self, id: TransactionId) -> FinanceResult<TransactionDetail> {
        self.find(id)
            .await?
            .ok_or_else(|| FinanceError::not_found("Transaction", id))
    }
}

fn into_domain(
    (model, category): (transactions::Model, Option<categories::Model>),
) -> FinanceResult<TransactionDetail> {
    let category = category.ok_or_else(|| {
        FinanceError::Storage(format!("transaction {} has no category", model.id))
    })?;

    Ok(TransactionDetail {
        transaction: Transaction {
            id: model.id.into(),
            user_id: model.user_id.into(),
            category_id: model.category_id.into(),
            amount: money(model.amount),
            date: model.date,
            description: model.description,
            created_at: utc(model.created_at),
        },
        category_name: category.name,
        category_type: category.category_type.into(),
    })
}

fn apply_filter(
    mut query: Select<transactions::Entity>,
    filter: &TransactionFilter,
) -> Select<transactions::Entity> {
    if let Some(category) = filter.category {
        query = query.filter(transactions::Column::CategoryId.eq(category.into_inner()));
    }
    if let Some(from) = filter.date_from {
        query = query.filter(transactions::Column::Date.gte(from));
    }
    if let Some(to) = filter.date_to {
        query = query.filter(transactions::Column::Date.lte(to));
    }
    if let Some(min) = filter.min_amount {
        query = query.filter(transactions::Column::Amount.gte(min));
    }
    if let Some(max) = filter.max_amount {
        query = query.filter(transactions::Column::Amount.lte(max));
    }
    query
}

fn apply_ordering(
    query: Select<transactions::Entity>,
    ordering: TransactionOrdering,
) -> Select<transactions::Entity> {
    let query = match ordering {
        TransactionOrdering::DateAsc => query.order_by_asc(transactions::Column::Date),
        TransactionOrdering::DateDesc => query.order_by_desc(transactions::Column::Date),
        TransactionOrdering::AmountAsc => query.order_by_asc(transactions::Column::Amount),
        TransactionOrdering::AmountDesc => query.order_by_desc(transactions::Column::Amount),
        TransactionOrdering::IdAsc => query.order_by_asc(transactions::Column::Id),
        TransactionOrdering::IdDesc => query,
    };
    // IDs are time-ordered, so this also keeps same-day rows newest first.
    query.order_by_desc(transactions::Column::Id)
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn insert(&self, transaction: NewTransaction) -> FinanceResult<TransactionDetail> {
        let id = TransactionId::new();
        let model = transactions::ActiveModel {
            id: Set(id.into_inner()),
            user_id: Set(transaction.user_id.into_inner()),
            category_id: Set(transaction.category_id.into_inner()),
            amount: Set(transaction.amount),
            date: Set(transaction.date),
            description: Set(transaction.description),
            created_at: Set(Utc::now().into()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| describe_conflict(e, || MISSING_CATEGORY.to_string()))?;
        self.detail(id).await
    }

    async fn find(&self, id: TransactionId) -> FinanceResult<Option<TransactionDetail>> {
        transactions::Entity::find_by_id(id.into_inner())
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .map(into_domain)
            .transpose()
    }

    async fn list(
        &self,
        owner: UserId,
        filter: &TransactionFilter,
        ordering: TransactionOrdering,
    ) -> FinanceResult<Vec<TransactionDetail>> {
        let query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(owner.into_inner()));
        let query = apply_ordering(apply_filter(query, filter), ordering);

        query
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    async fn update(&self, transaction: &Transaction) -> FinanceResult<TransactionDetail> {
        let model = transactions::ActiveModel {
            id: Unchanged(transaction.id.into_inner()),
            category_id: Set(transaction.category_id.into_inner()),
            amount: Set(transaction.amount),
            date: Set(transaction.date),
            description: Set(transaction.description.clone()),
            ..Default::default()
        };

        model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => FinanceError::not_found("Transaction", transaction.id),
            other => describe_conflict(other, || MISSING_CATEGORY.to_string()),
        })?;
        self.detail(transaction.id).await
    }

    async fn delete(&self, id: TransactionId) -> FinanceResult<()> {
        transactions::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}
