//! Category repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use fintrack_core::category::{Category, CategoryFilter, CategoryType, NewCategory};
use fintrack_core::repository::CategoryStore;
use fintrack_core::{FinanceError, FinanceResult};
use fintrack_shared::{CategoryId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Unchanged,
};

use super::{describe_conflict, storage_error, utc};
use crate::entities::sea_orm_active_enums::CategoryType as DbCategoryType;
use crate::entities::{categories, transactions};

/// Category repository backed by the `categories` table.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_domain(model: categories::Model) -> Category {
    Category {
        id: model.id.into(),
        user_id: model.user_id.into(),
        name: model.name,
        category_type: model.category_type.into(),
        created_at: utc(model.created_at),
    }
}

fn duplicate(name: &str, category_type: CategoryType) -> String {
    format!("A {category_type} category named \"{name}\" already exists.")
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn insert(&self, category: NewCategory) -> FinanceResult<Category> {
        let message = duplicate(&category.name, category.category_type);
        let model = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            user_id: Set(category.user_id.into_inner()),
            name: Set(category.name),
            category_type: Set(category.category_type.into()),
            created_at: Set(Utc::now().into()),
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| describe_conflict(e, || message))?;
        Ok(into_domain(created))
    }

    async fn find(&self, id: CategoryId) -> FinanceResult<Option<Category>> {
        let model = categories::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(model.map(into_domain))
    }

    async fn list(&self, owner: UserId, filter: &CategoryFilter) -> FinanceResult<Vec<Category>> {
        let mut query =
            categories::Entity::find().filter(categories::Column::UserId.eq(owner.into_inner()));
        if let Some(category_type) = filter.category_type {
            query = query.filter(
                categories::Column::CategoryType
                    .eq(DbCategoryType::from(category_type)),
            );
        }

        let models = query
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    async fn update(&self, category: &Category) -> FinanceResult<Category> {
        let model = categories::ActiveModel {
            id: Unchanged(category.id.into_inner()),
            name: Set(category.name.clone()),
            category_type: Set(category.category_type.into()),
            ..Default::default()
        };

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => FinanceError::not_found("Category", category.id),
            other => describe_conflict(other, || {
                duplicate(&category.name, category.category_type)
            }),
        })?;
        Ok(into_domain(updated))
    }

    async fn delete(&self, id: CategoryId) -> FinanceResult<()> {
        categories::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| {
                describe_conflict(e, || {
                    "Cannot delete category because it is referenced by existing transactions."
                        .to_string()
                })
            })?;
        Ok(())
    }

    async fn name_taken(
        &self,
        owner: UserId,
        name: &str,
        category_type: CategoryType,
        excluding: Option<CategoryId>,
    ) -> FinanceResult<bool> {
        let mut query = categories::Entity::find()
            .filter(categories::Column::UserId.eq(owner.into_inner()))
            .filter(categories::Column::Name.eq(name))
            .filter(
                categories::Column::CategoryType
                    .eq(DbCategoryType::from(category_type)),
            );
        if let Some(id) = excluding {
            query = query.filter(categories::Column::Id.ne(id.into_inner()));
        }

        let count = query.count(&self.db).await.map_err(storage_error)?;
        Ok(count > 0)
    }

    async fn is_referenced(&self, id: CategoryId) -> FinanceResult<bool> {
        let count = transactions::Entity::find()
            .filter(transactions::Column::CategoryId.eq(id.into_inner()))
            .count(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(count > 0)
    }
}
