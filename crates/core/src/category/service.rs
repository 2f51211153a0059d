//! Category operations scoped to the calling user.

use fintrack_shared::{CategoryId, FieldErrors, UserId};

use super::types::{Category, CategoryFilter, CategoryType, NewCategory};
use super::wire::{CategoryPatch, CategoryPayload, CategoryRecord};
use crate::access;
use crate::error::{FinanceError, FinanceResult};
use crate::repository::CategoryStore;
use crate::validation::{CATEGORY_NAME_MAX_LEN, check_text};

/// Category service composing storage, access policy, and representation.
pub struct CategoryService<S> {
    store: S,
}

impl<S: CategoryStore> CategoryService<S> {
    /// Creates a new category service.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists the caller's categories.
    pub async fn list(
        &self,
        caller: UserId,
        filter: &CategoryFilter,
    ) -> FinanceResult<Vec<CategoryRecord>> {
        let categories = self.store.list(caller, filter).await?;
        Ok(categories.into_iter().map(CategoryRecord::from).collect())
    }

    /// Returns one of the caller's categories.
    pub async fn retrieve(&self, caller: UserId, id: CategoryId) -> FinanceResult<CategoryRecord> {
        self.owned(caller, id).await.map(CategoryRecord::from)
    }

    /// Creates a category owned by the caller.
    pub async fn create(
        &self,
        caller: UserId,
        payload: CategoryPayload,
    ) -> FinanceResult<CategoryRecord> {
        let mut errors = FieldErrors::new();
        let name = check_text(&mut errors, "name", &payload.name, CATEGORY_NAME_MAX_LEN);
        errors.into_result()?;

        self.ensure_unique(caller, &name, payload.category_type, None)
            .await?;

        let category = self
            .store
            .insert(NewCategory {
                user_id: caller,
                name,
                category_type: payload.category_type,
            })
            .await?;
        Ok(category.into())
    }

    /// Applies `changes` to one of the caller's categories.
    pub async fn update(
        &self,
        caller: UserId,
        id: CategoryId,
        changes: CategoryPatch,
    ) -> FinanceResult<CategoryRecord> {
        let mut category = self.owned(caller, id).await?;

        let mut errors = FieldErrors::new();
        if let Some(name) = changes.name {
            category.name = check_text(&mut errors, "name", &name, CATEGORY_NAME_MAX_LEN);
        }
        errors.into_result()?;
        if let Some(category_type) = changes.category_type {
            category.category_type = category_type;
        }

        self.ensure_unique(caller, &category.name, category.category_type, Some(id))
            .await?;

        let updated = self.store.update(&category).await?;
        Ok(updated.into())
    }

    /// Deletes one of the caller's categories unless a transaction uses it.
    pub async fn delete(&self, caller: UserId, id: CategoryId) -> FinanceResult<()> {
        let category = self.owned(caller, id).await?;

        if self.store.is_referenced(id).await? {
            return Err(FinanceError::Conflict(format!(
                "Cannot delete category \"{}\" because it is referenced by existing transactions.",
                category.name
            )));
        }

        self.store.delete(id).await
    }

    async fn owned(&self, caller: UserId, id: CategoryId) -> FinanceResult<Category> {
        access::visible_to(self.store.find(id).await?, caller)
            .ok_or_else(|| FinanceError::not_found("Category", id))
    }

    async fn ensure_unique(
        &self,
        caller: UserId,
        name: &str,
        category_type: CategoryType,
        excluding: Option<CategoryId>,
    ) -> FinanceResult<()> {
        if self
            .store
            .name_taken(caller, name, category_type, excluding)
            .await?
        {
            return Err(FieldErrors::non_field(format!(
                "A {category_type} category named \"{name}\" already exists."
            ))
            .into());
        }
        Ok(())
    }
}
