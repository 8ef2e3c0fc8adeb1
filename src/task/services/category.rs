//! Category management scoped to the owning user.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{Category, CategoryColor, CategoryId, CategoryName, CategoryPatch, Task, UserId},
    ports::{CategoryRepository, TaskFilter, TaskRepository},
};
use mockable::Clock;
use std::sync::Arc;

/// Category orchestration service.
#[derive(Clone)]
pub struct CategoryService<R, C>
where
    R: CategoryRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> CategoryService<R, C>
where
    R: CategoryRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new category service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a category, using the default color when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid name or color, or
    /// [`TaskServiceError::Repository`] when storing fails.
    pub async fn create(
        &self,
        owner: UserId,
        name: &str,
        color: Option<&str>,
    ) -> TaskServiceResult<Category> {
        let name = CategoryName::new(name)?;
        let color = color.map(CategoryColor::new).transpose()?.unwrap_or_default();
        let category = Category::new(owner, name, color, &*self.clock);
        self.repository.store_category(&category).await?;
        Ok(category)
    }

    /// Lists the owner's categories by name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, owner: UserId) -> TaskServiceResult<Vec<Category>> {
        Ok(self.repository.list_categories(owner).await?)
    }

    /// Fetches one of the owner's categories.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::CategoryNotFound`] when it is missing or
    /// belongs to someone else.
    pub async fn get(&self, owner: UserId, id: CategoryId) -> TaskServiceResult<Category> {
        self.repository
            .find_category(id, owner)
            .await?
            .ok_or(TaskServiceError::CategoryNotFound(id))
    }

    /// Renames or recolors a category.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::CategoryNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn update(
        &self,
        owner: UserId,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> TaskServiceResult<Category> {
        let mut category = self.get(owner, id).await?;
        category.apply(patch);
        self.repository.update_category(&category).await?;
        Ok(category)
    }

    /// Deletes a category; its tasks survive without one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::CategoryNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn delete(&self, owner: UserId, id: CategoryId) -> TaskServiceResult<()> {
        if self.repository.delete_category(id, owner).await? {
            Ok(())
        } else {
            Err(TaskServiceError::CategoryNotFound(id))
        }
    }

    /// Lists the tasks filed under a category, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::CategoryNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn tasks_in_category(
        &self,
        owner: UserId,
        id: CategoryId,
    ) -> TaskServiceResult<Vec<Task>> {
        let category = self.get(owner, id).await?;
        Ok(self
            .repository
            .list_for_owner(owner, TaskFilter::all().with_category(category.id()))
            .await?)
    }
}
