//! Task creation, editing, status changes, subtasks and statistics.

use super::{TaskServiceError, TaskServiceResult};
use crate::scheduling::domain::{TaskStatistics, display_order};
use crate::task::{
    domain::{
        CategoryId, FieldUpdate, NewTask, Priority, Subtask, SubtaskId, SubtaskTitle, Task,
        TaskId, TaskPatch, TaskStatus, TaskTitle, UserId,
    },
    ports::{CategoryRepository, SubtaskRepository, TaskFilter, TaskRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task from raw user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Priority,
    category: Option<CategoryId>,
    deadline: Option<DateTime<Utc>>,
    estimated_minutes: Option<u32>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title and medium priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Priority::default(),
            category: None,
            deadline: None,
            estimated_minutes: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority tier.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the estimated duration in minutes.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }
}

/// Task orchestration service.
///
/// Every operation is scoped to the owning user; tasks owned by someone else
/// are reported as not found.
pub struct TaskService<R, C>
where
    R: TaskRepository + CategoryRepository + SubtaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository + CategoryRepository + SubtaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository + CategoryRepository + SubtaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid title,
    /// [`TaskServiceError::CategoryNotFound`] when the category is not the
    /// owner's, or [`TaskServiceError::Repository`] when storing fails.
    pub async fn create(
        &self,
        owner: UserId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(&request.title)?;
        if let Some(category) = request.category {
            self.ensure_category(category, owner).await?;
        }

        let mut input = NewTask::new(owner, title);
        input.description = request
            .description
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        input.priority = request.priority;
        input.category = request.category;
        input.deadline = request.deadline;
        input.estimated_minutes = request.estimated_minutes;

        let task = Task::new(input, &*self.clock);
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Fetches one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing or
    /// not the owner's.
    pub async fn get(&self, owner: UserId, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_for_owner(id, owner)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    /// Lists the owner's tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, owner: UserId, filter: TaskFilter) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_for_owner(owner, filter).await?)
    }

    /// Lists the owner's tasks in display priority order.
    ///
    /// Equal scores fall back to the earlier deadline, then newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_by_priority(
        &self,
        owner: UserId,
        filter: TaskFilter,
    ) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.repository.list_for_owner(owner, filter).await?;
        Ok(display_order(tasks, self.clock.utc()))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::CategoryNotFound`] for a foreign category, or
    /// [`TaskServiceError::Repository`].
    pub async fn update(
        &self,
        owner: UserId,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskServiceResult<Task> {
        if let FieldUpdate::Set(category) = patch.category {
            self.ensure_category(category, owner).await?;
        }
        let mut task = self.get(owner, id).await?;
        task.apply(patch, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Marks a task as in progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn start(&self, owner: UserId, id: TaskId) -> TaskServiceResult<Task> {
        self.change_status(owner, id, TaskStatus::InProgress).await
    }

    /// Marks a task as completed, recording the first completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn complete(&self, owner: UserId, id: TaskId) -> TaskServiceResult<Task> {
        self.change_status(owner, id, TaskStatus::Completed).await
    }

    /// Marks a task as cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn cancel(&self, owner: UserId, id: TaskId) -> TaskServiceResult<Task> {
        self.change_status(owner, id, TaskStatus::Cancelled).await
    }

    /// Deletes a task together with its subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn delete(&self, owner: UserId, id: TaskId) -> TaskServiceResult<()> {
        if self.repository.delete(id, owner).await? {
            Ok(())
        } else {
            Err(TaskServiceError::TaskNotFound(id))
        }
    }

    /// Adds worked minutes to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::Domain`] on accumulator overflow, or
    /// [`TaskServiceError::Repository`].
    pub async fn record_time(
        &self,
        owner: UserId,
        id: TaskId,
        minutes: u32,
    ) -> TaskServiceResult<Task> {
        let mut task = self.get(owner, id).await?;
        task.record_time(minutes, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Adds a checklist item to one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid title,
    /// [`TaskServiceError::TaskNotFound`] or [`TaskServiceError::Repository`].
    pub async fn add_subtask(
        &self,
        owner: UserId,
        task_id: TaskId,
        title: &str,
    ) -> TaskServiceResult<Subtask> {
        let title = SubtaskTitle::new(title)?;
        let task = self.get(owner, task_id).await?;
        let subtask = Subtask::new(task.id(), title, &*self.clock);
        self.repository.store_subtask(&subtask).await?;
        Ok(subtask)
    }

    /// Flips a checklist item between done and open.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::SubtaskNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn toggle_subtask(
        &self,
        owner: UserId,
        task_id: TaskId,
        subtask_id: SubtaskId,
    ) -> TaskServiceResult<Subtask> {
        let task = self.get(owner, task_id).await?;
        let mut subtask = self
            .repository
            .find_subtask(subtask_id, task.id())
            .await?
            .ok_or(TaskServiceError::SubtaskNotFound(subtask_id))?;
        subtask.toggle();
        self.repository.update_subtask(&subtask).await?;
        Ok(subtask)
    }

    /// Lists a task's checklist in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn subtasks(&self, owner: UserId, task_id: TaskId) -> TaskServiceResult<Vec<Subtask>> {
        let task = self.get(owner, task_id).await?;
        Ok(self.repository.list_subtasks(task.id()).await?)
    }

    /// Computes the owner's task statistics.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn statistics(&self, owner: UserId) -> TaskServiceResult<TaskStatistics> {
        let tasks = self
            .repository
            .list_for_owner(owner, TaskFilter::all())
            .await?;
        Ok(TaskStatistics::compute(&tasks, self.clock.utc()))
    }

    async fn change_status(
        &self,
        owner: UserId,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskServiceResult<Task> {
        let mut task = self.get(owner, id).await?;
        task.change_status(status, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    async fn ensure_category(&self, id: CategoryId, owner: UserId) -> TaskServiceResult<()> {
        self.repository
            .find_category(id, owner)
            .await?
            .map(|_| ())
            .ok_or(TaskServiceError::CategoryNotFound(id))
    }
}
