//! Thread-safe in-memory implementation of every entity store port.
//!
//! All four repositories share one state so that cascading deletes behave
//! like the relational schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Category, CategoryId, ChatId, Subtask, SubtaskId, Task, TaskId, User, UserId},
    ports::{
        CategoryRepository, RepositoryError, RepositoryResult, SubtaskRepository, TaskFilter,
        TaskRepository, UserRepository,
    },
};

/// Thread-safe in-memory entity store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    tasks: HashMap<TaskId, Task>,
    categories: HashMap<CategoryId, Category>,
    subtasks: HashMap<SubtaskId, Subtask>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|err| {
            RepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|err| {
            RepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl StoreState {
    fn owned_task(&self, id: TaskId, owner: UserId) -> Option<&Task> {
        self.tasks.get(&id).filter(|task| task.owner() == owner)
    }

    fn owned_category(&self, id: CategoryId, owner: UserId) -> Option<&Category> {
        self.categories
            .get(&id)
            .filter(|category| category.owner() == owner)
    }

    fn remove_task(&mut self, id: TaskId) {
        self.tasks.remove(&id);
        self.subtasks.retain(|_, subtask| subtask.task_id() != id);
    }
}

/// Sorts newest first; ties fall back to the identifier so that listings are
/// deterministic.
fn newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        right
            .created_at()
            .cmp(&left.created_at())
            .then_with(|| left.id().cmp(&right.id()))
    });
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn store(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(RepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let already_reminded = state
            .owned_task(task.id(), task.owner())
            .ok_or(RepositoryError::TaskNotFound(task.id()))?
            .reminder_sent();
        let mut stored = task.clone();
        // The flag only moves forward, even when `task` was read before a sweep.
        if already_reminded {
            stored.mark_reminder_sent();
        }
        state.tasks.insert(task.id(), stored);
        Ok(())
    }

    async fn find_for_owner(&self, id: TaskId, owner: UserId) -> RepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.owned_task(id, owner).cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        filter: TaskFilter,
    ) -> RepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.owner() == owner && filter.matches(task))
            .cloned()
            .collect();
        newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> RepositoryResult<bool> {
        let mut state = self.write()?;
        if state.owned_task(id, owner).is_none() {
            return Ok(false);
        }
        state.remove_task(id);
        Ok(true)
    }

    async fn find_due_for_reminder(
        &self,
        threshold: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.is_due_for_reminder(threshold))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.deadline(), task.id()));
        Ok(tasks)
    }

    async fn mark_reminder_sent(&self, id: TaskId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(RepositoryError::TaskNotFound(id))?;
        task.mark_reminder_sent();
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryTaskStore {
    async fn store_category(&self, category: &Category) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state.categories.insert(category.id(), category.clone());
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state
            .owned_category(category.id(), category.owner())
            .is_none()
        {
            return Err(RepositoryError::CategoryNotFound(category.id()));
        }
        state.categories.insert(category.id(), category.clone());
        Ok(())
    }

    async fn find_category(
        &self,
        id: CategoryId,
        owner: UserId,
    ) -> RepositoryResult<Option<Category>> {
        let state = self.read()?;
        Ok(state.owned_category(id, owner).cloned())
    }

    async fn list_categories(&self, owner: UserId) -> RepositoryResult<Vec<Category>> {
        let state = self.read()?;
        let mut categories: Vec<Category> = state
            .categories
            .values()
            .filter(|category| category.owner() == owner)
            .cloned()
            .collect();
        categories.sort_by(|left, right| {
            left.name()
                .as_str()
                .cmp(right.name().as_str())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(categories)
    }

    async fn delete_category(&self, id: CategoryId, owner: UserId) -> RepositoryResult<bool> {
        let mut state = self.write()?;
        if state.owned_category(id, owner).is_none() {
            return Ok(false);
        }
        state.categories.remove(&id);
        for task in state.tasks.values_mut() {
            if task.category() == Some(id) {
                task.detach_category();
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl SubtaskRepository for InMemoryTaskStore {
    async fn store_subtask(&self, subtask: &Subtask) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&subtask.task_id()) {
            return Err(RepositoryError::TaskNotFound(subtask.task_id()));
        }
        state.subtasks.insert(subtask.id(), subtask.clone());
        Ok(())
    }

    async fn update_subtask(&self, subtask: &Subtask) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .subtasks
            .get_mut(&subtask.id())
            .filter(|existing| existing.task_id() == subtask.task_id())
            .ok_or(RepositoryError::SubtaskNotFound(subtask.id()))?;
        *slot = subtask.clone();
        Ok(())
    }

    async fn find_subtask(
        &self,
        id: SubtaskId,
        task_id: TaskId,
    ) -> RepositoryResult<Option<Subtask>> {
        let state = self.read()?;
        Ok(state
            .subtasks
            .get(&id)
            .filter(|subtask| subtask.task_id() == task_id)
            .cloned())
    }

    async fn list_subtasks(&self, task_id: TaskId) -> RepositoryResult<Vec<Subtask>> {
        let state = self.read()?;
        let mut subtasks: Vec<Subtask> = state
            .subtasks
            .values()
            .filter(|subtask| subtask.task_id() == task_id)
            .cloned()
            .collect();
        subtasks.sort_by_key(|subtask| (subtask.created_at(), subtask.id()));
        Ok(subtasks)
    }
}

#[async_trait]
impl UserRepository for InMemoryTaskStore {
    async fn store_user(&self, user: &User) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state
            .users
            .values()
            .any(|existing| existing.chat_id() == user.chat_id())
        {
            return Err(RepositoryError::DuplicateChatId(user.chat_id()));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_user_by_chat_id(&self, chat_id: ChatId) -> RepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .users
            .values()
            .find(|user| user.chat_id() == chat_id)
            .cloned())
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<bool> {
        let mut state = self.write()?;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        let owned: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|task| task.owner() == id)
            .map(Task::id)
            .collect();
        for task_id in owned {
            state.remove_task(task_id);
        }
        state.categories.retain(|_, category| category.owner() != id);
        Ok(true)
    }
}
