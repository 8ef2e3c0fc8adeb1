//! `PostgreSQL` implementation of every entity store port.
//!
//! Each port call runs as one transaction on a pooled connection inside
//! [`tokio::task::spawn_blocking`]. Cascades (task → subtasks, user → tasks
//! and categories, category → null task reference) are enforced by the
//! foreign keys in `migrations/`.

use super::{
    conversion::{
        category_to_row, row_to_category, row_to_subtask, row_to_task, row_to_user,
        subtask_to_row, task_to_row, user_to_row,
    },
    models::{CategoryRow, SubtaskRow, TaskChangeset, TaskRow, UserRow},
    schema::{categories, subtasks, tasks, users},
};
use crate::task::{
    domain::{
        Category, CategoryId, ChatId, Subtask, SubtaskId, Task, TaskId, TaskStatus, User, UserId,
    },
    ports::{
        CategoryRepository, RepositoryError, RepositoryResult, SubtaskRepository, TaskFilter,
        TaskRepository, UserRepository,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the entity store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed entity store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError`] when the initial connections cannot be opened.
    pub fn connect(database_url: &str, max_connections: u32) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().max_size(max_connections).build(manager)?;
        Ok(Self::new(pool))
    }

    async fn in_transaction<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut pooled = pool.get().map_err(RepositoryError::persistence)?;
            let connection: &mut PgConnection = &mut pooled;
            connection.transaction::<T, RepositoryError, _>(f)
        })
        .await
        .map_err(RepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskStore {
    async fn store(&self, task: &Task) -> RepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task)?;
        self.in_transaction(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::DuplicateTask(task_id)
                    }
                    other => RepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task)?;
        let (id, owner, reminded) = (row.id, row.user_id, row.reminder_sent);
        let changes = TaskChangeset::from(row);
        self.in_transaction(move |connection| {
            // A stale read must not clear a flag set by a concurrent sweep.
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id))
                    .filter(tasks::user_id.eq(owner)),
            )
            .set((
                &changes,
                tasks::reminder_sent.eq(tasks::reminder_sent.or::<_, diesel::sql_types::Bool>(reminded)),
            ))
            .execute(connection)?;
            if affected == 0 {
                return Err(RepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_for_owner(&self, id: TaskId, owner: UserId) -> RepositoryResult<Option<Task>> {
        self.in_transaction(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::user_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        filter: TaskFilter,
    ) -> RepositoryResult<Vec<Task>> {
        self.in_transaction(move |connection| {
            let mut query = tasks::table
                .filter(tasks::user_id.eq(owner.into_inner()))
                .into_boxed();
            if let Some(status) = filter.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(category) = filter.category {
                query = query.filter(tasks::category_id.eq(category.into_inner()));
            }
            let rows = query
                .order((tasks::created_at.desc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> RepositoryResult<bool> {
        self.in_transaction(move |connection| {
            let affected = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::user_id.eq(owner.into_inner())),
            )
            .execute(connection)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn find_due_for_reminder(
        &self,
        threshold: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Task>> {
        self.in_transaction(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(TaskStatus::Pending.as_str()))
                .filter(tasks::deadline.is_not_null())
                .filter(tasks::deadline.le(threshold))
                .filter(tasks::reminder_sent.eq(false))
                .order((tasks::deadline.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn mark_reminder_sent(&self, id: TaskId) -> RepositoryResult<()> {
        self.in_transaction(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(tasks::reminder_sent.eq(true))
                .execute(connection)?;
            if affected == 0 {
                return Err(RepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl CategoryRepository for PostgresTaskStore {
    async fn store_category(&self, category: &Category) -> RepositoryResult<()> {
        let row = category_to_row(category);
        self.in_transaction(move |connection| {
            diesel::insert_into(categories::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn update_category(&self, category: &Category) -> RepositoryResult<()> {
        let category_id = category.id();
        let row = category_to_row(category);
        self.in_transaction(move |connection| {
            let affected = diesel::update(
                categories::table
                    .filter(categories::id.eq(row.id))
                    .filter(categories::user_id.eq(row.user_id)),
            )
            .set(&row)
            .execute(connection)?;
            if affected == 0 {
                return Err(RepositoryError::CategoryNotFound(category_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_category(
        &self,
        id: CategoryId,
        owner: UserId,
    ) -> RepositoryResult<Option<Category>> {
        self.in_transaction(move |connection| {
            let row = categories::table
                .filter(categories::id.eq(id.into_inner()))
                .filter(categories::user_id.eq(owner.into_inner()))
                .select(CategoryRow::as_select())
                .first::<CategoryRow>(connection)
                .optional()?;
            row.map(row_to_category).transpose()
        })
        .await
    }

    async fn list_categories(&self, owner: UserId) -> RepositoryResult<Vec<Category>> {
        self.in_transaction(move |connection| {
            let rows = categories::table
                .filter(categories::user_id.eq(owner.into_inner()))
                .order((categories::name.asc(), categories::id.asc()))
                .select(CategoryRow::as_select())
                .load::<CategoryRow>(connection)?;
            rows.into_iter().map(row_to_category).collect()
        })
        .await
    }

    async fn delete_category(&self, id: CategoryId, owner: UserId) -> RepositoryResult<bool> {
        self.in_transaction(move |connection| {
            let affected = diesel::delete(
                categories::table
                    .filter(categories::id.eq(id.into_inner()))
                    .filter(categories::user_id.eq(owner.into_inner())),
            )
            .execute(connection)?;
            if affected == 0 {
                return Ok(false);
            }
            diesel::update(
                tasks::table
                    .filter(tasks::category_id.eq(id.into_inner()))
                    .filter(tasks::user_id.eq(owner.into_inner())),
            )
            .set(tasks::category_id.eq(None::<uuid::Uuid>))
            .execute(connection)?;
            Ok(true)
        })
        .await
    }
}

#[async_trait]
impl SubtaskRepository for PostgresTaskStore {
    async fn store_subtask(&self, subtask: &Subtask) -> RepositoryResult<()> {
        let task_id = subtask.task_id();
        let row = subtask_to_row(subtask);
        self.in_transaction(move |connection| {
            diesel::insert_into(subtasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        RepositoryError::TaskNotFound(task_id)
                    }
                    other => RepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_subtask(&self, subtask: &Subtask) -> RepositoryResult<()> {
        let subtask_id = subtask.id();
        let row = subtask_to_row(subtask);
        self.in_transaction(move |connection| {
            let affected = diesel::update(
                subtasks::table
                    .filter(subtasks::id.eq(row.id))
                    .filter(subtasks::task_id.eq(row.task_id)),
            )
            .set(&row)
            .execute(connection)?;
            if affected == 0 {
                return Err(RepositoryError::SubtaskNotFound(subtask_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_subtask(
        &self,
        id: SubtaskId,
        task_id: TaskId,
    ) -> RepositoryResult<Option<Subtask>> {
        self.in_transaction(move |connection| {
            let row = subtasks::table
                .filter(subtasks::id.eq(id.into_inner()))
                .filter(subtasks::task_id.eq(task_id.into_inner()))
                .select(SubtaskRow::as_select())
                .first::<SubtaskRow>(connection)
                .optional()?;
            row.map(row_to_subtask).transpose()
        })
        .await
    }

    async fn list_subtasks(&self, task_id: TaskId) -> RepositoryResult<Vec<Subtask>> {
        self.in_transaction(move |connection| {
            let rows = subtasks::table
                .filter(subtasks::task_id.eq(task_id.into_inner()))
                .order((subtasks::created_at.asc(), subtasks::id.asc()))
                .select(SubtaskRow::as_select())
                .load::<SubtaskRow>(connection)?;
            rows.into_iter().map(row_to_subtask).collect()
        })
        .await
    }
}

#[async_trait]
impl UserRepository for PostgresTaskStore {
    async fn store_user(&self, user: &User) -> RepositoryResult<()> {
        let chat_id = user.chat_id();
        let row = user_to_row(user);
        self.in_transaction(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::DuplicateChatId(chat_id)
                    }
                    other => RepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.in_transaction(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            Ok(row.map(row_to_user))
        })
        .await
    }

    async fn find_user_by_chat_id(&self, chat_id: ChatId) -> RepositoryResult<Option<User>> {
        self.in_transaction(move |connection| {
            let row = users::table
                .filter(users::chat_id.eq(chat_id.value()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            Ok(row.map(row_to_user))
        })
        .await
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<bool> {
        self.in_transaction(move |connection| {
            let affected = diesel::delete(users::table.filter(users::id.eq(id.into_inner())))
                .execute(connection)?;
            Ok(affected > 0)
        })
        .await
    }
}
