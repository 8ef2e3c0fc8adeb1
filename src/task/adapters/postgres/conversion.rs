//! Conversions between domain aggregates and Diesel rows.

use super::models::{CategoryRow, SubtaskRow, TaskRow, UserRow};
use crate::task::{
    domain::{
        Category, CategoryColor, CategoryId, CategoryName, ChatId, PersistedTaskData, Priority,
        Subtask, SubtaskId, SubtaskTitle, Task, TaskId, TaskStatus, TaskTitle, User, UserId,
        UserProfile,
    },
    ports::{RepositoryError, RepositoryResult},
};

pub(super) fn task_to_row(task: &Task) -> RepositoryResult<TaskRow> {
    let estimated_minutes = task
        .estimated_minutes()
        .map(i32::try_from)
        .transpose()
        .map_err(RepositoryError::persistence)?;
    let actual_minutes =
        i32::try_from(task.actual_minutes()).map_err(RepositoryError::persistence)?;

    Ok(TaskRow {
        id: task.id().into_inner(),
        user_id: task.owner().into_inner(),
        category_id: task.category().map(CategoryId::into_inner),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        deadline: task.deadline(),
        estimated_minutes,
        actual_minutes,
        reminder_sent: task.reminder_sent(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    })
}

pub(super) fn row_to_task(row: TaskRow) -> RepositoryResult<Task> {
    let TaskRow {
        id,
        user_id,
        category_id,
        title,
        description,
        status,
        priority,
        deadline,
        estimated_minutes,
        actual_minutes,
        reminder_sent,
        created_at,
        updated_at,
        completed_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner: UserId::from_uuid(user_id),
        category: category_id.map(CategoryId::from_uuid),
        title: TaskTitle::new(title).map_err(RepositoryError::persistence)?,
        description,
        status: TaskStatus::try_from(status.as_str()).map_err(RepositoryError::persistence)?,
        priority: Priority::try_from(priority.as_str()).map_err(RepositoryError::persistence)?,
        deadline,
        estimated_minutes: estimated_minutes
            .map(u32::try_from)
            .transpose()
            .map_err(RepositoryError::persistence)?,
        actual_minutes: u32::try_from(actual_minutes).map_err(RepositoryError::persistence)?,
        reminder_sent,
        created_at,
        updated_at,
        completed_at,
    };
    Ok(Task::from_persisted(data))
}

pub(super) fn category_to_row(category: &Category) -> CategoryRow {
    CategoryRow {
        id: category.id().into_inner(),
        user_id: category.owner().into_inner(),
        name: category.name().as_str().to_owned(),
        color: category.color().as_str().to_owned(),
        created_at: category.created_at(),
    }
}

pub(super) fn row_to_category(row: CategoryRow) -> RepositoryResult<Category> {
    let name = CategoryName::new(&row.name).map_err(RepositoryError::persistence)?;
    // A hand-edited color falls back to the default instead of failing the load.
    let color = CategoryColor::new(&row.color).unwrap_or_default();
    Ok(Category::from_persisted(
        CategoryId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        name,
        color,
        row.created_at,
    ))
}

pub(super) fn subtask_to_row(subtask: &Subtask) -> SubtaskRow {
    SubtaskRow {
        id: subtask.id().into_inner(),
        task_id: subtask.task_id().into_inner(),
        title: subtask.title().as_str().to_owned(),
        is_completed: subtask.is_completed(),
        created_at: subtask.created_at(),
    }
}

pub(super) fn row_to_subtask(row: SubtaskRow) -> RepositoryResult<Subtask> {
    let title = SubtaskTitle::new(&row.title).map_err(RepositoryError::persistence)?;
    Ok(Subtask::from_persisted(
        SubtaskId::from_uuid(row.id),
        TaskId::from_uuid(row.task_id),
        title,
        row.is_completed,
        row.created_at,
    ))
}

pub(super) fn user_to_row(user: &User) -> UserRow {
    let profile = user.profile();
    UserRow {
        id: user.id().into_inner(),
        chat_id: user.chat_id().value(),
        username: profile.username.clone(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        is_premium: profile.is_premium,
        created_at: user.created_at(),
    }
}

pub(super) fn row_to_user(row: UserRow) -> User {
    let profile = UserProfile {
        username: row.username,
        first_name: row.first_name,
        last_name: row.last_name,
        is_premium: row.is_premium,
    };
    User::from_persisted(
        UserId::from_uuid(row.id),
        ChatId::new(row.chat_id),
        profile,
        row.created_at,
    )
}
