//! Diesel row models for the entity store.

use super::schema::{categories, subtasks, tasks, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape for user records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// External chat identity.
    pub chat_id: i64,
    /// Chat handle.
    pub username: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Premium chat account flag.
    pub is_premium: bool,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row shape for category records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// `#RRGGBB` color.
    pub color: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row shape for task records, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Optional category.
    pub category_id: Option<uuid::Uuid>,
    /// Title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Priority tier.
    pub priority: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Estimated duration in minutes.
    pub estimated_minutes: Option<i32>,
    /// Accumulated actual duration in minutes.
    pub actual_minutes: i32,
    /// Deadline reminder delivered flag.
    pub reminder_sent: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// First completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Columns an edit may overwrite.
///
/// Ownership, creation time and the reminder flag are left out; `None`
/// writes `NULL` so cleared fields are persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Optional category.
    pub category_id: Option<uuid::Uuid>,
    /// Title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Priority tier.
    pub priority: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Estimated duration in minutes.
    pub estimated_minutes: Option<i32>,
    /// Accumulated actual duration in minutes.
    pub actual_minutes: i32,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// First completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<TaskRow> for TaskChangeset {
    fn from(row: TaskRow) -> Self {
        Self {
            category_id: row.category_id,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            deadline: row.deadline,
            estimated_minutes: row.estimated_minutes,
            actual_minutes: row.actual_minutes,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        }
    }
}

/// Row shape for subtask records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = subtasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubtaskRow {
    /// Subtask identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Checked-off flag.
    pub is_completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
