//! Domain model for task tracking.
//!
//! Users own tasks and categories; tasks own subtasks. All values here are
//! validated on construction and free of infrastructure concerns.

mod category;
mod error;
mod ids;
mod patch;
mod subtask;
mod task;
mod text;
mod user;

pub use category::Category;
pub use error::{ParseTaskFieldError, TaskDomainError};
pub use ids::{CategoryId, ChatId, SubtaskId, TaskId, UserId};
pub use patch::{CategoryPatch, FieldUpdate, TaskPatch};
pub use subtask::Subtask;
pub use task::{NewTask, PersistedTaskData, Priority, Task, TaskStatus};
pub use text::{CategoryColor, CategoryName, SubtaskTitle, TaskTitle};
pub use user::{User, UserProfile};
