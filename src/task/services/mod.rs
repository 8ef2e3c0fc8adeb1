//! Application services for the entity store.

mod category;
mod error;
mod lifecycle;
mod users;

pub use category::CategoryService;
pub use error::{TaskServiceError, TaskServiceResult};
pub use lifecycle::{CreateTaskRequest, TaskService};
pub use users::UserService;
