//! Port contracts for the entity store.
//!
//! Ports define infrastructure-agnostic interfaces used by task services and
//! by the scheduling and advisory components.

pub mod repository;

pub use repository::{
    CategoryRepository, RepositoryError, RepositoryResult, SubtaskRepository, TaskFilter,
    TaskRepository, UserRepository,
};
