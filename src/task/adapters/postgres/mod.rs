//! `PostgreSQL` adapters for the entity store.

mod conversion;
mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskStore, TaskPgPool};
