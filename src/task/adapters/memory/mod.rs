//! In-memory entity store for tests and single-process embedding.

mod store;

pub use store::InMemoryTaskStore;
