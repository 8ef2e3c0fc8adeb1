//! Outbound ports used by the advisory engine.

pub mod language_model;

pub use language_model::{LanguageModel, LanguageModelError};
