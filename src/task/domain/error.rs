//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title is shorter than the minimum length.
    #[error("task title is too short ({actual} characters, minimum {min})")]
    TitleTooShort {
        /// Minimum accepted length in characters.
        min: usize,
        /// Length of the rejected title.
        actual: usize,
    },

    /// The task title is longer than the maximum length.
    #[error("task title is too long ({actual} characters, maximum {max})")]
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected title.
        actual: usize,
    },

    /// The category name length is outside the accepted range.
    #[error("category name must be between {min} and {max} characters, got {actual}")]
    InvalidCategoryName {
        /// Minimum accepted length in characters.
        min: usize,
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected name.
        actual: usize,
    },

    /// The category color is not a `#RRGGBB` hex string.
    #[error("invalid category color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    /// The subtask title is empty or longer than the maximum length.
    #[error("subtask title must be between 1 and {max} characters, got {actual}")]
    InvalidSubtaskTitle {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected title.
        actual: usize,
    },

    /// A duration value cannot be represented.
    #[error("duration of {0} minutes exceeds the supported range")]
    DurationOverflow(u64),
}

/// Error returned while parsing persisted enumeration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseTaskFieldError {
    /// Unknown task status text.
    #[error("unknown task status: {0}")]
    Status(String),

    /// Unknown priority tier text.
    #[error("unknown priority tier: {0}")]
    Priority(String),
}
