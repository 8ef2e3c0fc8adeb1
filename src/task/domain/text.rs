//! Validated text values: task titles, category names and colors, subtask
//! titles.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task title, trimmed and between 3 and 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Minimum title length in characters.
    pub const MIN_LEN: usize = 3;
    /// Maximum title length in characters.
    pub const MAX_LEN: usize = 255;

    /// Creates a validated title from user input.
    ///
    /// Surrounding whitespace is trimmed before the length checks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`],
    /// [`TaskDomainError::TitleTooShort`] or [`TaskDomainError::TitleTooLong`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        let actual = trimmed.chars().count();
        if actual == 0 {
            return Err(TaskDomainError::EmptyTitle);
        }
        if actual < Self::MIN_LEN {
            return Err(TaskDomainError::TitleTooShort {
                min: Self::MIN_LEN,
                actual,
            });
        }
        if actual > Self::MAX_LEN {
            return Err(TaskDomainError::TitleTooLong {
                max: Self::MAX_LEN,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category name, trimmed and between 2 and 100 characters.
///
/// Names are unique per user in practice only; storage does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Minimum name length in characters.
    pub const MIN_LEN: usize = 2;
    /// Maximum name length in characters.
    pub const MAX_LEN: usize = 100;

    /// Creates a validated category name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCategoryName`] when the trimmed name
    /// is outside the accepted length range.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        let actual = trimmed.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&actual) {
            return Err(TaskDomainError::InvalidCategoryName {
                min: Self::MIN_LEN,
                max: Self::MAX_LEN,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category display color as a 7-character `#RRGGBB` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryColor(String);

impl CategoryColor {
    /// Color assigned when the user does not pick one.
    pub const DEFAULT: &'static str = "#3498db";

    /// Creates a validated color, normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidColor`] unless the value is `#`
    /// followed by exactly six hex digits.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let raw = value.as_ref().trim();
        let is_valid = raw
            .strip_prefix('#')
            .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()));
        if !is_valid {
            return Err(TaskDomainError::InvalidColor(raw.to_owned()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Returns the hex color text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CategoryColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subtask title, trimmed, non-empty and at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtaskTitle(String);

impl SubtaskTitle {
    /// Maximum title length in characters.
    pub const MAX_LEN: usize = 255;

    /// Creates a validated subtask title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidSubtaskTitle`] when the trimmed
    /// title is empty or too long.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        let actual = trimmed.chars().count();
        if actual == 0 || actual > Self::MAX_LEN {
            return Err(TaskDomainError::InvalidSubtaskTitle {
                max: Self::MAX_LEN,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubtaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
