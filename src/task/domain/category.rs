//! User-defined task categories.

use super::{CategoryColor, CategoryId, CategoryName, CategoryPatch, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A named, colored grouping of tasks owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    owner: UserId,
    name: CategoryName,
    color: CategoryColor,
    created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a category.
    #[must_use]
    pub fn new(
        owner: UserId,
        name: CategoryName,
        color: CategoryColor,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            owner,
            name,
            color,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a category from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: CategoryId,
        owner: UserId,
        name: CategoryName,
        color: CategoryColor,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            color,
            created_at,
        }
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the name.
    #[must_use]
    pub const fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Returns the display color.
    #[must_use]
    pub const fn color(&self) -> &CategoryColor {
        &self.color
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies a partial update.
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}
