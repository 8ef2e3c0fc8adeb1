//! Users keyed by their external chat identity.

use super::{ChatId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Display metadata reported by the chat service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Chat handle, if public.
    pub username: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Whether the chat account has a premium subscription.
    pub is_premium: bool,
}

/// Root of the ownership graph: owns tasks and categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    chat_id: ChatId,
    profile: UserProfile,
    created_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user.
    #[must_use]
    pub fn new(chat_id: ChatId, profile: UserProfile, clock: &impl Clock) -> Self {
        Self {
            id: UserId::new(),
            chat_id,
            profile,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: UserId,
        chat_id: ChatId,
        profile: UserProfile,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            chat_id,
            profile,
            created_at,
        }
    }

    /// Returns the internal identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the external chat identity.
    #[must_use]
    pub const fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// Returns the display metadata.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
