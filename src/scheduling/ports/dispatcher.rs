//! Messaging port used to deliver reminders to users.

use crate::task::domain::ChatId;
use async_trait::async_trait;
use thiserror::Error;

/// Delivers text messages to a chat identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// Sends `text` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the message was not delivered.
    async fn send(&self, recipient: ChatId, text: &str) -> Result<(), DispatchError>;
}

/// Failure to deliver a message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The messaging service refused the message.
    #[error("message to {recipient} was rejected: {reason}")]
    Rejected {
        /// Intended recipient.
        recipient: ChatId,
        /// Service-provided reason.
        reason: String,
    },

    /// The messaging service could not be reached.
    #[error("messaging transport failed: {0}")]
    Transport(String),
}
