//! Recording dispatcher for tests and local runs.

use crate::scheduling::ports::{DispatchError, MessageDispatcher};
use crate::task::domain::ChatId;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// A message accepted by [`InMemoryDispatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Recipient chat identity.
    pub recipient: ChatId,
    /// Message text.
    pub text: String,
}

/// Dispatcher that records messages instead of sending them.
///
/// Recipients registered with [`InMemoryDispatcher::reject`] fail with
/// [`DispatchError::Rejected`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDispatcher {
    state: Arc<RwLock<DispatcherState>>,
}

#[derive(Debug, Default)]
struct DispatcherState {
    sent: Vec<SentMessage>,
    rejected: HashSet<ChatId>,
}

impl InMemoryDispatcher {
    /// Creates a dispatcher that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes future sends to `recipient` fail.
    pub fn reject(&self, recipient: ChatId) {
        if let Ok(mut state) = self.state.write() {
            state.rejected.insert(recipient);
        }
    }

    /// Lets sends to `recipient` succeed again.
    pub fn accept(&self, recipient: ChatId) {
        if let Ok(mut state) = self.state.write() {
            state.rejected.remove(&recipient);
        }
    }

    /// Returns every accepted message in send order.
    #[must_use]
    pub fn sent(&self) -> Vec<SentMessage> {
        self.state
            .read()
            .map(|state| state.sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessageDispatcher for InMemoryDispatcher {
    async fn send(&self, recipient: ChatId, text: &str) -> Result<(), DispatchError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DispatchError::Transport(err.to_string()))?;
        if state.rejected.contains(&recipient) {
            return Err(DispatchError::Rejected {
                recipient,
                reason: "recipient blocked".to_owned(),
            });
        }
        state.sent.push(SentMessage {
            recipient,
            text: text.to_owned(),
        });
        Ok(())
    }
}
