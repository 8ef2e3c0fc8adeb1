//! Text-completion port.

use async_trait::async_trait;
use thiserror::Error;

/// Completes a single-message prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends `prompt` and returns the trimmed reply text.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageModelError`] when the service fails or answers
    /// without usable text.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LanguageModelError>;
}

/// Failure of a language-model call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LanguageModelError {
    /// The service could not be reached or timed out.
    #[error("language model transport failed: {0}")]
    Transport(String),

    /// The service answered with an error status.
    #[error("language model returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Service-provided message.
        message: String,
    },

    /// The reply could not be decoded.
    #[error("language model reply could not be decoded: {0}")]
    Decode(String),

    /// The reply held no text.
    #[error("language model returned an empty reply")]
    EmptyReply,
}
