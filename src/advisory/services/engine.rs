//! Advisory engine: prompt, call, degrade gracefully.

use crate::advisory::domain::{
    AdvisoryMode, PromptContext, TaskSnapshot, breakdown_prompt, estimate_prompt, parse_minutes,
    render_prompt,
};
use crate::advisory::ports::LanguageModel;
use mockable::Clock;
use std::sync::Arc;
use tracing::warn;

/// Reply when no language model is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "The AI assistant is not configured. Set OPENAI_API_KEY to enable it.";

/// Reply when the language model call fails.
pub const FAILURE_MESSAGE: &str =
    "The AI assistant is unavailable right now. Please try again later.";

/// Estimate returned when the model gives no usable number.
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 30;

const BREAKDOWN_MAX_TOKENS: u32 = 400;
const ESTIMATE_MAX_TOKENS: u32 = 10;

/// Produces advisory text from task snapshots.
///
/// Every operation returns text; failures never propagate to the caller.
pub struct AdvisoryEngine<M, C>
where
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    model: Option<Arc<M>>,
    clock: Arc<C>,
    work_hours: u32,
}

impl<M, C> AdvisoryEngine<M, C>
where
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    /// Creates an engine; `model` is `None` when no credential is configured.
    #[must_use]
    pub const fn new(model: Option<Arc<M>>, clock: Arc<C>, work_hours: u32) -> Self {
        Self {
            model,
            clock,
            work_hours,
        }
    }

    /// Returns `true` when a language model is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Produces advice for `mode` over `tasks`.
    pub async fn advise(&self, mode: AdvisoryMode, tasks: &[TaskSnapshot]) -> String {
        let Some(model) = &self.model else {
            return NOT_CONFIGURED_MESSAGE.to_owned();
        };
        let context = PromptContext {
            now: self.clock.utc(),
            work_hours: self.work_hours,
        };
        let prompt = match render_prompt(mode, tasks, &context) {
            Ok(prompt) => prompt,
            Err(err) => {
                warn!(mode = %mode, error = %err, "advisory prompt failed to render");
                return FAILURE_MESSAGE.to_owned();
            }
        };
        Self::ask(model, &prompt, mode.max_tokens(), mode.as_str()).await
    }

    /// Suggests subtasks for a task.
    pub async fn break_down(&self, title: &str, description: &str) -> String {
        let Some(model) = &self.model else {
            return NOT_CONFIGURED_MESSAGE.to_owned();
        };
        match breakdown_prompt(title, description) {
            Ok(prompt) => Self::ask(model, &prompt, BREAKDOWN_MAX_TOKENS, "breakdown").await,
            Err(err) => {
                warn!(error = %err, "breakdown prompt failed to render");
                FAILURE_MESSAGE.to_owned()
            }
        }
    }

    /// Estimates a task's duration in minutes.
    ///
    /// Falls back to [`DEFAULT_ESTIMATE_MINUTES`] when no model is
    /// configured, the call fails, or the reply holds no integer.
    pub async fn estimate_minutes(&self, title: &str, description: &str) -> u32 {
        let Some(model) = &self.model else {
            return DEFAULT_ESTIMATE_MINUTES;
        };
        let prompt = match estimate_prompt(title, description) {
            Ok(prompt) => prompt,
            Err(err) => {
                warn!(error = %err, "estimate prompt failed to render");
                return DEFAULT_ESTIMATE_MINUTES;
            }
        };
        match model.complete(&prompt, ESTIMATE_MAX_TOKENS).await {
            Ok(reply) => parse_minutes(&reply).unwrap_or(DEFAULT_ESTIMATE_MINUTES),
            Err(err) => {
                warn!(operation = "estimate", error = %err, "language model call failed");
                DEFAULT_ESTIMATE_MINUTES
            }
        }
    }

    async fn ask(model: &M, prompt: &str, max_tokens: u32, operation: &str) -> String {
        match model.complete(prompt, max_tokens).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(operation, error = %err, "language model call failed");
                FAILURE_MESSAGE.to_owned()
            }
        }
    }
}
