//! Per-user task creation sessions.

use crate::conversation::domain::{
    StepRejection, TaskDraft, WizardInput, WizardProgress, WizardStep,
};
use crate::task::{
    domain::{Task, UserId},
    ports::{CategoryRepository, SubtaskRepository, TaskRepository},
    services::{TaskService, TaskServiceError},
};
use mockable::Clock;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;

/// Result of feeding one answer to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardReply {
    /// The answer was taken; ask for this step next.
    Next(WizardStep),
    /// The answer was refused; ask for the same step again.
    Rejected {
        /// The step still awaiting an answer.
        step: WizardStep,
        /// Why the answer was refused.
        reason: StepRejection,
    },
    /// The task was stored and the session closed.
    Created(Task),
}

/// Session-level failures.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The user has no session in progress.
    #[error("no task creation in progress for user {0}")]
    NoSession(UserId),

    /// Storing the finished task failed; the session was closed.
    #[error(transparent)]
    Service(#[from] TaskServiceError),
}

/// Runs one [`TaskDraft`] per user and stores the task when it completes.
pub struct TaskCreationWizard<R, C>
where
    R: TaskRepository + CategoryRepository + SubtaskRepository,
    C: Clock + Send + Sync,
{
    tasks: TaskService<R, C>,
    sessions: Mutex<HashMap<UserId, TaskDraft>>,
}

impl<R, C> TaskCreationWizard<R, C>
where
    R: TaskRepository + CategoryRepository + SubtaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a wizard storing tasks through `tasks`.
    #[must_use]
    pub fn new(tasks: TaskService<R, C>) -> Self {
        Self {
            tasks,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Opens a fresh session, discarding any draft in progress.
    pub async fn start(&self, owner: UserId) -> WizardStep {
        let draft = TaskDraft::new();
        let step = draft.step();
        self.sessions.lock().await.insert(owner, draft);
        step
    }

    /// Returns the step awaiting an answer, if a session is open.
    pub async fn current_step(&self, owner: UserId) -> Option<WizardStep> {
        self.sessions.lock().await.get(&owner).map(TaskDraft::step)
    }

    /// Feeds one answer into the owner's session.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NoSession`] without an open session, or
    /// [`WizardError::Service`] when the finished task cannot be stored.
    pub async fn submit(
        &self,
        owner: UserId,
        input: WizardInput,
    ) -> Result<WizardReply, WizardError> {
        let request = {
            let mut sessions = self.sessions.lock().await;
            let draft = sessions
                .get_mut(&owner)
                .ok_or(WizardError::NoSession(owner))?;
            match draft.accept(input) {
                Ok(WizardProgress::Next(step)) => return Ok(WizardReply::Next(step)),
                Err(reason) => {
                    return Ok(WizardReply::Rejected {
                        step: draft.step(),
                        reason,
                    });
                }
                Ok(WizardProgress::Complete(request)) => {
                    sessions.remove(&owner);
                    request
                }
            }
        };

        let task = self.tasks.create(owner, request).await?;
        tracing::info!(user_id = %owner, task_id = %task.id(), "task created through wizard");
        Ok(WizardReply::Created(task))
    }

    /// Discards the owner's draft. Returns `false` when none was open.
    pub async fn cancel(&self, owner: UserId) -> bool {
        self.sessions.lock().await.remove(&owner).is_some()
    }
}
