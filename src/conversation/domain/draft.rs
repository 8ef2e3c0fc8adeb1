//! The task creation draft and its step transitions.

use super::{DeadlineParseError, parse_deadline};
use crate::task::domain::{CategoryId, Priority, TaskDomainError, TaskTitle};
use crate::task::services::CreateTaskRequest;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Wizard steps, in the order they are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Waiting for the task title.
    Title,
    /// Waiting for an optional description.
    Description,
    /// Waiting for the priority tier.
    Priority,
    /// Waiting for an optional category.
    Category,
    /// Waiting for an optional deadline.
    Deadline,
}

/// One user answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardInput {
    /// Free text.
    Text(String),
    /// Skip an optional step.
    Skip,
    /// A priority picked from a menu.
    Priority(Priority),
    /// A category picked from a menu, or explicitly none.
    Category(Option<CategoryId>),
}

/// What happened after an accepted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardProgress {
    /// The draft moved on to another step.
    Next(WizardStep),
    /// Every step is answered; the request is ready to be stored.
    Complete(CreateTaskRequest),
}

/// An answer the current step cannot take. The step does not change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StepRejection {
    /// The title failed validation.
    #[error(transparent)]
    InvalidTitle(#[from] TaskDomainError),

    /// The deadline text was not understood.
    #[error(transparent)]
    InvalidDeadline(#[from] DeadlineParseError),

    /// The input kind does not fit the step.
    #[error("unexpected answer for the {0:?} step")]
    UnexpectedInput(WizardStep),
}

/// A task being assembled one answer at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    step: WizardStep,
    title: Option<TaskTitle>,
    description: Option<String>,
    priority: Priority,
    category: Option<CategoryId>,
    deadline: Option<DateTime<Utc>>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskDraft {
    /// Starts an empty draft at the title step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: WizardStep::Title,
            title: None,
            description: None,
            priority: Priority::Medium,
            category: None,
            deadline: None,
        }
    }

    /// Returns the step awaiting an answer.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Feeds one answer into the current step.
    ///
    /// # Errors
    ///
    /// Returns [`StepRejection`] when the answer does not fit; the draft is
    /// left unchanged.
    pub fn accept(&mut self, input: WizardInput) -> Result<WizardProgress, StepRejection> {
        match (self.step, input) {
            (WizardStep::Title, WizardInput::Text(text)) => {
                self.title = Some(TaskTitle::new(text)?);
                Ok(self.advance(WizardStep::Description))
            }
            (WizardStep::Description, WizardInput::Text(text)) => {
                let trimmed = text.trim();
                self.description = (!trimmed.is_empty()).then(|| trimmed.to_owned());
                Ok(self.advance(WizardStep::Priority))
            }
            (WizardStep::Description, WizardInput::Skip) => {
                self.description = None;
                Ok(self.advance(WizardStep::Priority))
            }
            (WizardStep::Priority, WizardInput::Priority(priority)) => {
                self.priority = priority;
                Ok(self.advance(WizardStep::Category))
            }
            (WizardStep::Priority, WizardInput::Text(text)) => {
                self.priority = Priority::parse_or_default(&text);
                Ok(self.advance(WizardStep::Category))
            }
            (WizardStep::Priority, WizardInput::Skip) => {
                self.priority = Priority::Medium;
                Ok(self.advance(WizardStep::Category))
            }
            (WizardStep::Category, WizardInput::Category(category)) => {
                self.category = category;
                Ok(self.advance(WizardStep::Deadline))
            }
            (WizardStep::Category, WizardInput::Skip) => {
                self.category = None;
                Ok(self.advance(WizardStep::Deadline))
            }
            (WizardStep::Deadline, WizardInput::Text(text)) => {
                self.deadline = Some(parse_deadline(&text)?);
                Ok(self.complete())
            }
            (WizardStep::Deadline, WizardInput::Skip) => {
                self.deadline = None;
                Ok(self.complete())
            }
            (step, _) => Err(StepRejection::UnexpectedInput(step)),
        }
    }

    const fn advance(&mut self, next: WizardStep) -> WizardProgress {
        self.step = next;
        WizardProgress::Next(next)
    }

    fn complete(&self) -> WizardProgress {
        let title = self
            .title
            .as_ref()
            .map_or_else(String::new, |title| title.as_str().to_owned());
        let mut request = CreateTaskRequest::new(title).with_priority(self.priority);
        if let Some(description) = &self.description {
            request = request.with_description(description.clone());
        }
        if let Some(category) = self.category {
            request = request.with_category(category);
        }
        if let Some(deadline) = self.deadline {
            request = request.with_deadline(deadline);
        }
        WizardProgress::Complete(request)
    }
}
