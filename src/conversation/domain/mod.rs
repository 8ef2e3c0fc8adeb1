//! Wizard state machine and input parsing.

mod deadline;
mod draft;

pub use deadline::{DeadlineParseError, parse_deadline};
pub use draft::{StepRejection, TaskDraft, WizardInput, WizardProgress, WizardStep};
