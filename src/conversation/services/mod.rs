//! Conversation orchestration.

mod wizard;

pub use wizard::{TaskCreationWizard, WizardError, WizardReply};
