//! Draft step transitions.

use crate::conversation::domain::{
    StepRejection, TaskDraft, WizardInput, WizardProgress, WizardStep,
};
use crate::task::domain::{Priority, TaskDomainError};
use rstest::rstest;

fn text(value: &str) -> WizardInput {
    WizardInput::Text(value.to_owned())
}

#[rstest]
fn steps_are_visited_in_order() {
    let mut draft = TaskDraft::new();
    assert_eq!(draft.step(), WizardStep::Title);

    assert_eq!(
        draft.accept(text("Book dentist")),
        Ok(WizardProgress::Next(WizardStep::Description))
    );
    assert_eq!(
        draft.accept(WizardInput::Skip),
        Ok(WizardProgress::Next(WizardStep::Priority))
    );
    assert_eq!(
        draft.accept(WizardInput::Priority(Priority::High)),
        Ok(WizardProgress::Next(WizardStep::Category))
    );
    assert_eq!(
        draft.accept(WizardInput::Category(None)),
        Ok(WizardProgress::Next(WizardStep::Deadline))
    );
    assert!(matches!(
        draft.accept(WizardInput::Skip),
        Ok(WizardProgress::Complete(_))
    ));
}

#[rstest]
fn invalid_title_keeps_the_step() {
    let mut draft = TaskDraft::new();

    let result = draft.accept(text("ab"));

    assert_eq!(
        result,
        Err(StepRejection::InvalidTitle(TaskDomainError::TitleTooShort {
            min: 3,
            actual: 2
        }))
    );
    assert_eq!(draft.step(), WizardStep::Title);
}

#[rstest]
fn title_cannot_be_skipped() {
    let mut draft = TaskDraft::new();

    assert_eq!(
        draft.accept(WizardInput::Skip),
        Err(StepRejection::UnexpectedInput(WizardStep::Title))
    );
}

#[rstest]
fn typed_priority_is_read_leniently() {
    let mut draft = TaskDraft::new();
    draft.accept(text("Typed priority")).expect("title");
    draft.accept(WizardInput::Skip).expect("description");

    draft.accept(text("someday")).expect("priority");
    draft.accept(WizardInput::Skip).expect("category");
    let Ok(WizardProgress::Complete(request)) = draft.accept(WizardInput::Skip) else {
        panic!("draft should complete");
    };

    let expected = crate::task::services::CreateTaskRequest::new("Typed priority")
        .with_priority(Priority::Medium);
    assert_eq!(request, expected);
}

#[rstest]
fn bad_deadline_keeps_the_step() {
    let mut draft = TaskDraft::new();
    draft.accept(text("Deadline test")).expect("title");
    draft.accept(WizardInput::Skip).expect("description");
    draft.accept(WizardInput::Skip).expect("priority");
    draft.accept(WizardInput::Skip).expect("category");

    let result = draft.accept(text("next week"));

    assert!(matches!(result, Err(StepRejection::InvalidDeadline(_))));
    assert_eq!(draft.step(), WizardStep::Deadline);
}
