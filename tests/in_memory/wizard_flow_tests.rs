//! Conversational task creation feeding the list and advisory views.

use super::helpers::{Harness, harness};
use rstest::rstest;
use std::sync::Arc;
use taskwise::advisory::adapters::OpenAiChatModel;
use taskwise::advisory::domain::{AdvisoryMode, TaskSnapshot};
use taskwise::advisory::services::{AdvisoryEngine, NOT_CONFIGURED_MESSAGE};
use taskwise::conversation::domain::{StepRejection, WizardInput, WizardStep};
use taskwise::conversation::services::{TaskCreationWizard, WizardReply};
use taskwise::task::domain::Priority;
use taskwise::task::ports::TaskFilter;
use taskwise::task::services::CreateTaskRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wizard_task_shows_up_in_the_priority_list(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(600).await?;
    let category = harness.categories.create(owner, "Home", Some("#00aa00")).await?;
    let wizard = TaskCreationWizard::new(harness.tasks.clone());

    eyre::ensure!(wizard.start(owner).await == WizardStep::Title);
    wizard.submit(owner, WizardInput::Text("Fix the sink".to_owned())).await?;
    wizard.submit(owner, WizardInput::Skip).await?;
    wizard.submit(owner, WizardInput::Priority(Priority::High)).await?;
    wizard
        .submit(owner, WizardInput::Category(Some(category.id())))
        .await?;
    let rejected = wizard
        .submit(owner, WizardInput::Text("someday".to_owned()))
        .await?;
    eyre::ensure!(matches!(
        rejected,
        WizardReply::Rejected {
            step: WizardStep::Deadline,
            reason: StepRejection::InvalidDeadline(_),
        }
    ));
    let reply = wizard
        .submit(owner, WizardInput::Text("05.05.2026 18:00".to_owned()))
        .await?;

    let WizardReply::Created(task) = reply else {
        eyre::bail!("expected a created task, got {reply:?}");
    };
    eyre::ensure!(wizard.current_step(owner).await.is_none());
    eyre::ensure!(task.description().is_none());
    eyre::ensure!(task.category() == Some(category.id()));

    let listed = harness
        .tasks
        .list_by_priority(owner, TaskFilter::all())
        .await?;
    eyre::ensure!(listed.iter().map(|t| t.id()).eq([task.id()]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn advice_without_a_model_explains_how_to_enable_it(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(601).await?;
    harness
        .tasks
        .create(owner, CreateTaskRequest::new("Plan holiday"))
        .await?;
    let snapshots: Vec<TaskSnapshot> = harness
        .tasks
        .list(owner, TaskFilter::all())
        .await?
        .iter()
        .map(TaskSnapshot::from)
        .collect();
    let engine: AdvisoryEngine<OpenAiChatModel, _> =
        AdvisoryEngine::new(None, Arc::clone(&harness.clock), 8);

    for mode in AdvisoryMode::ALL {
        eyre::ensure!(engine.advise(mode, &snapshots).await == NOT_CONFIGURED_MESSAGE);
    }
    eyre::ensure!(engine.break_down("Plan holiday", "").await == NOT_CONFIGURED_MESSAGE);
    Ok(())
}
