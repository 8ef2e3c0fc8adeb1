//! Deadline reminders delivered through the recording dispatcher.

use super::helpers::{Harness, harness, start_time};
use chrono::TimeDelta;
use rstest::rstest;
use taskwise::task::domain::{ChatId, FieldUpdate, TaskPatch};
use taskwise::task::services::CreateTaskRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blocked_chat_is_retried_on_the_next_sweep(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(500).await?;
    let task = harness
        .tasks
        .create(
            owner,
            CreateTaskRequest::new("Submit report")
                .with_deadline(start_time() + TimeDelta::hours(3)),
        )
        .await?;
    let monitor = harness.monitor();

    harness.dispatcher.reject(ChatId::new(500));
    let first = monitor.sweep().await?;
    eyre::ensure!(first.selected == 1 && first.failed == 1, "{first:?}");
    eyre::ensure!(!harness.tasks.get(owner, task.id()).await?.reminder_sent());

    harness.dispatcher.accept(ChatId::new(500));
    let second = monitor.sweep().await?;
    eyre::ensure!(second.notified == 1, "{second:?}");
    eyre::ensure!(harness.tasks.get(owner, task.id()).await?.reminder_sent());

    let sent = harness.dispatcher.sent();
    eyre::ensure!(sent.len() == 1);
    eyre::ensure!(sent.iter().all(|message| message.text.contains("Submit report")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_task_is_reminded_once(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(501).await?;
    harness
        .tasks
        .create(
            owner,
            CreateTaskRequest::new("Call the bank")
                .with_deadline(start_time() + TimeDelta::hours(5)),
        )
        .await?;
    let monitor = harness.monitor();

    monitor.sweep().await?;
    harness.clock.advance(TimeDelta::hours(1));
    let repeat = monitor.sweep().await?;

    eyre::ensure!(repeat.selected == 0, "{repeat:?}");
    eyre::ensure!(harness.dispatcher.sent().len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_the_deadline_keeps_the_reminder_flag(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(502).await?;
    let task = harness
        .tasks
        .create(
            owner,
            CreateTaskRequest::new("Renew passport")
                .with_deadline(start_time() + TimeDelta::hours(6)),
        )
        .await?;
    let monitor = harness.monitor();
    monitor.sweep().await?;

    harness
        .tasks
        .update(
            owner,
            task.id(),
            TaskPatch::new().with_deadline(FieldUpdate::Set(start_time() + TimeDelta::hours(12))),
        )
        .await?;
    let after_edit = monitor.sweep().await?;

    eyre::ensure!(after_edit.selected == 0, "{after_edit:?}");
    eyre::ensure!(harness.tasks.get(owner, task.id()).await?.reminder_sent());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn distant_and_closed_tasks_stay_quiet(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(503).await?;
    harness
        .tasks
        .create(
            owner,
            CreateTaskRequest::new("Next week").with_deadline(start_time() + TimeDelta::days(7)),
        )
        .await?;
    let done = harness
        .tasks
        .create(
            owner,
            CreateTaskRequest::new("Already done")
                .with_deadline(start_time() + TimeDelta::hours(2)),
        )
        .await?;
    harness.tasks.complete(owner, done.id()).await?;

    let report = harness.monitor().sweep().await?;

    eyre::ensure!(report.selected == 0, "{report:?}");
    eyre::ensure!(harness.dispatcher.sent().is_empty());
    Ok(())
}
