//! Task services end to end over the in-memory store.

use super::helpers::{Harness, harness, start_time};
use chrono::TimeDelta;
use rstest::rstest;
use taskwise::task::domain::{Priority, TaskStatus};
use taskwise::task::ports::TaskFilter;
use taskwise::task::services::{CreateTaskRequest, TaskServiceError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn urgent_tasks_due_sooner_are_listed_first(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(100).await?;
    let sooner = harness
        .tasks
        .create(
            owner,
            CreateTaskRequest::new("Urgent, due in an hour")
                .with_priority(Priority::Urgent)
                .with_deadline(start_time() + TimeDelta::hours(1)),
        )
        .await?;
    harness.clock.advance(TimeDelta::minutes(1));
    let later = harness
        .tasks
        .create(
            owner,
            CreateTaskRequest::new("Urgent, due tonight")
                .with_priority(Priority::Urgent)
                .with_deadline(start_time() + TimeDelta::hours(10)),
        )
        .await?;
    let relaxed = harness
        .tasks
        .create(owner, CreateTaskRequest::new("Someday").with_priority(Priority::Low))
        .await?;

    let ordered = harness
        .tasks
        .list_by_priority(owner, TaskFilter::all())
        .await?;

    // Both urgent tasks score equally; the earlier deadline wins over recency.
    let ids: Vec<_> = ordered.iter().map(|task| task.id()).collect();
    eyre::ensure!(
        ids == [sooner.id(), later.id(), relaxed.id()],
        "unexpected order: {ids:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_progress_work_edges_ahead_within_a_tier(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(101).await?;
    let started = harness
        .tasks
        .create(owner, CreateTaskRequest::new("Started first").with_priority(Priority::High))
        .await?;
    harness.clock.advance(TimeDelta::minutes(1));
    let fresh = harness
        .tasks
        .create(owner, CreateTaskRequest::new("Fresh").with_priority(Priority::High))
        .await?;
    harness.tasks.start(owner, started.id()).await?;

    let ordered = harness
        .tasks
        .list_by_priority(owner, TaskFilter::all())
        .await?;

    let ids: Vec<_> = ordered.iter().map(|task| task.id()).collect();
    eyre::ensure!(ids == [started.id(), fresh.id()], "unexpected order");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_never_see_each_others_data(harness: Harness) -> eyre::Result<()> {
    let alice = harness.register(200).await?;
    let bob = harness.register(201).await?;
    let category = harness.categories.create(alice, "Private", None).await?;
    let task = harness
        .tasks
        .create(alice, CreateTaskRequest::new("Secret plan").with_category(category.id()))
        .await?;

    eyre::ensure!(harness.tasks.list(bob, TaskFilter::all()).await?.is_empty());
    eyre::ensure!(harness.categories.list(bob).await?.is_empty());
    eyre::ensure!(matches!(
        harness.categories.get(bob, category.id()).await,
        Err(TaskServiceError::CategoryNotFound(_))
    ));
    eyre::ensure!(matches!(
        harness.tasks.add_subtask(bob, task.id(), "Sabotage").await,
        Err(TaskServiceError::TaskNotFound(_))
    ));
    eyre::ensure!(matches!(
        harness.tasks.record_time(bob, task.id(), 10).await,
        Err(TaskServiceError::TaskNotFound(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_reflect_lifecycle_changes(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(300).await?;
    let overdue = harness
        .tasks
        .create(
            owner,
            CreateTaskRequest::new("Past due").with_deadline(start_time() - TimeDelta::hours(2)),
        )
        .await?;
    let done = harness.tasks.create(owner, CreateTaskRequest::new("Done deal")).await?;
    let dropped = harness.tasks.create(owner, CreateTaskRequest::new("Dropped")).await?;
    harness.tasks.complete(owner, done.id()).await?;
    harness.tasks.cancel(owner, dropped.id()).await?;

    let stats = harness.tasks.statistics(owner).await?;

    eyre::ensure!(stats.total == 3);
    eyre::ensure!(stats.completed == 1);
    eyre::ensure!(stats.pending == 1);
    eyre::ensure!(stats.overdue == 1);
    eyre::ensure!(format!("{:.1}", stats.completion_rate) == "33.3");

    let completed = harness
        .tasks
        .list(owner, TaskFilter::all().with_status(TaskStatus::Completed))
        .await?;
    eyre::ensure!(completed.len() == 1);
    eyre::ensure!(overdue.is_overdue(start_time()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worked_time_accumulates(harness: Harness) -> eyre::Result<()> {
    let owner = harness.register(400).await?;
    let task = harness
        .tasks
        .create(owner, CreateTaskRequest::new("Timed").with_estimated_minutes(60))
        .await?;

    harness.tasks.record_time(owner, task.id(), 25).await?;
    let updated = harness.tasks.record_time(owner, task.id(), 20).await?;

    eyre::ensure!(updated.actual_minutes() == 45);
    eyre::ensure!(updated.estimated_minutes() == Some(60));
    Ok(())
}
