//! Deadline monitor selection, idempotence and failure isolation.

use std::sync::Arc;
use std::time::Duration;

use crate::scheduling::{
    adapters::InMemoryDispatcher,
    ports::{DispatchError, MessageDispatcher, dispatcher::MockMessageDispatcher},
    services::{DeadlineMonitor, DeadlineMonitorConfig, MonitorError, SweepReport},
};
use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{
        ChatId, NewTask, Task, TaskId, TaskPatch, TaskStatus, TaskTitle, User, UserId, UserProfile,
    },
    ports::{TaskRepository, UserRepository},
};
use crate::test_support::{FixedClock, reference_now};
use chrono::TimeDelta;
use mockall::predicate::{always, eq};
use rstest::{fixture, rstest};

struct World {
    store: Arc<InMemoryTaskStore>,
    clock: Arc<FixedClock>,
}

#[fixture]
fn world() -> World {
    World {
        store: Arc::new(InMemoryTaskStore::new()),
        clock: Arc::new(FixedClock::at(reference_now())),
    }
}

impl World {
    async fn user(&self, chat: i64) -> UserId {
        let user = User::new(ChatId::new(chat), UserProfile::default(), &*self.clock);
        self.store.store_user(&user).await.expect("store user");
        user.id()
    }

    async fn task(
        &self,
        owner: UserId,
        title: &str,
        due: TimeDelta,
        status: TaskStatus,
    ) -> TaskId {
        let mut input = NewTask::new(owner, TaskTitle::new(title).expect("title"));
        input.deadline = Some(reference_now() + due);
        let mut task = Task::new(input, &*self.clock);
        task.change_status(status, &*self.clock);
        self.store.store(&task).await.expect("store task");
        task.id()
    }

    async fn reminded(&self, owner: UserId, id: TaskId) -> bool {
        self.store
            .find_for_owner(id, owner)
            .await
            .expect("lookup")
            .expect("task present")
            .reminder_sent()
    }

    fn monitor<D: MessageDispatcher>(
        &self,
        dispatcher: D,
    ) -> DeadlineMonitor<InMemoryTaskStore, D, FixedClock> {
        DeadlineMonitor::new(
            Arc::clone(&self.store),
            Arc::new(dispatcher),
            Arc::clone(&self.clock),
            DeadlineMonitorConfig::default(),
        )
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_pending_unreminded_tasks_inside_the_window_are_selected(world: World) {
    let owner = world.user(10).await;
    let inside = world
        .task(owner, "Inside", TimeDelta::hours(23), TaskStatus::Pending)
        .await;
    let outside = world
        .task(owner, "Outside", TimeDelta::hours(25), TaskStatus::Pending)
        .await;
    let started = world
        .task(owner, "Started", TimeDelta::hours(1), TaskStatus::InProgress)
        .await;
    let dispatcher = InMemoryDispatcher::new();
    let monitor = world.monitor(dispatcher.clone());

    let report = monitor.sweep().await.expect("sweep");

    assert_eq!(
        report,
        SweepReport {
            selected: 1,
            notified: 1,
            failed: 0,
        }
    );
    assert!(world.reminded(owner, inside).await);
    assert!(!world.reminded(owner, outside).await);
    assert!(!world.reminded(owner, started).await);
    let sent = dispatcher.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent.iter().all(|message| message.recipient == ChatId::new(10)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_sweep_does_not_repeat_reminders(world: World) {
    let owner = world.user(11).await;
    world
        .task(owner, "Once only", TimeDelta::hours(3), TaskStatus::Pending)
        .await;
    let dispatcher = InMemoryDispatcher::new();
    let monitor = world.monitor(dispatcher.clone());

    monitor.sweep().await.expect("first sweep");
    world.clock.advance(TimeDelta::hours(1));
    let second = monitor.sweep().await.expect("second sweep");

    assert_eq!(second.selected, 0);
    assert_eq!(dispatcher.sent().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_read_before_a_sweep_does_not_rearm_the_reminder(world: World) {
    let owner = world.user(13).await;
    let id = world
        .task(owner, "Edited mid-sweep", TimeDelta::hours(4), TaskStatus::Pending)
        .await;
    let dispatcher = InMemoryDispatcher::new();
    let monitor = world.monitor(dispatcher.clone());
    let mut stale = world
        .store
        .find_for_owner(id, owner)
        .await
        .expect("lookup")
        .expect("task present");

    monitor.sweep().await.expect("first sweep");
    stale.apply(
        TaskPatch::new().with_title(TaskTitle::new("Renamed meanwhile").expect("title")),
        &*world.clock,
    );
    world.store.update(&stale).await.expect("stale update");
    let second = monitor.sweep().await.expect("second sweep");

    assert!(world.reminded(owner, id).await);
    assert_eq!(second.selected, 0);
    assert_eq!(dispatcher.sent().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_tasks_are_still_reminded_once(world: World) {
    let owner = world.user(12).await;
    let late = world
        .task(owner, "Already late", TimeDelta::hours(-6), TaskStatus::Pending)
        .await;
    let dispatcher = InMemoryDispatcher::new();

    let report = world
        .monitor(dispatcher.clone())
        .sweep()
        .await
        .expect("sweep");

    assert_eq!(report.notified, 1);
    assert!(world.reminded(owner, late).await);
    assert!(
        dispatcher
            .sent()
            .first()
            .is_some_and(|message| message.text.contains("overdue by 6 hour(s)!"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_delivery_is_isolated_and_retried(world: World) {
    let blocked = world.user(20).await;
    let reachable = world.user(21).await;
    let blocked_task = world
        .task(blocked, "Blocked", TimeDelta::hours(1), TaskStatus::Pending)
        .await;
    let reachable_task = world
        .task(reachable, "Reachable", TimeDelta::hours(2), TaskStatus::Pending)
        .await;

    let mut dispatcher = MockMessageDispatcher::new();
    dispatcher
        .expect_send()
        .with(eq(ChatId::new(20)), always())
        .times(1)
        .returning(|recipient, _| {
            Err(DispatchError::Rejected {
                recipient,
                reason: "bot blocked".to_owned(),
            })
        });
    dispatcher
        .expect_send()
        .with(eq(ChatId::new(21)), always())
        .times(1)
        .returning(|_, _| Ok(()));

    let report = world.monitor(dispatcher).sweep().await.expect("sweep");

    assert_eq!(
        report,
        SweepReport {
            selected: 2,
            notified: 1,
            failed: 1,
        }
    );
    assert!(!world.reminded(blocked, blocked_task).await);
    assert!(world.reminded(reachable, reachable_task).await);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_of_deleted_owners_are_counted_as_failures(world: World) {
    let owner = world.user(30).await;
    world
        .task(owner, "Orphaned", TimeDelta::hours(1), TaskStatus::Pending)
        .await;
    let ghost = UserId::new();
    world
        .task(ghost, "Ghost task", TimeDelta::hours(2), TaskStatus::Pending)
        .await;
    let dispatcher = InMemoryDispatcher::new();

    let report = world
        .monitor(dispatcher.clone())
        .sweep()
        .await
        .expect("sweep");

    assert_eq!(report.selected, 2);
    assert_eq!(report.notified, 1);
    assert_eq!(report.failed, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oversized_lookahead_fails_the_sweep_without_sending(world: World) {
    let owner = world.user(14).await;
    world
        .task(owner, "Far away", TimeDelta::hours(1), TaskStatus::Pending)
        .await;
    let dispatcher = InMemoryDispatcher::new();
    let monitor = DeadlineMonitor::new(
        Arc::clone(&world.store),
        Arc::new(dispatcher.clone()),
        Arc::clone(&world.clock),
        DeadlineMonitorConfig {
            lookahead: TimeDelta::MAX,
            ..DeadlineMonitorConfig::default()
        },
    );

    let result = monitor.sweep().await;

    assert!(matches!(
        result,
        Err(MonitorError::LookaheadOutOfRange(lookahead)) if lookahead == TimeDelta::MAX
    ));
    assert!(dispatcher.sent().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn run_sweeps_immediately_and_stops_on_shutdown(world: World) {
    let owner = world.user(40).await;
    world
        .task(owner, "Tick", TimeDelta::hours(1), TaskStatus::Pending)
        .await;
    let dispatcher = InMemoryDispatcher::new();
    let monitor = world.monitor(dispatcher.clone());

    monitor
        .run(tokio::time::sleep(Duration::from_millis(50)))
        .await;

    assert_eq!(dispatcher.sent().len(), 1);
}
