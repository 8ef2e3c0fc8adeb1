//! Periodic sweep that reminds users about imminent deadlines.
//!
//! A task is due soon when it is pending, has a deadline no later than
//! `now + lookahead`, and has not been reminded yet. Each due task is handled
//! on its own: a failed delivery is logged and leaves the task eligible for
//! the next sweep, while a successful delivery sets the reminder flag so the
//! next sweep skips it.

use crate::scheduling::domain::ReminderNotice;
use crate::scheduling::ports::{DispatchError, MessageDispatcher};
use crate::task::domain::{Task, TaskId, UserId};
use crate::task::ports::{RepositoryError, TaskRepository, UserRepository};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::MissedTickBehavior;

/// Tuning for the deadline monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineMonitorConfig {
    /// Time between sweeps.
    pub interval: Duration,
    /// How far ahead a deadline counts as imminent.
    pub lookahead: TimeDelta,
    /// Reminders with at most this many hours left use urgent framing.
    pub urgent_within_hours: i64,
}

impl Default for DeadlineMonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            lookahead: TimeDelta::hours(24),
            urgent_within_hours: 2,
        }
    }
}

/// Outcome counts of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    /// Tasks selected as due soon.
    pub selected: usize,
    /// Reminders delivered and recorded.
    pub notified: usize,
    /// Reminders that failed and stay eligible.
    pub failed: usize,
}

/// Failure that aborts a whole sweep.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Selecting due tasks failed.
    #[error("failed to select due tasks: {0}")]
    Selection(#[from] RepositoryError),

    /// The lookahead pushes the threshold past the representable range.
    #[error("lookahead {0} is out of range")]
    LookaheadOutOfRange(TimeDelta),
}

/// Failure to remind about a single task.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Looking up the owning user failed.
    #[error("failed to look up owner: {0}")]
    OwnerLookup(RepositoryError),

    /// The owning user no longer exists.
    #[error("owner {0} not found")]
    UnknownOwner(UserId),

    /// The task has no deadline to remind about.
    #[error("task {0} has no deadline")]
    MissingDeadline(TaskId),

    /// The messaging service did not deliver the reminder.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The reminder was delivered but the flag could not be stored.
    #[error("reminder delivered but not recorded: {0}")]
    NotRecorded(RepositoryError),
}

/// Background job that delivers deadline reminders.
#[derive(Clone)]
pub struct DeadlineMonitor<R, D, C>
where
    R: TaskRepository + UserRepository,
    D: MessageDispatcher,
    C: Clock + Send + Sync,
{
    store: Arc<R>,
    dispatcher: Arc<D>,
    clock: Arc<C>,
    config: DeadlineMonitorConfig,
}

impl<R, D, C> DeadlineMonitor<R, D, C>
where
    R: TaskRepository + UserRepository,
    D: MessageDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a monitor.
    #[must_use]
    pub const fn new(
        store: Arc<R>,
        dispatcher: Arc<D>,
        clock: Arc<C>,
        config: DeadlineMonitorConfig,
    ) -> Self {
        Self {
            store,
            dispatcher,
            clock,
            config,
        }
    }

    /// Returns the monitor settings.
    #[must_use]
    pub const fn config(&self) -> &DeadlineMonitorConfig {
        &self.config
    }

    /// Runs one sweep.
    ///
    /// Tasks are processed one at a time in the order the store returns them.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Selection`] when due tasks cannot be loaded and
    /// [`MonitorError::LookaheadOutOfRange`] when the threshold overflows.
    /// Per-task failures never abort the sweep; they are logged and counted.
    pub async fn sweep(&self) -> Result<SweepReport, MonitorError> {
        let now = self.clock.utc();
        let threshold = now
            .checked_add_signed(self.config.lookahead)
            .ok_or(MonitorError::LookaheadOutOfRange(self.config.lookahead))?;
        let due = self.store.find_due_for_reminder(threshold).await?;

        let mut report = SweepReport {
            selected: due.len(),
            ..SweepReport::default()
        };
        for task in &due {
            match self.remind(task, now).await {
                Ok(()) => report.notified += 1,
                Err(err @ ReminderError::NotRecorded(_)) => {
                    report.failed += 1;
                    tracing::error!(
                        task_id = %task.id(),
                        error = %err,
                        "deadline reminder not recorded"
                    );
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(
                        task_id = %task.id(),
                        error = %err,
                        "deadline reminder failed; retrying next sweep"
                    );
                }
            }
        }

        tracing::info!(
            selected = report.selected,
            notified = report.notified,
            failed = report.failed,
            "deadline sweep finished"
        );
        Ok(report)
    }

    /// Sweeps on every interval tick until `shutdown` resolves.
    ///
    /// The first sweep runs immediately. A sweep that fails as a whole is
    /// logged and the loop keeps going.
    pub async fn run<S>(&self, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = self.sweep().await {
                        tracing::error!(error = %err, "deadline sweep aborted");
                    }
                }
                () = &mut shutdown => {
                    tracing::info!("deadline monitor stopping");
                    break;
                }
            }
        }
    }

    async fn remind(&self, task: &Task, now: DateTime<Utc>) -> Result<(), ReminderError> {
        let owner = self
            .store
            .find_user(task.owner())
            .await
            .map_err(ReminderError::OwnerLookup)?
            .ok_or(ReminderError::UnknownOwner(task.owner()))?;
        let notice = ReminderNotice::for_task(task, now, self.config.urgent_within_hours)
            .ok_or(ReminderError::MissingDeadline(task.id()))?;

        self.dispatcher
            .send(owner.chat_id(), &notice.render())
            .await?;

        self.store
            .mark_reminder_sent(task.id())
            .await
            .map_err(ReminderError::NotRecorded)
    }
}
