//! Shared fixtures for in-memory integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex};
use taskwise::scheduling::adapters::InMemoryDispatcher;
use taskwise::scheduling::services::{DeadlineMonitor, DeadlineMonitorConfig};
use taskwise::task::adapters::memory::InMemoryTaskStore;
use taskwise::task::domain::{ChatId, UserId, UserProfile};
use taskwise::task::services::{CategoryService, TaskService, UserService};

/// Clock pinned to a settable instant.
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    /// Moves the clock forward.
    ///
    /// # Panics
    ///
    /// Panics if the clock lock is poisoned.
    pub fn advance(&self, by: TimeDelta) {
        *self.0.lock().expect("clock lock") += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

/// The instant every harness starts at.
///
/// # Panics
///
/// Panics if the literal date is invalid.
#[must_use]
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0)
        .single()
        .expect("valid start time")
}

/// Services wired to one shared in-memory store.
pub struct Harness {
    /// Shared store.
    pub store: Arc<InMemoryTaskStore>,
    /// Shared clock.
    pub clock: Arc<FixedClock>,
    /// Recording dispatcher.
    pub dispatcher: Arc<InMemoryDispatcher>,
    /// User registry.
    pub users: UserService<InMemoryTaskStore, FixedClock>,
    /// Task service.
    pub tasks: TaskService<InMemoryTaskStore, FixedClock>,
    /// Category service.
    pub categories: CategoryService<InMemoryTaskStore, FixedClock>,
}

impl Harness {
    /// Registers a user for `chat`.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails.
    pub async fn register(&self, chat: i64) -> eyre::Result<UserId> {
        let user = self
            .users
            .register(ChatId::new(chat), UserProfile::default())
            .await?;
        Ok(user.id())
    }

    /// Builds a deadline monitor with default tuning.
    #[must_use]
    pub fn monitor(&self) -> DeadlineMonitor<InMemoryTaskStore, InMemoryDispatcher, FixedClock> {
        DeadlineMonitor::new(
            Arc::clone(&self.store),
            Arc::clone(&self.dispatcher),
            Arc::clone(&self.clock),
            DeadlineMonitorConfig::default(),
        )
    }
}

/// Provides a fresh harness for each test.
#[fixture]
pub fn harness() -> Harness {
    let store = Arc::new(InMemoryTaskStore::new());
    let clock = Arc::new(FixedClock(Mutex::new(start_time())));
    Harness {
        users: UserService::new(Arc::clone(&store), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::clone(&store), Arc::clone(&clock)),
        categories: CategoryService::new(Arc::clone(&store), Arc::clone(&clock)),
        dispatcher: Arc::new(InMemoryDispatcher::new()),
        store,
        clock,
    }
}
