//! Shared test helpers for in-memory session integration tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use tasklight::todo::{
    adapters::memory::{InMemoryKeyValueStore, RecordingNotifier, StaticIdentity},
    domain::UserId,
    services::{
        GatewaySettings, ReminderTemplates, SessionDependencies, SessionSettings, TaskSession,
        TaskStoreGateway,
    },
};

/// Store type backing the integration tests.
pub type MemoryStore = InMemoryKeyValueStore<ManualClock>;

/// Clock that only moves when a test advances it.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock pinned to `now`.
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: TimeDelta) {
        let mut now = self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// A store, gateway, notifier, and clock shared by every session a test opens.
pub struct Backend {
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<TaskStoreGateway<MemoryStore>>,
    pub notifier: RecordingNotifier,
}

impl Backend {
    /// Opens a session for `user` at the clock's current instant.
    pub async fn open_for(&self, user: &UserId) -> TaskSession<RecordingNotifier> {
        self.open_with(
            &StaticIdentity::signed_in(user.clone()),
            SessionSettings::default(),
        )
        .await
    }

    /// Opens a session with an explicit identity and settings.
    pub async fn open_with(
        &self,
        identity: &StaticIdentity,
        settings: SessionSettings,
    ) -> TaskSession<RecordingNotifier> {
        let dependencies = SessionDependencies {
            gateway: Arc::clone(&self.gateway),
            notifier: Arc::new(self.notifier.clone()),
            templates: ReminderTemplates::default(),
            settings,
        };
        TaskSession::open(identity, dependencies, self.clock.utc()).await
    }
}

/// Returns a UTC instant on 2026-10-19.
///
/// # Panics
///
/// Panics if the wall-clock values are out of range.
#[must_use]
pub fn instant(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, hour, minute, 0)
        .single()
        .expect("valid test instant")
}

/// Provides a fresh backend whose clock starts at 08:00 UTC.
#[fixture]
pub fn backend() -> Backend {
    let clock = Arc::new(ManualClock::starting_at(instant(8, 0)));
    let store = Arc::new(InMemoryKeyValueStore::new(Arc::clone(&clock)));
    let gateway = Arc::new(TaskStoreGateway::new(
        Arc::clone(&store),
        GatewaySettings::default(),
    ));
    Backend {
        clock,
        store,
        gateway,
        notifier: RecordingNotifier::default(),
    }
}

/// Provides the signed-in user.
#[fixture]
pub fn alice() -> UserId {
    UserId::new("alice").expect("valid user id")
}
