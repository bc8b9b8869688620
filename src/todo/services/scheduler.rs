//! Periodic driver for the expiration and reminder sweeps.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::TaskSession;
use crate::todo::ports::Notifier;

/// Default period between sweep ticks.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runs [`TaskSession::tick`] on a fixed period.
///
/// Each tick reads the current local time from the injected clock, so the
/// sweeps themselves never consult the system clock.
#[derive(Debug)]
pub struct SweepScheduler;

impl SweepScheduler {
    /// Spawns the tick loop on the current tokio runtime.
    ///
    /// The first tick happens one full `period` after spawning. The loop
    /// exits when `shutdown` changes or its sender is dropped.
    #[must_use]
    pub fn spawn<N, C>(
        session: Arc<Mutex<TaskSession<N>>>,
        clock: Arc<C>,
        period: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()>
    where
        N: Notifier + 'static,
        C: Clock + Send + Sync + 'static,
    {
        tokio::spawn(async move {
            info!(period_secs = period.as_secs(), "sweep scheduler started");
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let now = clock.local();
                        let outcome = session.lock().await.tick(&now).await;
                        debug!(expired = outcome.expired, reminded = outcome.reminded, "sweep tick");
                    }
                    _ = shutdown.changed() => break,
                }
            }
            info!("sweep scheduler stopped");
        })
    }
}
