//! Runs one task session against Redis and drives the sweep scheduler.
//!
//! Usage:
//!
//! ```text
//! TASKLIGHT__SESSION__USER_ID=<user> tasklight-worker
//! ```
//!
//! Settings come from `tasklight.toml` (or `$TASKLIGHT_CONFIG`) and
//! `TASKLIGHT__*` environment variables. Reminders are written to the log.
//! The worker stops on Ctrl-C after draining queued writes.

use std::sync::Arc;

use eyre::{WrapErr, eyre};
use mockable::{Clock, DefaultClock};
use tasklight::{
    settings::AppSettings,
    telemetry,
    todo::{
        adapters::{TracingNotifier, memory::StaticIdentity, redis::RedisKeyValueStore},
        services::{SessionDependencies, SweepScheduler, TaskSession, TaskStoreGateway},
    },
};
use tokio::sync::{Mutex, watch};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let settings = AppSettings::load().wrap_err("load settings")?;
    telemetry::init_tracing(&settings.log.filter).wrap_err("initialise logging")?;

    let store = RedisKeyValueStore::open(&settings.store.redis_url, settings.store_timeout())
        .wrap_err("open key-value store")?;
    let gateway = Arc::new(TaskStoreGateway::new(
        Arc::new(store),
        settings.gateway_settings(),
    ));
    let identity = StaticIdentity::from(settings.session_user()?);
    let clock = Arc::new(DefaultClock);

    let dependencies = SessionDependencies {
        gateway,
        notifier: Arc::new(TracingNotifier),
        templates: settings.reminder_templates()?,
        settings: settings.session_settings()?,
    };
    let session = TaskSession::open(&identity, dependencies, clock.utc()).await;
    if session.user().is_none() {
        info!("no session user configured; running with an empty, read-only list");
    }
    let stats = session.statistics();
    info!(
        total = stats.total,
        completed = stats.completed,
        completion_rate = stats.completion_rate,
        "task list loaded"
    );

    let session = Arc::new(Mutex::new(session));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = SweepScheduler::spawn(
        Arc::clone(&session),
        clock,
        settings.sweep_interval(),
        shutdown_rx,
    );

    tokio::signal::ctrl_c()
        .await
        .wrap_err("wait for shutdown signal")?;
    info!("shutting down");
    shutdown_tx.send(true).wrap_err("signal scheduler shutdown")?;
    scheduler.await.wrap_err("join sweep scheduler")?;

    let session = Arc::try_unwrap(session)
        .map_err(|_| eyre!("task session is still shared after scheduler shutdown"))?
        .into_inner();
    session.close().await;
    Ok(())
}
