//! Fire-and-forget persistence of task list snapshots.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::TaskStoreGateway;
use crate::todo::{
    domain::{Task, UserId},
    ports::KeyValueStore,
};

#[derive(Debug, Clone)]
struct Snapshot {
    user_id: UserId,
    tasks: Vec<Task>,
}

/// Background writer that saves the latest task list snapshot.
///
/// Callers enqueue and move on; the outcome of each write is only logged.
/// Only the newest pending snapshot is kept: one queued while a write is in
/// flight replaces any earlier one that has not been picked up yet, so a
/// stalled store holds at most one pending list in memory.
#[derive(Debug)]
pub struct PersistenceQueue {
    sender: watch::Sender<Option<Snapshot>>,
    writer: JoinHandle<()>,
}

impl PersistenceQueue {
    /// Spawns the writer task on the current tokio runtime.
    #[must_use]
    pub fn spawn<S>(gateway: Arc<TaskStoreGateway<S>>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let (sender, mut receiver) = watch::channel::<Option<Snapshot>>(None);
        let writer = tokio::spawn(async move {
            // An unseen snapshot is still delivered after the sender drops.
            while receiver.changed().await.is_ok() {
                let Some(snapshot) = receiver.borrow_and_update().clone() else {
                    continue;
                };
                if gateway.save(&snapshot.user_id, &snapshot.tasks).await {
                    debug!(user_id = %snapshot.user_id, count = snapshot.tasks.len(), "persisted task snapshot");
                } else {
                    warn!(user_id = %snapshot.user_id, "dropped task snapshot after failed save");
                }
            }
        });
        Self { sender, writer }
    }

    /// Queues a snapshot of `tasks` for `user_id`, replacing any snapshot
    /// the writer has not picked up yet.
    pub fn enqueue(&self, user_id: UserId, tasks: Vec<Task>) {
        if self.sender.send(Some(Snapshot { user_id, tasks })).is_err() {
            warn!("persistence writer has stopped; snapshot discarded");
        }
    }

    /// Stops accepting snapshots and waits for the pending write to finish.
    pub async fn shutdown(self) {
        let Self { sender, writer } = self;
        drop(sender);
        if let Err(err) = writer.await {
            error!(error = %err, "persistence writer terminated abnormally");
        }
    }
}
