//! Periodic refresh task with an explicit shutdown handle.
//!
//! The original design ran an uncancellable wall-clock timer for the life of
//! the page; here the timer is a spawned task owned by a handle, refreshes
//! run to completion before the next tick is honored (missed ticks are
//! delayed, not bursted), and shutdown is explicit.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::sync::DashboardSync;

// ---

/// Handle to the running refresh scheduler.
pub struct SchedulerHandle {
    // ---
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the scheduler to stop and wait for the task to finish. An
    /// in-flight refresh completes before the task exits.
    pub async fn shutdown(self) {
        // ---
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the refresh scheduler.
///
/// The first refresh fires immediately, then once per `every` interval.
/// Failed cycles are logged and the schedule keeps going.
pub fn spawn_scheduler(sync: DashboardSync, every: Duration) -> SchedulerHandle {
    // ---
    let (tx, mut rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    debug!("scheduled refresh tick");
                    if let Err(e) = sync.refresh().await {
                        error!("scheduled refresh failed: {e:#}");
                    }
                }
                _ = rx.changed() => {
                    info!("refresh scheduler shutting down");
                    break;
                }
            }
        }
    });

    SchedulerHandle { shutdown: tx, task }
}
