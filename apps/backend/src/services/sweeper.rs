//! Periodic eviction of idle sessions.
//!
//! Create and join already sweep on demand; this task bounds memory for
//! servers that stop receiving those calls.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::services::sessions::SessionService;

/// Spawn the sweeper on the current runtime. Returns `None` when `period` is
/// zero, which disables it.
pub fn spawn_sweeper(service: Arc<SessionService>, period: Duration) -> Option<JoinHandle<()>> {
    if period.is_zero() {
        info!("Session sweeper disabled");
        return None;
    }

    info!(period_secs = period.as_secs(), "Starting session sweeper");
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = service.evict_expired();
            debug!(evicted, sessions = service.store().len(), "Sweep finished");
        }
    }))
}
