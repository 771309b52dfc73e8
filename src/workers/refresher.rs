//! Periodic refresh timer
//!
//! Started exactly once per session. It only signals the UI loop; the
//! controller decides what to reload.

use crate::controller::updates::Update;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Sends [`Update::Tick`] every `period` until shutdown or until the UI
/// loop goes away. The first tick fires one period after start.
pub fn spawn_refresher(
    period: Duration,
    updates: mpsc::Sender<Update>,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if updates.send(Update::Tick).await.is_err() {
                        break;
                    }
                }
                _ = shutdown.recv() => break,
            }
        }
    })
}
