// src/controller/timer.rs

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use crate::controller::ControlEvent;

/// Repeating tick source.
///
/// Each timer sends `ControlEvent::Tick { generation }` every `period`
/// until cancelled or dropped. The first tick fires one period after start.
#[derive(Debug)]
pub struct TickTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

impl TickTimer {
    pub fn start(generation: u64, period: Duration, tx: mpsc::Sender<ControlEvent>) -> Self {
        debug!(generation, period_ms = period.as_millis() as u64, "starting tick timer");

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                trace!(generation, "tick");
                if tx.send(ControlEvent::Tick { generation }).await.is_err() {
                    debug!(generation, "controller channel closed; tick timer exiting");
                    break;
                }
            }
        });

        Self { generation, handle }
    }

    pub fn cancel(self) {
        debug!(generation = self.generation, "cancelling tick timer");
        // Drop aborts the task.
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
