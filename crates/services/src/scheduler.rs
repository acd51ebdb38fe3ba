//! Tokio adapter that turns an armed countdown into a stream of ticks.
//!
//! The pump for one handle is a spawned task that sends the handle down a
//! channel once per period. Cancelling aborts the task, but a tick it already
//! queued is still delivered; the session recognises that handle as stale and
//! ignores it.

use std::time::Duration;

use goon_core::TimerHandle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct TickScheduler {
    tx: mpsc::UnboundedSender<TimerHandle>,
    pump: Option<(TimerHandle, JoinHandle<()>)>,
}

impl TickScheduler {
    /// Creates a scheduler and the receiver its ticks arrive on.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerHandle>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, pump: None }, rx)
    }

    /// Starts ticking `handle` every `period`, first tick one period from now.
    ///
    /// Any pump already running is cancelled first. Must be called from
    /// within a tokio runtime.
    pub fn arm(&mut self, handle: TimerHandle, period: Duration) {
        self.cancel();

        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(handle).is_err() {
                    break;
                }
            }
        });
        self.pump = Some((handle, task));
    }

    /// Stops the running pump. Safe to call when nothing is armed.
    pub fn cancel(&mut self) {
        if let Some((handle, task)) = self.pump.take() {
            task.abort();
            tracing::trace!(?handle, "tick pump cancelled");
        }
    }

    /// Handle currently being pumped, if any.
    #[must_use]
    pub fn armed(&self) -> Option<TimerHandle> {
        self.pump.as_ref().map(|(handle, _)| *handle)
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
