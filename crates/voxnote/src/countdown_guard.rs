use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time::MissedTickBehavior};
use tracing::debug;

/// Interval between countdown ticks.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// RAII handle for the stop-countdown timer.
///
/// Owns the timer task and aborts it on drop, so the timer is cancelled on
/// every exit path: natural completion, re-actuation during countdown, and
/// controller teardown. A torn-down controller can never receive a late
/// tick and fire a stop against a dead session.
///
/// Each guard carries a generation number; ticks from a superseded
/// countdown still sitting in the channel are identified by generation and
/// ignored by the controller.
pub struct CountdownGuard {
    generation: u64,
    handle: JoinHandle<()>,
}

impl CountdownGuard {
    /// Spawn a timer task sending one tick per second into `tick_tx`.
    ///
    /// The first tick arrives one second after the spawn; the transition
    /// into the countdown state itself renders the initial label.
    pub(crate) fn spawn(generation: u64, tick_tx: mpsc::Sender<u64>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // tokio intervals fire immediately; swallow the zeroth tick.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tick_tx.send(generation).await.is_err() {
                    debug!(generation, "Countdown tick receiver gone, timer stopping");
                    break;
                }
            }
        });

        Self { generation, handle }
    }

    /// Generation this timer belongs to.
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for CountdownGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
