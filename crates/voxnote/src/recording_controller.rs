//! Recording session controller.
//!
//! Translates the single record/stop affordance into backend IPC calls with
//! correct sequencing: `Idle → Recording → StoppingCountdown → Idle`, plus
//! the cancel edge back to `Recording` when the affordance is re-actuated
//! during the countdown. All transitions run through one select loop, so no
//! two transitions are ever concurrently in progress, and at most one
//! start/stop call is in flight.

use crate::{Alert, AppError, AppResult, ControllerEvent, CountdownGuard, SessionStatus};

use std::{panic::Location, sync::Arc, time::Instant};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;
use voxnote_core::{RecorderBackend, TranscriptEntry};

/// Seconds the stop countdown starts from.
pub(crate) const COUNTDOWN_START_SECONDS: u8 = 5;

/// User-visible notice when the start command fails.
pub(crate) const START_FAILURE_NOTICE: &str =
    "Failed to start recording. Please check the console for details.";

/// User-visible notice when the stop command fails.
pub(crate) const STOP_FAILURE_NOTICE: &str =
    "Failed to stop recording. Please check the console for details.";

/// Capacity of the internal countdown tick channel.
const TICK_CHANNEL_CAPACITY: usize = 8;

/// Owns the recording lifecycle and drives the backend over IPC.
///
/// IPC failures never propagate out of the controller: they are logged,
/// surfaced through the [`Alert`] sink, and leave the session in a state
/// the user can retry from. The only errors `run` returns are host channel
/// failures, which mean the shell itself is gone.
pub struct RecordingController {
    backend: Arc<dyn RecorderBackend>,
    alerter: Arc<dyn Alert>,
    status: SessionStatus,
    event_tx: mpsc::Sender<ControllerEvent>,
    actuation_rx: mpsc::Receiver<()>,
    segment_rx: mpsc::Receiver<TranscriptEntry>,
    tick_tx: mpsc::Sender<u64>,
    tick_rx: mpsc::Receiver<u64>,
    countdown: Option<CountdownGuard>,
    generation: u64,
}

impl RecordingController {
    /// Create a controller in `initial_status`.
    ///
    /// `initial_status` is `Idle`, or `Recording` when the host found an
    /// active backend session at mount. `segment_rx` is the backend's
    /// transcript stream; `actuation_rx` delivers one unit per actuation of
    /// the record/stop affordance.
    pub fn new(
        backend: Arc<dyn RecorderBackend>,
        alerter: Arc<dyn Alert>,
        event_tx: mpsc::Sender<ControllerEvent>,
        actuation_rx: mpsc::Receiver<()>,
        segment_rx: mpsc::Receiver<TranscriptEntry>,
        initial_status: SessionStatus,
    ) -> Self {
        let (tick_tx, tick_rx) = mpsc::channel(TICK_CHANNEL_CAPACITY);

        Self {
            backend,
            alerter,
            status: initial_status,
            event_tx,
            actuation_rx,
            segment_rx,
            tick_tx,
            tick_rx,
            countdown: None,
            generation: 0,
        }
    }

    /// Current session status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Run the controller event loop until shutdown.
    ///
    /// Serializes actuations, countdown ticks, and incoming transcript
    /// segments through one loop. Dropping out of this method cancels any
    /// live countdown timer.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        info!(status = ?self.status, "Recording controller running");

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Recording controller shutting down");
                    break;
                }
                Some(()) = self.actuation_rx.recv() => {
                    self.handle_actuation().await?;
                }
                Some(generation) = self.tick_rx.recv() => {
                    self.handle_tick(generation).await?;
                }
                Some(entry) = self.segment_rx.recv() => {
                    self.handle_segment(entry).await?;
                }
                else => {
                    info!("All controller channels closed, shutting down");
                    break;
                }
            }
        }

        // Teardown cancels an in-flight countdown; a late tick must never
        // fire a stop against a torn-down session.
        self.countdown.take();

        Ok(())
    }

    /// Handle one actuation of the record/stop affordance.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub(crate) async fn handle_actuation(&mut self) -> AppResult<()> {
        match self.status {
            SessionStatus::Idle => self.start_from_idle().await,
            SessionStatus::Recording {
                started_at,
                session_id,
            } => {
                self.generation += 1;
                self.countdown = Some(CountdownGuard::spawn(
                    self.generation,
                    self.tick_tx.clone(),
                ));
                self.status = SessionStatus::StoppingCountdown {
                    seconds_remaining: COUNTDOWN_START_SECONDS,
                    started_at,
                    session_id,
                };
                info!(
                    session_id = %session_id,
                    seconds = COUNTDOWN_START_SECONDS,
                    "Stop countdown started"
                );
                self.emit(ControllerEvent::StateChanged(self.status)).await
            }
            SessionStatus::StoppingCountdown {
                started_at,
                session_id,
                ..
            } => {
                // Cancel gesture: back to Recording, no stop is issued.
                self.countdown.take();
                self.status = SessionStatus::Recording {
                    started_at,
                    session_id,
                };
                info!(session_id = %session_id, "Stop countdown cancelled");
                self.emit(ControllerEvent::StateChanged(self.status)).await
            }
        }
    }

    async fn start_from_idle(&mut self) -> AppResult<()> {
        // Reconcile with the backend before issuing start: a previous
        // session or crash may have left it recording.
        match self.backend.is_recording().await {
            Ok(true) => {
                let session_id = Uuid::new_v4();
                warn!(
                    session_id = %session_id,
                    "Backend already recording, adopting session"
                );
                self.status = SessionStatus::Recording {
                    started_at: Instant::now(),
                    session_id,
                };
                // No RecordingStarted: no start we issued succeeded.
                return self.emit(ControllerEvent::StateChanged(self.status)).await;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(error = ?e, "Recording state query failed, proceeding");
            }
        }

        match self.backend.start_recording().await {
            Ok(()) => {
                let session_id = Uuid::new_v4();
                self.status = SessionStatus::Recording {
                    started_at: Instant::now(),
                    session_id,
                };
                info!(session_id = %session_id, "Recording started");
                self.emit(ControllerEvent::RecordingStarted { session_id })
                    .await?;
                self.emit(ControllerEvent::StateChanged(self.status)).await
            }
            Err(e) => {
                // Non-fatal: state stays Idle and the actuation can be
                // retried.
                error!(error = ?e, "Failed to start recording");
                self.alerter.alert(START_FAILURE_NOTICE);
                Ok(())
            }
        }
    }

    /// Handle one countdown tick.
    ///
    /// Ticks carry the generation of the timer that sent them; anything not
    /// matching the live countdown is stale and ignored.
    pub(crate) async fn handle_tick(&mut self, generation: u64) -> AppResult<()> {
        if self.countdown.as_ref().map(CountdownGuard::generation) != Some(generation) {
            debug!(generation, "Ignoring stale countdown tick");
            return Ok(());
        }

        let SessionStatus::StoppingCountdown {
            seconds_remaining,
            started_at,
            session_id,
        } = self.status
        else {
            debug!(status = ?self.status, "Tick outside countdown, ignoring");
            return Ok(());
        };

        let seconds_remaining = seconds_remaining.saturating_sub(1);
        self.status = SessionStatus::StoppingCountdown {
            seconds_remaining,
            started_at,
            session_id,
        };
        self.emit(ControllerEvent::StateChanged(self.status)).await?;

        if seconds_remaining == 0 {
            self.countdown.take();
            self.stop_recording(started_at, session_id).await?;
        }

        Ok(())
    }

    async fn stop_recording(&mut self, started_at: Instant, session_id: Uuid) -> AppResult<()> {
        match self.backend.stop_recording().await {
            Ok(()) => {
                self.status = SessionStatus::Idle;
                info!(
                    session_id = %session_id,
                    duration_ms = started_at.elapsed().as_millis(),
                    "Recording stopped"
                );
                self.emit(ControllerEvent::RecordingStopped { session_id })
                    .await?;
                self.emit(ControllerEvent::StateChanged(self.status)).await
            }
            Err(e) => {
                // Never silently lose the in-progress session: roll back to
                // Recording so the user can retry the stop.
                error!(session_id = %session_id, error = ?e, "Failed to stop recording");
                self.alerter.alert(STOP_FAILURE_NOTICE);
                self.status = SessionStatus::Recording {
                    started_at,
                    session_id,
                };
                self.emit(ControllerEvent::StateChanged(self.status)).await
            }
        }
    }

    /// Forward one transcript segment to the host, unchanged.
    ///
    /// No buffering, filtering, or merging: arrival order is display order.
    pub(crate) async fn handle_segment(&mut self, entry: TranscriptEntry) -> AppResult<()> {
        debug!(id = %entry.id, text_len = entry.text.len(), "Transcript segment received");
        self.emit(ControllerEvent::TranscriptReceived(entry)).await
    }

    async fn emit(&self, event: ControllerEvent) -> AppResult<()> {
        self.event_tx
            .send(event)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to deliver controller event: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
