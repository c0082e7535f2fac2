use crate::{
    AffordanceLabel, AmplitudeSnapshot, AppResult, ConsoleViewport, ControllerEvent,
    SessionStatus, TranscriptView,
};

use tokio::sync::{mpsc, watch};
use tracing::{info, instrument};
use voxnote_core::TranscriptEntry;

/// Host shell embedding the controller and the transcript view.
///
/// Owns the accumulated transcript sequence; the view only ever reads the
/// whole sequence per render. Reacts to controller events and amplitude
/// refreshes, and signals shutdown to the other tasks when its loop ends.
pub struct App {
    pub(crate) event_rx: mpsc::Receiver<ControllerEvent>,
    pub(crate) amplitude_rx: watch::Receiver<AmplitudeSnapshot>,
    pub(crate) transcripts: Vec<TranscriptEntry>,
    pub(crate) view: TranscriptView<ConsoleViewport>,
    pub(crate) status: SessionStatus,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        info!("VoxNote starting");

        self.print_label();

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    break;
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }

                Ok(()) = self.amplitude_rx.changed() => {
                    // Level meter only moves while recording.
                    if matches!(self.status, SessionStatus::Recording { .. }) {
                        self.print_label();
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        let _ = self.shutdown_tx.send(true);
        info!("VoxNote shut down successfully");

        Ok(())
    }

    fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::RecordingStarted { session_id } => {
                info!(session_id = %session_id, "Session started");
            }
            ControllerEvent::RecordingStopped { session_id } => {
                info!(session_id = %session_id, "Session stopped");
            }
            ControllerEvent::TranscriptReceived(entry) => {
                // The host owns accumulation; the view renders the whole
                // sequence each time.
                self.transcripts.push(entry);
                self.view.render(&self.transcripts);
            }
            ControllerEvent::StateChanged(status) => {
                self.status = status;
                self.print_label();
            }
        }
    }

    fn print_label(&self) {
        let label = AffordanceLabel::for_status(&self.status, &self.amplitude_rx.borrow());
        println!("{}", label);
    }
}
