use crate::SessionStatus;

use uuid::Uuid;
use voxnote_core::TranscriptEntry;

/// Events emitted by the recording controller to the host shell.
///
/// This is the host-facing surface of the controller: the shell never
/// reaches into controller state, it only reacts to these.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// A start command succeeded; fired once per successful start.
    RecordingStarted {
        /// Session ID of the recording that started.
        session_id: Uuid,
    },
    /// A stop command succeeded; fired once per successful stop.
    RecordingStopped {
        /// Session ID of the recording that stopped.
        session_id: Uuid,
    },
    /// A transcript segment arrived from the backend, forwarded unchanged.
    TranscriptReceived(TranscriptEntry),
    /// The session state changed, including each countdown tick.
    StateChanged(SessionStatus),
}
