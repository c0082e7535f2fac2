use serde::{Deserialize, Serialize};

/// IPC request from client to backend.
///
/// A closed set of commands: the state machine on the client side only ever
/// issues a request from a state that licenses it, so at most one
/// `StartRecording`/`StopRecording` is in flight at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Query whether the backend is currently capturing.
    IsRecording,
    /// Begin audio capture.
    StartRecording,
    /// End audio capture and finalize the transcript.
    StopRecording,
    /// Subscribe this connection to the transcript segment stream.
    Subscribe,
}
