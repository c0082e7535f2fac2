use crate::TranscriptEntry;

use serde::{Deserialize, Serialize};

/// IPC response from backend to client.
///
/// Each [`Request`](crate::Request) variant has exactly one matching success
/// response; anything else is an
/// [`UnexpectedResponse`](crate::IpcError::UnexpectedResponse) client error.
/// `Segment` is not a reply at all: it is pushed unsolicited on a subscribed
/// connection, one per transcript segment, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Answer to `IsRecording`.
    Recording {
        /// Whether the backend is currently capturing.
        active: bool,
    },
    /// Answer to `StartRecording`: capture has begun.
    Started,
    /// Answer to `StopRecording`: capture ended, transcript finalized.
    Stopped,
    /// Answer to `Subscribe`: segments will stream on this connection.
    Subscribed,
    /// A transcript segment pushed on a subscribed connection.
    Segment {
        /// The transcribed segment.
        entry: TranscriptEntry,
    },
    /// Backend-reported failure executing the request.
    Error {
        /// Failure description from the backend.
        message: String,
    },
}

impl Response {
    /// Wire tag of this variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Response::Recording { .. } => "recording",
            Response::Started => "started",
            Response::Stopped => "stopped",
            Response::Subscribed => "subscribed",
            Response::Segment { .. } => "segment",
            Response::Error { .. } => "error",
        }
    }
}
