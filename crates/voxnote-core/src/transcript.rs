use serde::{Deserialize, Serialize};

/// One unit of transcribed text, delivered asynchronously by the backend.
///
/// Entries are append-only from the client's perspective: arrival order is
/// the display order, and the `timestamp` is a display string, never an
/// ordering key. Content is not validated here; malformed entries are the
/// producer's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Producer-assigned unique identifier.
    pub id: String,
    /// Finalized or partial transcription text for a span of audio.
    pub text: String,
    /// Display timestamp (e.g. `"01:23"`).
    pub timestamp: String,
}
