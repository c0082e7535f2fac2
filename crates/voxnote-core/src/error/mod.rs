use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// IPC boundary errors with source location tracking.
#[derive(Error, Debug)]
pub enum IpcError {
    /// Could not establish a connection to the backend socket.
    #[error("Connection failed: {reason} {location}")]
    ConnectionFailed {
        /// Description of the connection failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The backend closed the connection mid-exchange.
    #[error("Connection closed by backend {location}")]
    ConnectionClosed {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A message exceeded the wire size cap.
    #[error("Message too large: {size} bytes (max {max}) {location}")]
    MessageTooLarge {
        /// Size of the offending message in bytes.
        size: usize,
        /// Maximum allowed message size in bytes.
        max: usize,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// JSON encoding or decoding of a wire message failed.
    #[error("Codec error: {reason} {location}")]
    Codec {
        /// Description of the codec failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The backend did not answer within the request timeout.
    #[error("Request timed out after {seconds}s {location}")]
    Timeout {
        /// Timeout that elapsed, in seconds.
        seconds: u64,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The backend reported a failure executing the request.
    #[error("Backend error: {message} {location}")]
    Backend {
        /// Failure message reported by the backend.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The backend answered with a response that does not match the request.
    #[error("Unexpected response: expected {expected}, got {got} {location}")]
    UnexpectedResponse {
        /// Response variant the request licenses.
        expected: &'static str,
        /// Response variant actually received.
        got: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error on the socket.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

// Manual From with location tracking; #[from] does not support extra fields.
// UnexpectedEof means the backend hung up, which callers handle differently
// from other IO failures (reconnect rather than report).
impl From<std::io::Error> for IpcError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            IpcError::ConnectionClosed {
                location: ErrorLocation::from(Location::caller()),
            }
        } else {
            IpcError::Io {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        }
    }
}

/// Result type alias using [`IpcError`].
pub type Result<T> = std::result::Result<T, IpcError>;
