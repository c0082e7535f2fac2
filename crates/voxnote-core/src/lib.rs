//! VoxNote Core Library
//!
//! The IPC boundary between the VoxNote client and the native
//! recording/transcription backend: the typed request/response protocol,
//! the length-prefixed JSON wire codec, and the [`RecorderBackend`] client
//! abstraction with its local-socket implementation.
//!
//! # Example
//!
//! ```no_run
//! use voxnote_core::{IpcResult, RecorderBackend, SocketBackend, default_socket_path};
//!
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> IpcResult<()> {
//!     let backend = SocketBackend::new(
//!         default_socket_path(),
//!         Duration::from_secs(5),
//!         Duration::from_secs(10),
//!     );
//!
//!     backend.start_recording().await?;
//!     let mut segments = backend.subscribe().await?;
//!     while let Some(entry) = segments.recv().await {
//!         println!("[{}] {}", entry.timestamp, entry.text);
//!     }
//!     backend.stop_recording().await?;
//!     Ok(())
//! }
//! ```

mod error;
mod ipc;
mod transcript;

pub use {
    error::{IpcError, Result as IpcResult},
    ipc::{
        MAX_MESSAGE_SIZE, RecorderBackend, Request, Response, SocketBackend, default_socket_path,
        read_json, read_message, write_json, write_message,
    },
    transcript::TranscriptEntry,
};

#[cfg(test)]
mod tests;
