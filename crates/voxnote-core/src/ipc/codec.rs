//! Length-prefixed JSON message framing.
//!
//! Wire format: a 4-byte little-endian length, then the JSON payload.
//! Lengths are validated against [`MAX_MESSAGE_SIZE`] before any allocation.

use crate::{IpcError, IpcResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum IPC message size (64 KiB).
pub const MAX_MESSAGE_SIZE: usize = 65536;

/// Read one length-prefixed message.
#[track_caller]
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> IpcResult<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_le_bytes(len_buf) as usize;

    // Validate BEFORE allocating: a hostile or corrupt length prefix must
    // not drive a huge allocation.
    if len > MAX_MESSAGE_SIZE {
        return Err(IpcError::MessageTooLarge {
            size: len,
            max: MAX_MESSAGE_SIZE,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;

    Ok(buf)
}

/// Write one length-prefixed message.
#[track_caller]
pub async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, data: &[u8]) -> IpcResult<()> {
    if data.len() > MAX_MESSAGE_SIZE {
        return Err(IpcError::MessageTooLarge {
            size: data.len(),
            max: MAX_MESSAGE_SIZE,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let len = data.len() as u32;
    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(data).await?;
    writer.flush().await?;

    Ok(())
}

/// Read and deserialize one JSON message.
#[track_caller]
pub async fn read_json<R: AsyncRead + Unpin, T: serde::de::DeserializeOwned>(
    reader: &mut R,
) -> IpcResult<T> {
    let data = read_message(reader).await?;
    serde_json::from_slice(&data).map_err(|e| IpcError::Codec {
        reason: format!("Failed to decode message: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Serialize and write one JSON message.
#[track_caller]
pub async fn write_json<W: AsyncWrite + Unpin, T: serde::Serialize>(
    writer: &mut W,
    value: &T,
) -> IpcResult<()> {
    let data = serde_json::to_vec(value).map_err(|e| IpcError::Codec {
        reason: format!("Failed to encode message: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;
    write_message(writer, &data).await
}
