use crate::{IpcError, MAX_MESSAGE_SIZE, read_json, read_message, write_json, write_message};

use std::io::Cursor;

/// WHAT: A written message reads back byte-identical
/// WHY: Framing must be lossless for the protocol to carry JSON payloads
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_message_when_written_and_read_then_payload_roundtrips() {
    // Given: A payload and an in-memory stream
    let payload = b"transcript segment payload";
    let mut buf = Vec::new();

    // When: Writing then reading the framed message
    write_message(&mut buf, payload).await.unwrap();
    let mut cursor = Cursor::new(buf);
    let read_back = read_message(&mut cursor).await.unwrap();

    // Then: The payload is unchanged
    assert_eq!(read_back, payload);
}

/// WHAT: An oversized write is rejected before hitting the wire
/// WHY: The 64 KiB cap is a protocol invariant on both directions
#[tokio::test]
async fn given_oversized_payload_when_writing_then_rejected() {
    // Given: A payload one byte over the cap
    let payload = vec![0u8; MAX_MESSAGE_SIZE + 1];
    let mut buf = Vec::new();

    // When: Writing the framed message
    let result = write_message(&mut buf, &payload).await;

    // Then: Rejected with MessageTooLarge and nothing written
    assert!(matches!(result, Err(IpcError::MessageTooLarge { .. })));
    assert!(buf.is_empty());
}

/// WHAT: A hostile length prefix is rejected before allocating
/// WHY: A corrupt 4-byte header must not drive a multi-gigabyte allocation
#[tokio::test]
#[allow(clippy::panic)]
async fn given_oversized_length_prefix_when_reading_then_rejected_before_allocation() {
    // Given: A header claiming a payload far over the cap, with no payload
    let mut framed = u32::MAX.to_le_bytes().to_vec();
    framed.extend_from_slice(b"junk");
    let mut cursor = Cursor::new(framed);

    // When: Reading the message
    let result = read_message(&mut cursor).await;

    // Then: Rejected with MessageTooLarge, never attempting the read
    match result {
        Err(IpcError::MessageTooLarge { size, max, .. }) => {
            assert_eq!(size, u32::MAX as usize);
            assert_eq!(max, MAX_MESSAGE_SIZE);
        }
        other => panic!("expected MessageTooLarge, got {:?}", other),
    }
}

/// WHAT: A truncated stream surfaces as ConnectionClosed
/// WHY: Callers reconnect on hangup but report other IO failures
#[tokio::test]
async fn given_truncated_stream_when_reading_then_connection_closed() {
    // Given: A stream that ends mid-header
    let mut cursor = Cursor::new(vec![0x05, 0x00]);

    // When: Reading a message
    let result = read_message(&mut cursor).await;

    // Then: Surfaces as ConnectionClosed, not a generic IO error
    assert!(matches!(result, Err(IpcError::ConnectionClosed { .. })));
}

/// WHAT: JSON values roundtrip through the framed codec
/// WHY: read_json/write_json are the only codec entry points production uses
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_json_value_when_framed_then_roundtrips() {
    // Given: A serializable value
    let value = vec!["one".to_string(), "two".to_string()];
    let mut buf = Vec::new();

    // When: Writing and reading it as framed JSON
    write_json(&mut buf, &value).await.unwrap();
    let mut cursor = Cursor::new(buf);
    let read_back: Vec<String> = read_json(&mut cursor).await.unwrap();

    // Then: The value is unchanged
    assert_eq!(read_back, value);
}

/// WHAT: Malformed JSON surfaces as a codec error
/// WHY: Wire corruption must be distinguishable from transport failures
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_malformed_json_when_reading_then_codec_error() {
    // Given: A well-framed message holding invalid JSON
    let mut buf = Vec::new();
    write_message(&mut buf, b"{not json").await.unwrap();
    let mut cursor = Cursor::new(buf);

    // When: Decoding it
    let result: Result<Vec<String>, _> = read_json(&mut cursor).await;

    // Then: Surfaces as a codec error
    assert!(matches!(result, Err(IpcError::Codec { .. })));
}
