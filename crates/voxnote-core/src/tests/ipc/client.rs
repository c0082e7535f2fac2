use crate::{
    IpcError, RecorderBackend, Request, Response, SocketBackend, TranscriptEntry, read_json,
    write_json,
};

use std::{path::PathBuf, time::Duration};

use tokio::net::UnixListener;

fn test_socket_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("voxnote-test-{}-{}.sock", std::process::id(), name))
}

fn backend_at(path: &PathBuf) -> SocketBackend {
    SocketBackend::new(path.clone(), Duration::from_secs(1), Duration::from_secs(1))
}

/// Accept one connection and answer each request from the script, in order.
#[allow(clippy::unwrap_used)]
async fn scripted_server(listener: UnixListener, script: Vec<Response>) {
    let (mut stream, _) = listener.accept().await.unwrap();
    for response in script {
        if read_json::<_, Request>(&mut stream).await.is_err() {
            return;
        }
        if write_json(&mut stream, &response).await.is_err() {
            return;
        }
    }
}

/// WHAT: A request/response exchange resolves to the typed answer
/// WHY: The controller trusts the client to map wire messages to results
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_scripted_backend_when_starting_then_typed_response_returned() {
    // Given: A backend answering Started then Recording
    let path = test_socket_path("exchange");
    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path).unwrap();
    let server = tokio::spawn(scripted_server(
        listener,
        vec![Response::Started, Response::Recording { active: true }],
    ));
    let backend = backend_at(&path);

    // When: Issuing start then the status query on the persistent connection
    let started = backend.start_recording().await;
    let active = backend.is_recording().await;

    // Then: Both calls resolve to their typed answers
    assert!(started.is_ok());
    assert!(active.unwrap());

    server.await.unwrap();
    let _ = std::fs::remove_file(&path);
}

/// WHAT: A backend error response surfaces as IpcError::Backend
/// WHY: Backend rejections must be distinguishable from transport failures
#[tokio::test]
#[allow(clippy::unwrap_used, clippy::panic)]
async fn given_backend_rejection_when_starting_then_backend_error() {
    // Given: A backend rejecting the start command
    let path = test_socket_path("rejection");
    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path).unwrap();
    let server = tokio::spawn(scripted_server(
        listener,
        vec![Response::Error {
            message: "microphone unavailable".to_string(),
        }],
    ));
    let backend = backend_at(&path);

    // When: Issuing start
    let result = backend.start_recording().await;

    // Then: The rejection surfaces as a Backend error with the message
    match result {
        Err(IpcError::Backend { message, .. }) => assert_eq!(message, "microphone unavailable"),
        other => panic!("expected Backend error, got {:?}", other),
    }

    server.await.unwrap();
    let _ = std::fs::remove_file(&path);
}

/// WHAT: A mismatched response surfaces as UnexpectedResponse
/// WHY: Protocol drift must fail loudly, never be silently coerced
#[tokio::test]
#[allow(clippy::unwrap_used, clippy::panic)]
async fn given_mismatched_response_when_querying_then_unexpected_response() {
    // Given: A backend answering the status query with Started
    let path = test_socket_path("mismatch");
    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path).unwrap();
    let server = tokio::spawn(scripted_server(listener, vec![Response::Started]));
    let backend = backend_at(&path);

    // When: Issuing the status query
    let result = backend.is_recording().await;

    // Then: The mismatch is reported, naming both variants
    match result {
        Err(IpcError::UnexpectedResponse { expected, got, .. }) => {
            assert_eq!(expected, "recording");
            assert_eq!(got, "started");
        }
        other => panic!("expected UnexpectedResponse, got {:?}", other),
    }

    server.await.unwrap();
    let _ = std::fs::remove_file(&path);
}

/// WHAT: Subscribed segments arrive on the channel in emission order
/// WHY: Display order is arrival order, the stream must never reorder
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_subscription_when_segments_pushed_then_order_preserved() {
    // Given: A backend that acks Subscribe then pushes three segments
    let path = test_socket_path("subscribe");
    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path).unwrap();
    let entries: Vec<TranscriptEntry> = (1..=3)
        .map(|n| TranscriptEntry {
            id: n.to_string(),
            text: format!("segment {}", n),
            timestamp: format!("00:0{}", n),
        })
        .collect();
    let pushed = entries.clone();
    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _: Request = read_json(&mut stream).await.unwrap();
        write_json(&mut stream, &Response::Subscribed).await.unwrap();
        for entry in pushed {
            write_json(&mut stream, &Response::Segment { entry })
                .await
                .unwrap();
        }
    });
    let backend = backend_at(&path);

    // When: Subscribing and draining the channel
    let mut segment_rx = backend.subscribe().await.unwrap();
    let mut received = Vec::new();
    while let Some(entry) = segment_rx.recv().await {
        received.push(entry);
    }

    // Then: Segments arrive exactly as emitted, in order
    assert_eq!(received, entries);

    server.await.unwrap();
    let _ = std::fs::remove_file(&path);
}
