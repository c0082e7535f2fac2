use crate::{Request, Response, TranscriptEntry};

use serde_json::json;

/// WHAT: Request wire tags are stable snake_case command names
/// WHY: The backend dispatches on these exact strings
#[test]
#[allow(clippy::unwrap_used)]
fn given_requests_when_serialized_then_tags_are_snake_case() {
    assert_eq!(
        serde_json::to_value(Request::IsRecording).unwrap(),
        json!({"type": "is_recording"})
    );
    assert_eq!(
        serde_json::to_value(Request::StartRecording).unwrap(),
        json!({"type": "start_recording"})
    );
    assert_eq!(
        serde_json::to_value(Request::StopRecording).unwrap(),
        json!({"type": "stop_recording"})
    );
    assert_eq!(
        serde_json::to_value(Request::Subscribe).unwrap(),
        json!({"type": "subscribe"})
    );
}

/// WHAT: Response variants deserialize from their tagged wire form
/// WHY: The client must accept exactly what the backend emits
#[test]
#[allow(clippy::unwrap_used)]
fn given_tagged_json_when_deserialized_then_response_variants_match() {
    let recording: Response =
        serde_json::from_value(json!({"type": "recording", "active": true})).unwrap();
    assert_eq!(recording, Response::Recording { active: true });

    let started: Response = serde_json::from_value(json!({"type": "started"})).unwrap();
    assert_eq!(started, Response::Started);

    let error: Response =
        serde_json::from_value(json!({"type": "error", "message": "mic busy"})).unwrap();
    assert_eq!(
        error,
        Response::Error {
            message: "mic busy".to_string()
        }
    );
}

/// WHAT: Pushed segments carry the transcript entry unchanged
/// WHY: Segment delivery is a pass-through contract, no field is rewritten
#[test]
#[allow(clippy::unwrap_used)]
fn given_segment_json_when_deserialized_then_entry_fields_preserved() {
    let segment: Response = serde_json::from_value(json!({
        "type": "segment",
        "entry": {"id": "7", "text": "Hello world", "timestamp": "00:42"}
    }))
    .unwrap();

    assert_eq!(
        segment,
        Response::Segment {
            entry: TranscriptEntry {
                id: "7".to_string(),
                text: "Hello world".to_string(),
                timestamp: "00:42".to_string(),
            }
        }
    );
}
