use std::time::Instant;

use uuid::Uuid;

/// Recording session state owned by the controller.
///
/// Transitions are strictly sequential: `Idle → Recording →
/// StoppingCountdown → Idle`, plus the countdown-cancel edge back to
/// `Recording`. No state is reachable from a non-adjacent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Not currently recording.
    Idle,
    /// Currently recording audio.
    Recording {
        /// When recording started.
        started_at: Instant,
        /// Unique session ID for log correlation.
        session_id: Uuid,
    },
    /// Stop actuated; counting down before the stop command is issued.
    StoppingCountdown {
        /// Seconds until the stop command is issued.
        seconds_remaining: u8,
        /// When recording started.
        started_at: Instant,
        /// Unique session ID for log correlation.
        session_id: Uuid,
    },
}
