//! The record/stop affordance label.

use crate::SessionStatus;

use std::fmt;

/// Glyph shown while idle.
const IDLE_GLYPH: &str = "\u{25cb}"; // ○

/// Level meter glyphs, quiet to loud.
const BAR_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Bar height, in pixels, that maps to the tallest glyph.
const MAX_BAR_HEIGHT_PX: u8 = 32;

/// Pre-computed display heights for the recording level meter.
///
/// Supplied by an external collaborator at its own cadence; consumed
/// read-only. An empty snapshot renders as no bars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmplitudeSnapshot {
    heights: Vec<u8>,
}

impl AmplitudeSnapshot {
    /// Wrap a sequence of bar heights in pixels.
    pub fn new(heights: Vec<u8>) -> Self {
        Self { heights }
    }

    /// The ordered bar heights.
    pub fn heights(&self) -> &[u8] {
        &self.heights
    }
}

/// What the affordance shows for a given session state.
///
/// A pure function of [`SessionStatus`] and the amplitude snapshot: the
/// idle glyph, a level meter while recording, or the countdown as `"{n}s"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AffordanceLabel {
    /// Idle glyph.
    Idle,
    /// Level meter string, one glyph per bar.
    Level(String),
    /// Countdown seconds remaining.
    Countdown(u8),
}

impl AffordanceLabel {
    /// Label for `status`, consuming `snapshot` when recording.
    pub fn for_status(status: &SessionStatus, snapshot: &AmplitudeSnapshot) -> Self {
        match status {
            SessionStatus::Idle => AffordanceLabel::Idle,
            SessionStatus::Recording { .. } => {
                let bars = snapshot.heights().iter().map(|&h| bar_glyph(h)).collect();
                AffordanceLabel::Level(bars)
            }
            SessionStatus::StoppingCountdown {
                seconds_remaining, ..
            } => AffordanceLabel::Countdown(*seconds_remaining),
        }
    }
}

impl fmt::Display for AffordanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AffordanceLabel::Idle => f.write_str(IDLE_GLYPH),
            AffordanceLabel::Level(bars) => f.write_str(bars),
            AffordanceLabel::Countdown(seconds) => write!(f, "{}s", seconds),
        }
    }
}

fn bar_glyph(height_px: u8) -> char {
    let clamped = height_px.min(MAX_BAR_HEIGHT_PX) as usize;
    let index = clamped * (BAR_GLYPHS.len() - 1) / MAX_BAR_HEIGHT_PX as usize;
    BAR_GLYPHS[index]
}
