//! Live transcript display with stick-to-bottom autoscroll.

use tracing::debug;
use voxnote_core::TranscriptEntry;

/// Pixel height of one transcript row in the console viewport.
const ROW_HEIGHT_PX: u32 = 16;

/// Scrollable container handle the transcript view renders into.
pub trait Viewport {
    /// Replace the rendered lines with `lines`.
    fn replace_content(&mut self, lines: &[String]);

    /// Total content extent after the last render, in pixels.
    fn content_extent(&self) -> u32;

    /// Set the viewport scroll offset, in pixels.
    fn scroll_to(&mut self, offset: u32);

    /// Current viewport scroll offset, in pixels.
    fn scroll_offset(&self) -> u32;
}

/// Renders a caller-owned sequence of transcript entries and keeps the
/// viewport pinned to the newest one.
///
/// The caller owns accumulation: each render receives the whole sequence,
/// replacing the previous one. Order is preserved and nothing is
/// deduplicated. After any render caused by a change in the sequence, the
/// scroll offset is set to the content extent, exactly once per change and
/// unconditionally, as a post-render step.
pub struct TranscriptView<V: Viewport> {
    viewport: V,
    rendered: Vec<String>,
}

impl<V: Viewport> TranscriptView<V> {
    /// Create a view rendering into `viewport`.
    pub fn new(viewport: V) -> Self {
        Self {
            viewport,
            rendered: Vec::new(),
        }
    }

    /// Render `entries`, then pin the viewport to the bottom.
    ///
    /// A sequence equal to the last rendered one is a no-op: the autoscroll
    /// fires once per content change, not once per call.
    pub fn render(&mut self, entries: &[TranscriptEntry]) {
        let lines: Vec<String> = entries
            .iter()
            .map(|entry| format!("[{}] {}", entry.timestamp, entry.text))
            .collect();

        if lines == self.rendered {
            return;
        }

        self.viewport.replace_content(&lines);
        self.rendered = lines;

        // Post-render: measure, then pin to the bottom.
        let extent = self.viewport.content_extent();
        self.viewport.scroll_to(extent);

        debug!(entries = entries.len(), extent, "Transcript rendered");
    }

    /// The underlying viewport.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }
}

/// Console-backed [`Viewport`]: prints newly appended lines, models extent
/// as rows times row height.
#[derive(Default)]
pub struct ConsoleViewport {
    lines: Vec<String>,
    offset: u32,
}

impl Viewport for ConsoleViewport {
    fn replace_content(&mut self, lines: &[String]) {
        // The common case is append-only growth; only print what is new.
        for line in lines.iter().skip(self.lines.len()) {
            println!("{}", line);
        }
        self.lines = lines.to_vec();
    }

    fn content_extent(&self) -> u32 {
        self.lines.len() as u32 * ROW_HEIGHT_PX
    }

    fn scroll_to(&mut self, offset: u32) {
        self.offset = offset.min(self.content_extent());
    }

    fn scroll_offset(&self) -> u32 {
        self.offset
    }
}
