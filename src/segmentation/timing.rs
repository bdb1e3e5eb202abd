/*!
 * Proportional time allocation for split segments.
 *
 * A segment cut into N chunks gets N equal, contiguous windows. Each window
 * is at least `min_piece_duration` long, so a degenerate or inverted parent
 * interval still yields displayable cues. The last window is stretched to
 * reach the parent's end.
 */

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::SegmentationError;
use crate::transcript::TimedSegment;

/// Shortest window handed to a chunk, in seconds
pub const DEFAULT_MIN_PIECE_DURATION: f64 = 0.20;

/// A `[start, end)` interval in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the window in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A chunk of text together with the window it is shown in
#[derive(Debug, Clone, PartialEq)]
pub struct TimedChunk {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Divide `[start, end]` into `chunk_count` equal windows.
///
/// The divided duration is `max(end - start, min_piece_duration * chunk_count)`
/// and every window has the same length, never below `min_piece_duration`.
/// Only the last window's end is widened to `max(computed_end, end)`.
/// Negative starts pass through untouched; clamping happens at formatting.
pub fn allocate(
    start: f64,
    end: f64,
    chunk_count: usize,
    min_piece_duration: f64,
) -> Result<Vec<TimeWindow>, SegmentationError> {
    if chunk_count == 0 {
        return Err(SegmentationError::ZeroChunkCount);
    }

    let count = chunk_count as f64;
    let duration = (end - start).max(min_piece_duration * count);
    let piece = (duration / count).max(min_piece_duration);

    if end <= start {
        warn!(
            "Degenerate segment timing {:.3}s -> {:.3}s, using {:.3}s per chunk",
            start, end, piece
        );
    }

    let windows = (0..chunk_count)
        .map(|i| {
            let window_start = start + i as f64 * piece;
            let mut window_end = start + (i + 1) as f64 * piece;
            if i == chunk_count - 1 {
                window_end = window_end.max(end);
            }
            TimeWindow::new(window_start, window_end)
        })
        .collect();

    Ok(windows)
}

/// Pair each chunk of `segment` with its allocated window.
/// An empty chunk list yields no timed chunks.
pub fn pair_chunks(
    segment: &TimedSegment,
    chunks: Vec<String>,
    min_piece_duration: f64,
) -> Result<Vec<TimedChunk>, SegmentationError> {
    if chunks.is_empty() {
        return Ok(Vec::new());
    }

    let windows = allocate(segment.start, segment.end, chunks.len(), min_piece_duration)?;
    Ok(chunks
        .into_iter()
        .zip(windows)
        .map(|(text, window)| TimedChunk {
            start: window.start,
            end: window.end,
            text,
        })
        .collect())
}
