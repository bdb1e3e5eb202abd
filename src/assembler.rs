/*!
 * Bilingual cue assembly.
 *
 * Turns recognizer segments into a numbered cue sequence: normalize, split,
 * allocate time, ask the translate callback for the two display lines, and
 * number the result. The callback is the only contact with a translation
 * backend. It is called once per non-empty chunk, strictly in output order,
 * and its first error stops the pass and is returned untouched.
 */

use log::debug;

use crate::errors::{AssembleError, SegmentationError};
use crate::segmentation::{DEFAULT_MIN_PIECE_DURATION, normalize, pair_chunks, split};
use crate::subtitle_processor::CueSequence;
use crate::transcript::TimedSegment;

/// Cue assembler with a configurable minimum chunk duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilingualAssembler {
    min_piece_duration: f64,
}

impl Default for BilingualAssembler {
    fn default() -> Self {
        Self {
            min_piece_duration: DEFAULT_MIN_PIECE_DURATION,
        }
    }
}

impl BilingualAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different floor for chunk windows, in seconds
    pub fn with_min_piece_duration(min_piece_duration: f64) -> Self {
        Self { min_piece_duration }
    }

    pub fn min_piece_duration(&self) -> f64 {
        self.min_piece_duration
    }

    /// Build the full cue sequence for `segments`.
    ///
    /// `translate` maps a source chunk to `(top line, bottom line)`.
    pub fn assemble<F, E>(
        &self,
        segments: &[TimedSegment],
        translate: F,
        max_chars: usize,
    ) -> Result<CueSequence, AssembleError<E>>
    where
        F: FnMut(&str) -> Result<(String, String), E>,
    {
        let mut cues = CueSequence::new();
        self.assemble_into(segments, translate, max_chars, &mut cues)?;
        Ok(cues)
    }

    /// Like [`assemble`](Self::assemble), but appends to `cues` so callers
    /// keep whatever was produced before a translate failure.
    pub fn assemble_into<F, E>(
        &self,
        segments: &[TimedSegment],
        mut translate: F,
        max_chars: usize,
        cues: &mut CueSequence,
    ) -> Result<(), AssembleError<E>>
    where
        F: FnMut(&str) -> Result<(String, String), E>,
    {
        if max_chars == 0 {
            return Err(SegmentationError::ZeroMaxChars.into());
        }

        for (segment_no, segment) in segments.iter().enumerate() {
            let source = normalize(&segment.text);
            if source.is_empty() {
                debug!("Segment {} is blank, skipping", segment_no);
                continue;
            }

            let chunks = split(&source, max_chars)?;
            let timed_chunks = pair_chunks(segment, chunks, self.min_piece_duration)?;
            debug!(
                "Segment {} ({:.3}s -> {:.3}s) split into {} chunk(s)",
                segment_no,
                segment.start,
                segment.end,
                timed_chunks.len()
            );

            for chunk in timed_chunks {
                let text = normalize(&chunk.text);
                if text.is_empty() {
                    continue;
                }

                let (line1, line2) = translate(&text).map_err(AssembleError::Translate)?;
                cues.push_next(chunk.start, chunk.end, normalize(&line1), normalize(&line2));
            }
        }

        Ok(())
    }
}

/// Assemble with the default minimum chunk duration
pub fn assemble<F, E>(
    segments: &[TimedSegment],
    translate: F,
    max_chars: usize,
) -> Result<CueSequence, AssembleError<E>>
where
    F: FnMut(&str) -> Result<(String, String), E>,
{
    BilingualAssembler::default().assemble(segments, translate, max_chars)
}
