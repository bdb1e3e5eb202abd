/*!
 * Chunk splitting for single-line cues.
 *
 * A line that is too long for one cue is cut by an ordered list of
 * strategies. Each strategy only sees the pieces that are still over budget
 * after the previous one ran, so earlier boundaries always win:
 * punctuation, then word gaps, then fixed-width slices.
 */

use log::debug;

use super::normalizer::normalize;
use crate::errors::SegmentationError;

/// Clause and sentence punctuation, ASCII and CJK full-width.
/// A break mark stays attached to the text that precedes it.
pub const BREAK_PUNCTUATION: &[char] = &[
    ',', '.', '!', '?', ';', ':',
    '，', '。', '！', '？', '；', '：',
];

/// One way of cutting an oversized piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Cut after clause/sentence punctuation and greedily re-pack
    Punctuation,
    /// Cut at single spaces and greedily re-pack
    Word,
    /// Cut into slices of exactly `max_chars` characters
    HardSlice,
}

/// The cascade used by [`split`]
pub const DEFAULT_STRATEGIES: [SplitStrategy; 3] = [
    SplitStrategy::Punctuation,
    SplitStrategy::Word,
    SplitStrategy::HardSlice,
];

impl SplitStrategy {
    /// Cut `piece` into sub-pieces. Results may still exceed `max_chars`
    /// for every strategy except `HardSlice`.
    pub fn apply(&self, piece: &str, max_chars: usize) -> Vec<String> {
        match self {
            Self::Punctuation => pack(piece.split_inclusive(BREAK_PUNCTUATION), max_chars),
            Self::Word => pack(piece.split_inclusive(' '), max_chars),
            Self::HardSlice => hard_slice(piece, max_chars),
        }
    }
}

/// Length in characters, not bytes
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` into display-safe chunks of at most `max_chars` characters.
pub fn split(text: &str, max_chars: usize) -> Result<Vec<String>, SegmentationError> {
    split_with_strategies(text, max_chars, &DEFAULT_STRATEGIES)
}

/// Split `text` running `strategies` in order over every piece still above budget.
pub fn split_with_strategies(
    text: &str,
    max_chars: usize,
    strategies: &[SplitStrategy],
) -> Result<Vec<String>, SegmentationError> {
    if max_chars == 0 {
        return Err(SegmentationError::ZeroMaxChars);
    }

    let line = normalize(text);
    if line.is_empty() {
        return Ok(Vec::new());
    }
    if char_len(&line) <= max_chars {
        return Ok(vec![line]);
    }

    let mut pieces = vec![line];
    for strategy in strategies {
        pieces = pieces
            .into_iter()
            .flat_map(|piece| {
                if char_len(&piece) <= max_chars {
                    vec![piece]
                } else {
                    strategy.apply(&piece, max_chars)
                }
            })
            .collect();
        debug!("{:?} pass left {} piece(s)", strategy, pieces.len());
    }

    pieces.retain(|piece| !piece.is_empty());
    Ok(pieces)
}

/// Greedy accumulation: keep appending units to the buffer while the trimmed
/// result fits, otherwise close the buffer and restart it with the unit.
/// Units carry their own separators so the original spacing survives.
fn pack<'a>(units: impl IntoIterator<Item = &'a str>, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();

    for unit in units {
        let mut candidate = String::with_capacity(buffer.len() + unit.len());
        candidate.push_str(&buffer);
        candidate.push_str(unit);

        if buffer.trim().is_empty() || char_len(candidate.trim()) <= max_chars {
            buffer = candidate;
        } else {
            chunks.push(buffer.trim().to_string());
            buffer = unit.trim_start().to_string();
        }
    }

    let tail = buffer.trim();
    if !tail.is_empty() {
        chunks.push(tail.to_string());
    }
    chunks
}

fn hard_slice(piece: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = piece.chars().collect();
    chars
        .chunks(max_chars)
        .map(|slice| slice.iter().collect::<String>().trim().to_string())
        .filter(|slice| !slice.is_empty())
        .collect()
}
