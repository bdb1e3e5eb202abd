/*!
 * Text segmentation for single-line subtitle cues.
 *
 * - `normalizer`: collapses whitespace and line breaks into one clean line
 * - `splitter`: cuts a line into chunks that fit a character budget
 * - `timing`: hands each chunk a slice of its parent segment's time range
 *
 * Everything here is pure and synchronous.
 */

pub mod normalizer;
pub mod splitter;
pub mod timing;

pub use normalizer::normalize;
pub use splitter::{SplitStrategy, split, split_with_strategies};
pub use timing::{DEFAULT_MIN_PIECE_DURATION, TimeWindow, TimedChunk, allocate, pair_chunks};
