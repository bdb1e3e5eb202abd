/*!
 * Validation for generated subtitle files.
 *
 * - `timecodes`: time range validity, minimum/maximum duration, overlaps
 *   and cue numbering
 */

pub mod timecodes;

pub use timecodes::{TimecodeIssue, TimecodeValidator, TimecodeValidatorConfig, TimecodeValidationResult};
