/*!
 * Timecode validation for cue sequences.
 *
 * This module validates that cues are:
 * - Logically consistent (start < end)
 * - Long enough to be read and not absurdly long
 * - Non-overlapping with their neighbours
 * - Numbered 1, 2, 3, ... in file order
 *
 * Times are compared in whole milliseconds, as they appear on disk.
 */

use log::debug;

use crate::subtitle_processor::{Cue, CueSequence};

/// Minimum duration for a cue in milliseconds (the allocator's floor)
const MIN_CUE_DURATION_MS: u64 = 200;

/// Maximum duration for a single cue in milliseconds (30 seconds)
const MAX_CUE_DURATION_MS: u64 = 30_000;

/// Result of timecode validation for a single cue
#[derive(Debug, Clone)]
pub struct TimecodeEntryResult {
    /// Index of the cue
    pub index: usize,
    /// Whether the cue passed validation
    pub passed: bool,
    /// Issues found
    pub issues: Vec<TimecodeIssue>,
}

impl TimecodeEntryResult {
    /// Create a passing result
    pub fn passed(index: usize) -> Self {
        Self {
            index,
            passed: true,
            issues: vec![],
        }
    }

    /// Create a failing result
    pub fn failed(index: usize, issues: Vec<TimecodeIssue>) -> Self {
        Self {
            index,
            passed: false,
            issues,
        }
    }
}

/// Types of timecode issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// Start time is not before end time
    InvalidTimeRange { start_ms: u64, end_ms: u64 },
    /// Duration is too short
    DurationTooShort { duration_ms: u64, min_duration_ms: u64 },
    /// Duration is too long
    DurationTooLong { duration_ms: u64, max_duration_ms: u64 },
    /// Overlaps with the previous cue
    OverlapsWithCue { other_index: usize, overlap_ms: u64 },
    /// Cue index does not follow its predecessor
    UnexpectedIndex { expected: usize, found: usize },
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecodeIssue::InvalidTimeRange { start_ms, end_ms } => {
                write!(f, "Invalid time range: start {}ms >= end {}ms", start_ms, end_ms)
            }
            TimecodeIssue::DurationTooShort { duration_ms, min_duration_ms } => {
                write!(f, "Duration too short: {}ms (min: {}ms)", duration_ms, min_duration_ms)
            }
            TimecodeIssue::DurationTooLong { duration_ms, max_duration_ms } => {
                write!(f, "Duration too long: {}ms (max: {}ms)", duration_ms, max_duration_ms)
            }
            TimecodeIssue::OverlapsWithCue { other_index, overlap_ms } => {
                write!(f, "Overlaps with cue {} by {}ms", other_index, overlap_ms)
            }
            TimecodeIssue::UnexpectedIndex { expected, found } => {
                write!(f, "Expected cue number {}, found {}", expected, found)
            }
        }
    }
}

/// Result of validating all timecodes in a sequence
#[derive(Debug, Clone)]
pub struct TimecodeValidationResult {
    /// Overall pass/fail status
    pub passed: bool,
    /// Results for each cue
    pub entry_results: Vec<TimecodeEntryResult>,
    /// Total number of issues
    pub total_issues: usize,
    /// Number of overlapping cues
    pub overlap_count: usize,
}

impl TimecodeValidationResult {
    /// Get all failed cues
    pub fn failed_entries(&self) -> Vec<&TimecodeEntryResult> {
        self.entry_results.iter().filter(|r| !r.passed).collect()
    }
}

/// Configuration for timecode validation
#[derive(Debug, Clone)]
pub struct TimecodeValidatorConfig {
    /// Minimum cue duration in ms
    pub min_duration_ms: u64,
    /// Maximum cue duration in ms
    pub max_duration_ms: u64,
    /// Whether to check for overlaps
    pub check_overlaps: bool,
}

impl Default for TimecodeValidatorConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: MIN_CUE_DURATION_MS,
            max_duration_ms: MAX_CUE_DURATION_MS,
            check_overlaps: true,
        }
    }
}

/// Timecode validator for cue sequences
pub struct TimecodeValidator {
    config: TimecodeValidatorConfig,
}

impl TimecodeValidator {
    /// Create a new validator with default configuration
    pub fn new() -> Self {
        Self {
            config: TimecodeValidatorConfig::default(),
        }
    }

    /// Create a new validator with custom configuration
    pub fn with_config(config: TimecodeValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a single cue
    pub fn validate_cue(&self, cue: &Cue) -> TimecodeEntryResult {
        let (start_ms, end_ms) = cue.time_range_ms();

        if end_ms <= start_ms {
            return TimecodeEntryResult::failed(
                cue.index,
                vec![TimecodeIssue::InvalidTimeRange { start_ms, end_ms }],
            );
        }

        let duration_ms = end_ms - start_ms;
        let mut issues = Vec::new();

        if duration_ms < self.config.min_duration_ms {
            issues.push(TimecodeIssue::DurationTooShort {
                duration_ms,
                min_duration_ms: self.config.min_duration_ms,
            });
        }

        if duration_ms > self.config.max_duration_ms {
            issues.push(TimecodeIssue::DurationTooLong {
                duration_ms,
                max_duration_ms: self.config.max_duration_ms,
            });
        }

        if issues.is_empty() {
            TimecodeEntryResult::passed(cue.index)
        } else {
            TimecodeEntryResult::failed(cue.index, issues)
        }
    }

    /// Validate a whole cue sequence in file order
    pub fn validate_sequence(&self, cues: &CueSequence) -> TimecodeValidationResult {
        let mut entry_results: Vec<TimecodeEntryResult> =
            cues.iter().map(|cue| self.validate_cue(cue)).collect();
        let mut overlap_count = 0;

        for (position, cue) in cues.iter().enumerate() {
            let expected = position + 1;
            if cue.index != expected {
                let result = &mut entry_results[position];
                result.issues.push(TimecodeIssue::UnexpectedIndex {
                    expected,
                    found: cue.index,
                });
                result.passed = false;
            }
        }

        if self.config.check_overlaps {
            for (position, pair) in cues.cues().windows(2).enumerate() {
                let (_, previous_end) = pair[0].time_range_ms();
                let (next_start, _) = pair[1].time_range_ms();

                if previous_end > next_start {
                    overlap_count += 1;
                    let result = &mut entry_results[position + 1];
                    result.issues.push(TimecodeIssue::OverlapsWithCue {
                        other_index: pair[0].index,
                        overlap_ms: previous_end - next_start,
                    });
                    result.passed = false;
                }
            }
        }

        let total_issues: usize = entry_results.iter().map(|r| r.issues.len()).sum();
        let passed = entry_results.iter().all(|r| r.passed);

        debug!(
            "Timecode validation: {} cues, {} issues, {} overlaps",
            cues.len(),
            total_issues,
            overlap_count
        );

        TimecodeValidationResult {
            passed,
            entry_results,
            total_issues,
            overlap_count,
        }
    }
}

impl Default for TimecodeValidator {
    fn default() -> Self {
        Self::new()
    }
}
