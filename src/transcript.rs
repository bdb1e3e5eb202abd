/*!
 * Transcript input produced by the speech-recognition step.
 *
 * The recognizer runs outside this crate and hands over a JSON document,
 * either `{"language": "en", "segments": [...]}` or a bare segment array.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// A time-stamped span of recognized speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSegment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds; not guaranteed to be after `start`
    pub end: f64,

    /// Recognized text, possibly multi-line or blank
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

impl TimedSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Recognizer output for one media file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Language detected by the recognizer (e.g. "en", "zh")
    #[serde(default)]
    pub language: Option<String>,

    /// Segments in playback order
    pub segments: Vec<TimedSegment>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptDocument {
    Full(Transcript),
    Bare(Vec<TimedSegment>),
}

impl Transcript {
    pub fn new(language: Option<String>, segments: Vec<TimedSegment>) -> Self {
        Self { language, segments }
    }

    /// Parse a transcript from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: TranscriptDocument = serde_json::from_str(content)
            .context("Transcript is neither a transcript object nor a segment array")?;

        Ok(match document {
            TranscriptDocument::Full(transcript) => transcript,
            TranscriptDocument::Bare(segments) => Transcript::new(None, segments),
        })
    }

    /// Load a transcript JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse transcript: {}", path.display()))
    }

    /// Detected language, if the recognizer reported a usable one
    pub fn detected_language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
