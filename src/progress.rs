/*!
 * Machine-readable progress records.
 *
 * One JSON object per line, `{"stage": ..., "progress": ..., "message": ...}`,
 * meant for a parent process reading our stdout. Only the controller emits
 * these; the segmentation core never reports progress.
 */

use log::warn;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Pipeline stage tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading and validating the transcript
    Load,
    /// Preparing the translation backend
    Translate,
    /// Building and writing the subtitle file
    Srt,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Translate => "translate",
            Stage::Srt => "srt",
        }
    }
}

/// A single progress record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: String,
    pub progress: u8,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(stage: Stage, progress: u8, message: impl Into<String>) -> Self {
        Self {
            stage: stage.as_str().to_string(),
            progress: progress.min(100),
            message: message.into(),
        }
    }
}

/// Writes progress records to a sink, flushing after each one
pub struct ProgressReporter {
    sink: Option<Mutex<Box<dyn Write + Send>>>,
}

impl ProgressReporter {
    /// Report to standard output
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Report nowhere
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Some(Mutex::new(Box::new(writer))),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Emit one record. Write failures are logged and otherwise ignored.
    pub fn emit(&self, stage: Stage, progress: u8, message: impl Into<String>) {
        let Some(sink) = &self.sink else {
            return;
        };

        let event = ProgressEvent::new(stage, progress, message);
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize progress record: {}", e);
                return;
            }
        };

        let mut sink = sink.lock();
        if let Err(e) = writeln!(sink, "{}", line).and_then(|_| sink.flush()) {
            warn!("Failed to write progress record: {}", e);
        }
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
