/*!
 * Common test utilities for the bisrt test suite
 */

use anyhow::Result;
use parking_lot::Mutex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use bisrt::progress::ProgressEvent;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// An English transcript with one long and one blank segment
pub fn create_english_transcript(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"{
  "language": "en",
  "segments": [
    {"start": 0.0, "end": 2.0, "text": "Hello   world"},
    {"start": 2.0, "end": 2.5, "text": "   "},
    {"start": 3.0, "end": 6.0, "text": "Hello, world. This is a test."}
  ]
}"#;
    create_test_file(dir, filename, content)
}

/// A Chinese transcript in the bare segment-array form
pub fn create_chinese_transcript(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"[
  {"start": 0.0, "end": 4.0, "text": "你好，世界。今天天气很好！"}
]"#;
    create_test_file(dir, filename, content)
}

/// In-memory writer that can be inspected after being handed to a reporter
#[derive(Clone, Default)]
pub struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).to_string()
    }

    /// Progress records written so far
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.contents()
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
