use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

// @module: Bilingual cue formatting and SRT serialization

// @const: SRT timestamp line regex, hours may exceed two digits
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2,}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm).
///
/// Negative input is clamped to zero, milliseconds are rounded half away
/// from zero and hours never wrap.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_nan() || seconds < 0.0 { 0.0 } else { seconds };
    let total_ms = (seconds * 1000.0).round() as u64;

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Render one cue as its five SRT lines: index, time range, both text lines
/// and the blank separator.
pub fn format_cue(index: usize, start: f64, end: f64, line1: &str, line2: &str) -> Vec<String> {
    vec![
        index.to_string(),
        format!("{} --> {}", format_timestamp(start), format_timestamp(end)),
        line1.to_string(),
        line2.to_string(),
        String::new(),
    ]
}

// @struct: One bilingual subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: 1-based position in the sequence
    pub index: usize,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Top line (primary language)
    pub line1: String,

    // @field: Bottom line (secondary language)
    pub line2: String,
}

impl Cue {
    pub fn new(index: usize, start: f64, end: f64, line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Cue {
            index,
            start,
            end,
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// The five output lines of this cue
    pub fn lines(&self) -> Vec<String> {
        format_cue(self.index, self.start, self.end, &self.line1, &self.line2)
    }

    /// Start and end rounded to whole milliseconds, as written to disk
    pub fn time_range_ms(&self) -> (u64, u64) {
        let to_ms = |seconds: f64| {
            if seconds.is_nan() || seconds < 0.0 {
                0
            } else {
                (seconds * 1000.0).round() as u64
            }
        };
        (to_ms(self.start), to_ms(self.end))
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Ordered cues of one subtitle file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueSequence {
    cues: Vec<Cue>,
}

impl CueSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cue numbered right after the last one
    pub fn push_next(&mut self, start: f64, end: f64, line1: String, line2: String) -> &Cue {
        let index = self.cues.len() + 1;
        self.cues.push(Cue::new(index, start, end, line1, line2));
        &self.cues[index - 1]
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Sum of cue durations in seconds
    pub fn total_duration(&self) -> f64 {
        self.cues.iter().map(|cue| (cue.end - cue.start).max(0.0)).sum()
    }

    /// Serialize every cue in SRT form
    pub fn to_srt(&self) -> String {
        self.to_string()
    }

    /// Write the cues to an SRT file (UTF-8, no BOM), creating parent
    /// directories as needed
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for cue in &self.cues {
            write!(file, "{}", cue)?;
        }
        file.flush()?;

        debug!("Wrote {} cues to {}", self.cues.len(), path.display());
        Ok(())
    }

    /// Read back a bilingual SRT file
    pub fn read_from_srt<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        Self::parse_srt_string(&content)
    }

    /// Parse bilingual SRT content.
    ///
    /// Every cue is read positionally as index, time range and exactly two
    /// text lines, so an empty bottom line is still a valid cue.
    pub fn parse_srt_string(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = content.lines().enumerate().peekable();
        let mut cues = Vec::new();

        loop {
            // Skip separators between cues
            while lines.peek().is_some_and(|(_, line)| line.trim().is_empty()) {
                lines.next();
            }
            let Some((line_no, index_line)) = lines.next() else {
                break;
            };

            let index: usize = index_line.trim().parse().with_context(|| {
                format!("Expected cue index at line {}: {}", line_no + 1, index_line)
            })?;

            let (time_line_no, time_line) = lines
                .next()
                .ok_or_else(|| anyhow!("Cue {} has no time range", index))?;
            let caps = TIMESTAMP_REGEX.captures(time_line.trim()).ok_or_else(|| {
                anyhow!("Invalid time range at line {}: {}", time_line_no + 1, time_line)
            })?;
            let start = Self::captured_seconds(&caps, 1)?;
            let end = Self::captured_seconds(&caps, 5)?;

            let line1 = lines.next().map(|(_, l)| l.to_string()).unwrap_or_default();
            let line2 = lines.next().map(|(_, l)| l.to_string()).unwrap_or_default();

            if lines.peek().is_some_and(|(_, line)| !line.trim().is_empty()) {
                warn!("Cue {} has more than two text lines; extra lines are ignored", index);
                while lines.peek().is_some_and(|(_, line)| !line.trim().is_empty()) {
                    lines.next();
                }
            }

            cues.push(Cue::new(index, start, end, line1, line2));
        }

        Ok(CueSequence { cues })
    }

    fn captured_seconds(caps: &regex::Captures, start_idx: usize) -> Result<f64> {
        let field = |offset: usize| -> Result<u64> {
            let text = caps.get(start_idx + offset).map_or("0", |m| m.as_str());
            text.parse().with_context(|| format!("Invalid timestamp component: {}", text))
        };
        let (hours, minutes, seconds, millis) = (field(0)?, field(1)?, field(2)?, field(3)?);

        if minutes >= 60 || seconds >= 60 {
            return Err(anyhow!("Invalid time components: {:02}:{:02}", minutes, seconds));
        }

        let total_ms = (hours * 3600 + minutes * 60 + seconds) * 1000 + millis;
        Ok(total_ms as f64 / 1000.0)
    }
}

impl fmt::Display for CueSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for cue in &self.cues {
            write!(f, "{}", cue)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a CueSequence {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}
