/*!
 * Tests for cue formatting and bilingual SRT reading/writing
 */

use anyhow::Result;
use bisrt::subtitle_processor::{Cue, CueSequence, format_cue, format_timestamp};

use crate::common;

#[test]
fn test_format_timestamp_withExamples_shouldMatchSrtLayout() {
    assert_eq!(format_timestamp(0.0), "00:00:00,000");
    assert_eq!(format_timestamp(1.5), "00:00:01,500");
    assert_eq!(format_timestamp(3661.007), "01:01:01,007");
    assert_eq!(format_timestamp(-3.0), "00:00:00,000");
}

#[test]
fn test_format_timestamp_withLongDurations_shouldNotWrapHours() {
    assert_eq!(format_timestamp(100.0 * 3600.0), "100:00:00,000");
}

#[test]
fn test_format_timestamp_withSubMillisecond_shouldRound() {
    assert_eq!(format_timestamp(0.0005), "00:00:00,001");
    assert_eq!(format_timestamp(0.0004), "00:00:00,000");
    assert_eq!(format_timestamp(59.9999), "00:01:00,000");
}

#[test]
fn test_format_cue_shouldProduceFiveLines() {
    let lines = format_cue(3, 1.0, 2.25, "Hello", "你好");
    assert_eq!(
        lines,
        vec!["3", "00:00:01,000 --> 00:00:02,250", "Hello", "你好", ""]
    );
}

#[test]
fn test_format_cue_withEmptySecondLine_shouldKeepPlaceholder() {
    let lines = format_cue(1, 0.0, 1.0, "Hello", "");
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3], "");
}

#[test]
fn test_cue_sequence_to_srt_shouldJoinCuesWithBlankLines() {
    let mut cues = CueSequence::new();
    cues.push_next(0.0, 1.0, "Hi".to_string(), "嗨".to_string());
    cues.push_next(1.0, 2.0, "Bye".to_string(), "再见".to_string());

    assert_eq!(
        cues.to_srt(),
        "1\n00:00:00,000 --> 00:00:01,000\nHi\n嗨\n\n2\n00:00:01,000 --> 00:00:02,000\nBye\n再见\n\n"
    );
}

#[test]
fn test_write_and_read_srt_shouldPreserveCues() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("nested").join("out.srt");

    let mut cues = CueSequence::new();
    cues.push_next(0.0, 1.5, "Hello world".to_string(), "你好世界".to_string());
    cues.push_next(1.5, 3.0, "No translation".to_string(), String::new());
    cues.write_to_srt(&path)?;

    let bytes = std::fs::read(&path)?;
    assert!(!bytes.starts_with(&[0xEF, 0xBB, 0xBF]));

    let read = CueSequence::read_from_srt(&path)?;
    assert_eq!(read, cues);
    assert!((read.total_duration() - 3.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_parse_srt_string_withBomAndCrlf_shouldParse() -> Result<()> {
    let content = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n你好\r\n\r\n";
    let cues = CueSequence::parse_srt_string(content)?;
    assert_eq!(cues.len(), 1);
    assert_eq!(cues.cues()[0], Cue::new(1, 1.0, 2.0, "Hello", "你好"));
    Ok(())
}

#[test]
fn test_parse_srt_string_withBadTimestamp_shouldFail() {
    let content = "1\n00:00:01.000 --> 00:00:02,000\nHello\n你好\n";
    assert!(CueSequence::parse_srt_string(content).is_err());
}

#[test]
fn test_parse_srt_string_withMissingIndex_shouldFail() {
    let content = "00:00:01,000 --> 00:00:02,000\nHello\n你好\n";
    assert!(CueSequence::parse_srt_string(content).is_err());
}

#[test]
fn test_cue_display_shouldMatchFormatCueLines() {
    let cue = Cue::new(7, 61.25, 62.5, "Top line", "底行");
    let expected: String = format_cue(7, 61.25, 62.5, "Top line", "底行")
        .iter()
        .map(|line| format!("{}\n", line))
        .collect();

    assert_eq!(cue.to_string(), expected);
    assert_eq!(cue.lines().len(), 5);
}
