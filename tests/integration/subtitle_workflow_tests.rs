/*!
 * End-to-end tests: transcript JSON in, bilingual SRT out
 */

use anyhow::Result;
use std::sync::Arc;

use bisrt::app_config::{Config, TranslationProvider};
use bisrt::app_controller::{Controller, RunOutcome};
use bisrt::progress::ProgressReporter;
use bisrt::providers::mock::MockTranslator;
use bisrt::subtitle_processor::CueSequence;
use bisrt::validation::TimecodeValidator;

use crate::common::{self, SharedBuffer};

fn passthrough_config() -> Config {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Passthrough;
    config
}

#[tokio::test]
async fn test_run_withMockTranslator_shouldWriteBilingualSrt() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let transcript = common::create_english_transcript(dir.path(), "talk.json")?;
    let translator = MockTranslator::working().with_tag("[zh]");
    let controller = Controller::with_config(Config::default(), ProgressReporter::disabled());

    let outcome = controller
        .run_with_translator(transcript, None, false, Arc::new(translator.clone()))
        .await?;

    let output = dir.path().join("talk.en-zh.srt");
    assert_eq!(outcome, RunOutcome::Written(output.clone()));
    assert_eq!(
        std::fs::read_to_string(&output)?,
        "1\n00:00:00,000 --> 00:00:02,000\nHello world\n[zh] Hello world\n\n\
         2\n00:00:03,000 --> 00:00:06,000\nHello, world. This is a test.\n[zh] Hello, world. This is a test.\n\n"
    );
    assert_eq!(translator.calls(), vec!["Hello world", "Hello, world. This is a test."]);
    Ok(())
}

#[tokio::test]
async fn test_run_withChineseTranscript_shouldUseSecondaryBudgetAndOrder() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let transcript = common::create_test_file(
        dir.path(),
        "zh.json",
        r#"{"language": "zh", "segments": [{"start": 0.0, "end": 4.0, "text": "你好，世界。今天天气很好！"}]}"#,
    )?;

    let mut config = Config::default();
    config.subtitle.max_chars_secondary = 7;
    let controller = Controller::with_config(config, ProgressReporter::disabled());
    let output = dir.path().join("out").join("zh.srt");

    controller
        .run_with_translator(
            transcript,
            Some(output.clone()),
            false,
            Arc::new(MockTranslator::working().with_tag("[en]")),
        )
        .await?;

    let cues = CueSequence::read_from_srt(&output)?;
    assert_eq!(cues.len(), 2);
    assert_eq!(cues.cues()[0].line1, "[en] 你好，世界。");
    assert_eq!(cues.cues()[0].line2, "你好，世界。");
    assert_eq!(cues.cues()[1].line2, "今天天气很好！");
    assert!(TimecodeValidator::new().validate_sequence(&cues).passed);
    Ok(())
}

#[tokio::test]
async fn test_run_withFailingTranslator_shouldNotWriteOutput() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let transcript = common::create_english_transcript(dir.path(), "talk.json")?;
    let translator = MockTranslator::fail_on_call(2);
    let controller = Controller::with_config(Config::default(), ProgressReporter::disabled());

    let result = controller
        .run_with_translator(transcript, None, false, Arc::new(translator.clone()))
        .await;

    assert!(result.is_err());
    assert!(!dir.path().join("talk.en-zh.srt").exists());
    assert_eq!(translator.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let transcript = common::create_english_transcript(dir.path(), "talk.json")?;
    let existing = common::create_test_file(dir.path(), "talk.en-zh.srt", "keep me")?;
    let controller = Controller::with_config(passthrough_config(), ProgressReporter::disabled());

    let skipped = controller.run(transcript.clone(), None, false).await?;
    assert_eq!(skipped, RunOutcome::Skipped(existing.clone()));
    assert_eq!(std::fs::read_to_string(&existing)?, "keep me");

    let written = controller.run(transcript, None, true).await?;
    assert_eq!(written, RunOutcome::Written(existing.clone()));
    assert!(std::fs::read_to_string(&existing)?.starts_with("1\n00:00:00,000 --> 00:00:02,000\nHello world\nHello world\n"));
    Ok(())
}

#[tokio::test]
async fn test_run_shouldReportProgressStages() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let transcript = common::create_chinese_transcript(dir.path(), "bare.json")?;
    let buffer = SharedBuffer::default();
    let controller = Controller::with_config(passthrough_config(), ProgressReporter::with_writer(buffer.clone()));

    controller.run(transcript, None, false).await?;

    let progress: Vec<(String, u8)> = buffer
        .events()
        .into_iter()
        .map(|e| (e.stage, e.progress))
        .collect();
    assert_eq!(
        progress,
        vec![
            ("load".to_string(), 5),
            ("translate".to_string(), 45),
            ("srt".to_string(), 60),
            ("srt".to_string(), 80),
            ("srt".to_string(), 84),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_run_folder_shouldProcessEveryTranscript() -> Result<()> {
    let dir = common::create_temp_dir()?;
    common::create_english_transcript(dir.path(), "a.json")?;
    common::create_chinese_transcript(dir.path(), "nested/b.json")?;
    let controller = Controller::with_config(passthrough_config(), ProgressReporter::disabled());

    let outcomes = controller.run_folder(dir.path().to_path_buf(), false).await?;

    assert_eq!(outcomes.len(), 2);
    assert!(dir.path().join("a.en-zh.srt").exists());
    assert!(dir.path().join("nested").join("b.en-zh.srt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withMissingTranscript_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let controller = Controller::with_config(passthrough_config(), ProgressReporter::disabled());
    let result = controller.run(dir.path().join("missing.json"), None, false).await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withConfigFileInside_shouldOnlyProcessTranscripts() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let config_path = dir.path().join("conf.json");
    passthrough_config().save(&config_path)?;
    common::create_english_transcript(dir.path(), "talk.json")?;

    let controller = Controller::with_config(passthrough_config(), ProgressReporter::disabled())
        .with_config_path(&config_path);
    let outcomes = controller.run_folder(dir.path().to_path_buf(), false).await?;

    assert_eq!(outcomes, vec![RunOutcome::Written(dir.path().join("talk.en-zh.srt"))]);
    assert!(!dir.path().join("conf.en-zh.srt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withUnrelatedJson_shouldSkipIt() -> Result<()> {
    let dir = common::create_temp_dir()?;
    common::create_test_file(dir.path(), "package.json", r#"{"name": "site", "version": "1.0.0"}"#)?;
    common::create_chinese_transcript(dir.path(), "bare.json")?;

    let controller = Controller::with_config(passthrough_config(), ProgressReporter::disabled());
    let outcomes = controller.run_folder(dir.path().to_path_buf(), false).await?;

    assert_eq!(outcomes.len(), 1);
    assert!(dir.path().join("bare.en-zh.srt").exists());
    assert!(!dir.path().join("package.en-zh.srt").exists());
    Ok(())
}
