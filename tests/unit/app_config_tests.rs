/*!
 * Tests for application configuration
 */

use bisrt::app_config::{Config, LogLevel, SubtitleConfig, TranslationProvider};
use bisrt::errors::AppError;
use std::str::FromStr;

use crate::common;

#[test]
fn test_default_config_shouldUseEnglishChineseLayout() {
    let config = Config::default();
    assert_eq!(config.primary_language, "en");
    assert_eq!(config.secondary_language, "zh");
    assert_eq!(config.language, None);
    assert_eq!(config.subtitle.max_chars_primary, 45);
    assert_eq!(config.subtitle.max_chars_secondary, 22);
    assert!((config.subtitle.min_piece_duration - 0.20).abs() < 1e-12);
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() {
    let config: Config = serde_json::from_str(r#"{"subtitle": {"max_chars_primary": 30}}"#).unwrap();
    assert_eq!(config.subtitle.max_chars_primary, 30);
    assert_eq!(config.subtitle.max_chars_secondary, 22);
    assert_eq!(config.translation.model, "qwen2.5:7b");
}

#[test]
fn test_validate_withSameLanguages_shouldFail() {
    let config = Config {
        secondary_language: "eng".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroMaxChars_shouldFail() {
    let config = Config {
        subtitle: SubtitleConfig {
            max_chars_secondary: 0,
            ..SubtitleConfig::default()
        },
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withNonPositiveFloor_shouldFail() {
    for floor in [0.0, -1.0, f64::NAN] {
        let mut config = Config::default();
        config.subtitle.min_piece_duration = floor;
        assert!(config.validate().is_err(), "floor {} accepted", floor);
    }
}

#[test]
fn test_validate_withInvalidOverride_shouldFail() {
    let config = Config {
        language: Some("klingon".to_string()),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withEmptyModel_shouldOnlyFailForOllama() {
    let mut config = Config::default();
    config.translation.model = "  ".to_string();
    assert!(config.validate().is_err());

    config.translation.provider = TranslationProvider::Passthrough;
    assert!(config.validate().is_ok());
}

#[test]
fn test_translation_provider_from_str_shouldAcceptAliases() {
    assert_eq!(TranslationProvider::from_str("Ollama").unwrap(), TranslationProvider::Ollama);
    assert_eq!(TranslationProvider::from_str("none").unwrap(), TranslationProvider::Passthrough);
    assert!(TranslationProvider::from_str("openai").is_err());
}

#[test]
fn test_render_system_prompt_shouldFillPlaceholders() {
    let config = Config::default();
    let prompt = config.translation.render_system_prompt("English", "Chinese");
    assert!(prompt.contains("from English to Chinese"));
    assert!(!prompt.contains('{'));
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(created.subtitle, reloaded.subtitle);
    assert_eq!(reloaded.primary_language, "en");
    Ok(())
}

#[test]
fn test_load_or_create_withBrokenFile_shouldFail() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_validate_withBadValue_shouldReturnConfigError() {
    let mut config = Config::default();
    config.translation.temperature = 1.5;

    match config.validate() {
        Err(AppError::Config(message)) => assert!(message.contains("Temperature")),
        other => panic!("unexpected result: {:?}", other),
    }
}
