/*!
 * Application configuration: loading, validating and saving `conf.json`.
 */

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::language_utils;
use crate::segmentation::DEFAULT_MIN_PIECE_DURATION;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language shown on the top line of every cue (ISO)
    #[serde(default = "default_primary_language")]
    pub primary_language: String,

    /// Language shown on the bottom line of every cue (ISO)
    #[serde(default = "default_secondary_language")]
    pub secondary_language: String,

    /// Spoken language override; when unset the transcript's detected
    /// language is used
    #[serde(default)]
    pub language: Option<String>,

    /// Cue layout settings
    #[serde(default)]
    pub subtitle: SubtitleConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: Identity translation (no backend)
    Passthrough,
}

impl TranslationProvider {
    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::Passthrough => "passthrough".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "passthrough" | "none" => Ok(Self::Passthrough),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Cue layout configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubtitleConfig {
    /// Character budget per chunk when the speech is in the primary language
    #[serde(default = "default_max_chars_primary")]
    pub max_chars_primary: usize,

    /// Character budget per chunk when the speech is in the secondary language
    #[serde(default = "default_max_chars_secondary")]
    pub max_chars_secondary: usize,

    /// Shortest time window a chunk may get, in seconds
    #[serde(default = "default_min_piece_duration")]
    pub min_piece_duration: f64,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            max_chars_primary: default_max_chars_primary(),
            max_chars_secondary: default_max_chars_secondary(),
            min_piece_duration: default_min_piece_duration(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Model name (e.g., "qwen2.5:7b")
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// Service endpoint URL
    #[serde(default = "default_ollama_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic, higher values more creative
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// System prompt template for translation
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            model: default_ollama_model(),
            endpoint: default_ollama_endpoint(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl TranslationConfig {
    /// Fill the prompt template for a language pair
    pub fn render_system_prompt(&self, source_language: &str, target_language: &str) -> String {
        self.system_prompt
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_primary_language() -> String {
    "en".to_string()
}

fn default_secondary_language() -> String {
    "zh".to_string()
}

fn default_max_chars_primary() -> usize {
    45
}

fn default_max_chars_secondary() -> usize {
    22
}

fn default_min_piece_duration() -> f64 {
    DEFAULT_MIN_PIECE_DURATION
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // doubled on each retry
}

fn default_temperature() -> f32 {
    0.1
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "qwen2.5:7b".to_string()
}

fn default_system_prompt() -> String {
    "You are a subtitle translator. Translate the user's text from {source_language} to {target_language}. Reply with the translation only, on a single line, without quotes or explanations.".to_string()
}

impl Config {
    /// Load the configuration, writing a default file first when none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            return serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()));
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> std::result::Result<(), AppError> {
        let invalid = |message: String| Err(AppError::Config(message));

        for code in [&self.primary_language, &self.secondary_language] {
            if let Err(e) = language_utils::get_language_name(code) {
                return invalid(e.to_string());
            }
        }

        if language_utils::language_codes_match(&self.primary_language, &self.secondary_language) {
            return invalid(format!(
                "Primary and secondary languages must differ (both are {})",
                self.primary_language
            ));
        }

        if let Some(language) = &self.language {
            if let Err(e) = language_utils::validate_language_code(language) {
                return invalid(e.to_string());
            }
        }

        if self.subtitle.max_chars_primary == 0 || self.subtitle.max_chars_secondary == 0 {
            return invalid("Maximum characters per cue line must be positive".to_string());
        }

        let floor = self.subtitle.min_piece_duration;
        if !floor.is_finite() || floor <= 0.0 {
            return invalid(format!(
                "Minimum piece duration must be a positive number of seconds, got {}",
                floor
            ));
        }

        if !(0.0..=1.0).contains(&self.translation.temperature) {
            return invalid(format!(
                "Temperature must be between 0.0 and 1.0, got {}",
                self.translation.temperature
            ));
        }

        if self.translation.provider == TranslationProvider::Ollama && self.translation.model.trim().is_empty() {
            return invalid("A model name is required for the Ollama provider".to_string());
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            primary_language: default_primary_language(),
            secondary_language: default_secondary_language(),
            language: None,
            subtitle: SubtitleConfig::default(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
