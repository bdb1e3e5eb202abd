use anyhow::{Context, Result, anyhow};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::{Config, TranslationProvider};
use crate::assembler::BilingualAssembler;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::progress::{ProgressReporter, Stage};
use crate::providers::Provider;
use crate::subtitle_processor::CueSequence;
use crate::transcript::Transcript;
use crate::translation::{LanguageRoute, OllamaTranslator, PassthroughTranslator, Translator};

// @module: Application controller for bilingual subtitle generation

/// Outcome of processing one transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Subtitles were written to the given path
    Written(PathBuf),
    /// Output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Progress sink for the parent process
    progress: ProgressReporter,

    // @field: Config file in use, never treated as a transcript
    config_path: Option<PathBuf>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, progress: ProgressReporter) -> Self {
        Self {
            config,
            progress,
            config_path: None,
        }
    }

    /// Remember where the configuration was loaded from
    pub fn with_config_path(mut self, config_path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(config_path.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `<stem>.<primary>-<secondary>.srt` next to the transcript
    pub fn default_output_path(&self, transcript_path: &Path) -> PathBuf {
        let output_dir = transcript_path.parent().unwrap_or_else(|| Path::new(""));
        let tag = format!(
            "{}-{}",
            self.config.primary_language, self.config.secondary_language
        );
        FileManager::generate_output_path(transcript_path, output_dir, &tag, "srt")
    }

    /// Resolve the language route for a transcript, honoring the configured override
    pub fn resolve_route(&self, transcript: &Transcript) -> LanguageRoute {
        let detected = self
            .config
            .language
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .or_else(|| transcript.detected_language());

        LanguageRoute::resolve(
            detected,
            &self.config.primary_language,
            &self.config.secondary_language,
        )
    }

    /// Run the workflow for one transcript with the configured backend
    pub async fn run(
        &self,
        transcript_path: PathBuf,
        output_path: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<RunOutcome> {
        let output_path = output_path.unwrap_or_else(|| self.default_output_path(&transcript_path));
        if let Some(outcome) = self.check_existing(&output_path, force_overwrite) {
            return Ok(outcome);
        }

        let transcript = self.load_transcript(&transcript_path)?;
        let route = self.resolve_route(&transcript);

        self.progress
            .emit(Stage::Translate, 45, "Checking translation backend");
        let translator = self.build_translator(&route).await?;

        self.generate(transcript, route, translator, output_path).await
    }

    /// Run the workflow for one transcript with a caller-supplied backend
    pub async fn run_with_translator(
        &self,
        transcript_path: PathBuf,
        output_path: Option<PathBuf>,
        force_overwrite: bool,
        translator: Arc<dyn Translator>,
    ) -> Result<RunOutcome> {
        let output_path = output_path.unwrap_or_else(|| self.default_output_path(&transcript_path));
        if let Some(outcome) = self.check_existing(&output_path, force_overwrite) {
            return Ok(outcome);
        }

        let transcript = self.load_transcript(&transcript_path)?;
        let route = self.resolve_route(&transcript);

        self.progress
            .emit(Stage::Translate, 45, format!("Using {} backend", translator.name()));
        self.generate(transcript, route, translator, output_path).await
    }

    /// Process every transcript below a directory.
    /// Transcripts that already have subtitles are skipped unless forced.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<Vec<RunOutcome>> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let transcripts = self.discover_transcripts(&input_dir)?;
        if transcripts.is_empty() {
            return Err(anyhow!("No transcript files found in directory: {:?}", input_dir));
        }

        info!("Found {} transcript(s) in {:?}", transcripts.len(), input_dir);

        let mut outcomes = Vec::new();
        let mut error_count = 0;

        for transcript_path in transcripts {
            match self.run(transcript_path.clone(), None, force_overwrite).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    error!("Failed to process {:?}: {:#}", transcript_path, e);
                    error_count += 1;
                }
            }
        }

        let written = outcomes
            .iter()
            .filter(|o| matches!(o, RunOutcome::Written(_)))
            .count();
        info!(
            "Folder done in {}: {} written, {} skipped, {} failed",
            Self::format_duration(start_time.elapsed()),
            written,
            outcomes.len() - written,
            error_count
        );

        if error_count > 0 {
            return Err(anyhow!("{} transcript(s) failed", error_count));
        }

        Ok(outcomes)
    }

    /// JSON files below `input_dir` that parse as transcripts, minus the config file
    fn discover_transcripts(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut transcripts = Vec::new();

        for path in FileManager::find_files(input_dir, "json")? {
            if self
                .config_path
                .as_ref()
                .is_some_and(|config_path| FileManager::same_file(config_path, &path))
            {
                debug!("Skipping config file {:?}", path);
                continue;
            }

            match FileManager::read_to_string(&path).and_then(|content| Transcript::from_json_str(&content)) {
                Ok(_) => transcripts.push(path),
                Err(e) => warn!("Skipping {:?}, not a transcript: {:#}", path, e),
            }
        }

        Ok(transcripts)
    }

    fn check_existing(&self, output_path: &Path, force_overwrite: bool) -> Option<RunOutcome> {
        if FileManager::file_exists(output_path) && !force_overwrite {
            warn!(
                "Skipping {:?}, subtitles already exist (use -f to force overwrite)",
                output_path
            );
            return Some(RunOutcome::Skipped(output_path.to_path_buf()));
        }
        None
    }

    fn load_transcript(&self, transcript_path: &Path) -> Result<Transcript> {
        self.progress.emit(Stage::Load, 5, "Loading transcript");
        let transcript = Transcript::load(transcript_path)?;
        info!(
            "Loaded {} segment(s) from {:?}",
            transcript.segments.len(),
            transcript_path
        );
        Ok(transcript)
    }

    async fn build_translator(&self, route: &LanguageRoute) -> Result<Arc<dyn Translator>> {
        match self.config.translation.provider {
            TranslationProvider::Passthrough => Ok(Arc::new(PassthroughTranslator)),
            TranslationProvider::Ollama => {
                let source_name = Self::language_name(&route.source_language);
                let target_name = Self::language_name(&route.target_language);

                let translator = OllamaTranslator::from_config(
                    &self.config.translation,
                    tokio::runtime::Handle::current(),
                    &source_name,
                    &target_name,
                );

                translator
                    .provider()
                    .test_connection()
                    .await
                    .map_err(|e| AppError::Translation(e.into()))
                    .with_context(|| {
                        format!(
                            "Ollama is not reachable at {}",
                            self.config.translation.endpoint
                        )
                    })?;

                Ok(Arc::new(translator))
            }
        }
    }

    async fn generate(
        &self,
        transcript: Transcript,
        route: LanguageRoute,
        translator: Arc<dyn Translator>,
        output_path: PathBuf,
    ) -> Result<RunOutcome> {
        let start_time = Instant::now();
        let max_chars = route.max_chars(&self.config.subtitle);
        let assembler = BilingualAssembler::with_min_piece_duration(self.config.subtitle.min_piece_duration);
        let segments = transcript.segments;

        self.progress.emit(Stage::Srt, 60, "Generating bilingual subtitles");
        debug!(
            "Assembling {} segment(s) with max {} chars per chunk",
            segments.len(),
            max_chars
        );

        let cues: CueSequence = tokio::task::spawn_blocking(move || {
            assembler.assemble(&segments, route.pair_fn(translator.as_ref()), max_chars)
        })
        .await
        .context("Subtitle assembly task failed")?
        .map_err(AppError::from)?;

        cues.write_to_srt(&output_path)?;
        self.progress.emit(Stage::Srt, 80, "Subtitle file written");

        info!(
            "Wrote {} cue(s) to {:?} in {}",
            cues.len(),
            output_path,
            Self::format_duration(start_time.elapsed())
        );
        self.progress.emit(Stage::Srt, 84, "Subtitles ready");

        Ok(RunOutcome::Written(output_path))
    }

    fn language_name(code: &str) -> String {
        language_utils::get_language_name(code).unwrap_or_else(|_| code.to_string())
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
