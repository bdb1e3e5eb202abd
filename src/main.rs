// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::PathBuf;

use bisrt::app_config::{self, Config, TranslationProvider};
use bisrt::app_controller::{Controller, RunOutcome};
use bisrt::progress::ProgressReporter;
use bisrt::subtitle_processor::CueSequence;
use bisrt::validation::TimecodeValidator;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Ollama,
    Passthrough,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Passthrough => TranslationProvider::Passthrough,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a bilingual SRT from a transcript (default command)
    Generate(GenerateArgs),

    /// Check the timing of an existing bilingual SRT file
    Check {
        /// SRT file to check
        #[arg(value_name = "SRT_PATH")]
        srt_path: PathBuf,
    },

    /// Generate shell completions for bisrt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Transcript JSON file or directory of transcripts
    #[arg(value_name = "TRANSCRIPT_PATH")]
    transcript_path: Option<PathBuf>,

    /// Output SRT path (single transcript only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Spoken language, overriding the transcript's detected language
    #[arg(long, env = "BISRT_LANGUAGE")]
    language: Option<String>,

    /// Maximum characters per chunk when the speech is in the primary language
    #[arg(long, env = "SRT_MAX_CHARS_EN")]
    max_chars_primary: Option<usize>,

    /// Maximum characters per chunk when the speech is in the secondary language
    #[arg(long, env = "SRT_MAX_CHARS_ZH")]
    max_chars_secondary: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Do not write JSON progress records to stdout
    #[arg(long)]
    quiet_progress: bool,
}

/// bisrt - bilingual subtitles from timed transcripts
#[derive(Parser, Debug)]
#[command(name = "bisrt")]
#[command(version)]
#[command(about = "Bilingual subtitle generator")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "bisrt splits timed transcript segments into short chunks, translates each chunk and writes a two-line bilingual SRT file.

EXAMPLES:
    bisrt talk.json                              # Generate talk.en-zh.srt
    bisrt -f talk.json                           # Force overwrite existing files
    bisrt -p passthrough talk.json               # Skip translation
    bisrt --language zh -o out.srt talk.json     # Force the spoken language
    bisrt /transcripts/                          # Process a whole directory
    bisrt check talk.en-zh.srt                   # Check cue timing
    bisrt completions bash > bisrt.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.

PROGRESS:
    One JSON object per line is written to stdout while generating
    ({\"stage\", \"progress\", \"message\"}). Logs go to stderr.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "bisrt", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check { srt_path }) => run_check(srt_path),
        Some(Commands::Generate(args)) => run_generate(args).await,
        None => run_generate(cli.generate).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn apply_log_level(level: &app_config::LogLevel) {
    log::set_max_level(level.into());
}

fn load_config(options: &GenerateArgs) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }

    if let Some(language) = &options.language {
        config.language = Some(language.clone());
    }

    if let Some(max_chars) = options.max_chars_primary {
        config.subtitle.max_chars_primary = max_chars;
    }

    if let Some(max_chars) = options.max_chars_secondary {
        config.subtitle.max_chars_secondary = max_chars;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()?;
    Ok(config)
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    if let Some(log_level) = &options.log_level {
        apply_log_level(&log_level.clone().into());
    }

    let transcript_path = options
        .transcript_path
        .clone()
        .ok_or_else(|| anyhow!("TRANSCRIPT_PATH is required when no subcommand is specified"))?;

    let config = load_config(&options)?;
    apply_log_level(&config.log_level);

    let progress = if options.quiet_progress {
        ProgressReporter::disabled()
    } else {
        ProgressReporter::stdout()
    };
    let controller = Controller::with_config(config, progress).with_config_path(&options.config_path);

    if transcript_path.is_file() {
        match controller
            .run(transcript_path, options.output, options.force_overwrite)
            .await?
        {
            RunOutcome::Written(path) => info!("Success: {:?}", path),
            RunOutcome::Skipped(path) => info!("Unchanged: {:?}", path),
        }
    } else if transcript_path.is_dir() {
        if options.output.is_some() {
            warn!("--output is ignored for directories; subtitles are written next to each transcript");
        }
        controller
            .run_folder(transcript_path, options.force_overwrite)
            .await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", transcript_path));
    }

    Ok(())
}

fn run_check(srt_path: PathBuf) -> Result<()> {
    let cues = CueSequence::read_from_srt(&srt_path)?;
    let result = TimecodeValidator::new().validate_sequence(&cues);

    for entry in result.failed_entries() {
        for issue in &entry.issues {
            warn!("Cue {}: {}", entry.index, issue);
        }
    }

    info!(
        "{} cue(s), {:.3}s of speech, {} issue(s), {} overlap(s)",
        cues.len(),
        cues.total_duration(),
        result.total_issues,
        result.overlap_count
    );

    if !result.passed {
        return Err(anyhow!("{:?} has {} timing issue(s)", srt_path, result.total_issues));
    }

    Ok(())
}
