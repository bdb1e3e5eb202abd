/*!
 * # bisrt - bilingual subtitle generation
 *
 * Turns timed speech-recognition segments into a bilingual SRT file: every
 * cue carries the same short chunk of speech in two languages, one per line.
 *
 * ## Features
 *
 * - Deterministic segmentation: whitespace normalization, punctuation-first
 *   splitting with word and hard-slice fallbacks, proportional timing
 * - Bilingual cue assembly over any translate callback, fail-fast
 * - Language routing driven by the detected transcript language
 * - Translation through a local Ollama server or a passthrough backend
 * - Timing validation of generated SRT files
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * - `segmentation`: normalizer, chunk splitter and time allocator
 * - `subtitle_processor`: timestamps, cues and SRT reading/writing
 * - `assembler`: the bilingual cue assembler
 * - `transcript`: recognizer output as loaded from JSON
 * - `translation`: the `Translator` capability and language routing
 * - `providers`: clients for LLM servers:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::mock`: scripted backends for tests
 * - `validation`: timing checks for generated subtitles
 * - `progress`: JSONL progress records for a parent process
 * - `app_config`, `app_controller`, `file_utils`, `language_utils`, `errors`
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod assembler;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod progress;
pub mod providers;
pub mod segmentation;
pub mod subtitle_processor;
pub mod transcript;
pub mod translation;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use assembler::{BilingualAssembler, assemble};
pub use errors::{AppError, AssembleError, ProviderError, SegmentationError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use subtitle_processor::{Cue, CueSequence, format_cue, format_timestamp};
pub use transcript::{TimedSegment, Transcript};
pub use translation::{LanguageRoute, Translator};
