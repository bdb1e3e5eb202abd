use log::{debug, info};

use super::Translator;
use crate::app_config::SubtitleConfig;
use crate::errors::TranslationError;
use crate::language_utils;

/// Which language is spoken, which one is translated into, and how the
/// two end up on screen.
///
/// The display order is fixed: the primary language is always the top line.
/// Only the direction of translation follows the detected language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRoute {
    /// Language shown on the top line
    pub primary_language: String,
    /// Language shown on the bottom line
    pub secondary_language: String,
    /// Language of the transcript text
    pub source_language: String,
    /// Language the translator produces
    pub target_language: String,
}

impl LanguageRoute {
    /// Resolve the route for a detected (or forced) language.
    ///
    /// Speech in the secondary language is translated into the primary one;
    /// anything else, including an unknown language, is treated as primary.
    pub fn resolve(detected: Option<&str>, primary: &str, secondary: &str) -> Self {
        let source_is_secondary = detected
            .is_some_and(|lang| language_utils::language_codes_match(lang, secondary));

        let (source, target) = if source_is_secondary {
            (secondary, primary)
        } else {
            (primary, secondary)
        };

        info!(
            "Detected language: {}. Translating {} -> {}",
            detected.unwrap_or("auto"),
            source,
            target
        );

        Self {
            primary_language: primary.to_string(),
            secondary_language: secondary.to_string(),
            source_language: source.to_string(),
            target_language: target.to_string(),
        }
    }

    /// True when the transcript is already in the top-line language
    pub fn source_is_primary(&self) -> bool {
        self.source_language == self.primary_language
    }

    /// Character budget for chunking the source text
    pub fn max_chars(&self, subtitle: &SubtitleConfig) -> usize {
        if self.source_is_primary() {
            subtitle.max_chars_primary
        } else {
            subtitle.max_chars_secondary
        }
    }

    /// Produce `(top line, bottom line)` for one source chunk, calling the
    /// translator exactly once.
    pub fn make_pair<T: Translator + ?Sized>(
        &self,
        translator: &T,
        source: &str,
    ) -> Result<(String, String), TranslationError> {
        let translated = translator.translate(source)?;
        debug!("[{}] {} => {}", translator.name(), source, translated);

        if self.source_is_primary() {
            Ok((source.to_string(), translated))
        } else {
            Ok((translated, source.to_string()))
        }
    }

    /// The pair callback handed to the assembler
    pub fn pair_fn<'a, T: Translator + ?Sized>(
        &'a self,
        translator: &'a T,
    ) -> impl FnMut(&str) -> Result<(String, String), TranslationError> + 'a {
        move |source: &str| self.make_pair(translator, source)
    }
}
