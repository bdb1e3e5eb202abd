/*!
 * Translation backends seen from the cue assembler.
 *
 * - `Translator`: the single capability the rest of the crate depends on
 * - `route`: decides which language is the source and which line it lands on
 * - `remote`: a blocking adapter over an async provider (Ollama)
 *
 * Backends are injected; nothing here holds global model state.
 */

pub mod remote;
pub mod route;

use crate::errors::TranslationError;

/// One-directional text translation
pub trait Translator: Send + Sync {
    /// Translate a single chunk of source text.
    ///
    /// Implementations may block; the assembler calls them serially.
    fn translate(&self, text: &str) -> Result<String, TranslationError>;

    /// Short backend name for logs
    fn name(&self) -> &str;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str) -> Result<String, TranslationError> {
        (**self).translate(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Hands the source text back unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, text: &str) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}

pub use remote::{OllamaTranslator, RemoteTranslator};
pub use route::LanguageRoute;
