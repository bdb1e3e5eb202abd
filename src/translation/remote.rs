use log::debug;
use tokio::runtime::Handle;

use super::Translator;
use crate::app_config::TranslationConfig;
use crate::errors::TranslationError;
use crate::providers::Provider;
use crate::providers::ollama::{GenerationRequest, GenerationResponse, Ollama};

/// Blocking `Translator` over an async generation provider.
///
/// Each call blocks on the given runtime handle, so it must run on a thread
/// that is not driving that runtime (e.g. inside `spawn_blocking`).
#[derive(Debug)]
pub struct RemoteTranslator<P> {
    provider: P,
    handle: Handle,
    model: String,
    system_prompt: String,
    temperature: f32,
}

/// Translator backed by a local Ollama server
pub type OllamaTranslator = RemoteTranslator<Ollama>;

impl<P> RemoteTranslator<P>
where
    P: Provider<Request = GenerationRequest, Response = GenerationResponse>,
{
    pub fn new(
        provider: P,
        handle: Handle,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            handle,
            model: model.into(),
            system_prompt: system_prompt.into(),
            temperature,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn build_request(&self, text: &str) -> GenerationRequest {
        GenerationRequest::new(self.model.clone(), text)
            .system(self.system_prompt.clone())
            .temperature(self.temperature)
            .seed(0)
    }
}

impl OllamaTranslator {
    /// Build an Ollama-backed translator for one language direction
    pub fn from_config(
        config: &TranslationConfig,
        handle: Handle,
        source_language_name: &str,
        target_language_name: &str,
    ) -> Self {
        let client = Ollama::new_with_config(
            config.endpoint.clone(),
            config.timeout_secs,
            config.retry_count,
            config.retry_backoff_ms,
        );
        Self::new(
            client,
            handle,
            config.model.clone(),
            config.render_system_prompt(source_language_name, target_language_name),
            config.temperature,
        )
    }
}

/// Reduce model output to one display line: the first non-empty line,
/// stripped of wrapping quotes
pub fn first_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| {
            line.trim_matches(|c| c == '"' || c == '“' || c == '”' || c == '「' || c == '」')
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
}

impl<P> Translator for RemoteTranslator<P>
where
    P: Provider<Request = GenerationRequest, Response = GenerationResponse>,
{
    fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let request = self.build_request(text);
        let response = self.handle.block_on(self.provider.complete(request))?;
        let raw = P::extract_text(&response);
        debug!("Model {} answered {} chars", self.model, raw.chars().count());

        first_line(&raw).ok_or_else(|| TranslationError::EmptyTranslation(text.to_string()))
    }

    fn name(&self) -> &str {
        &self.model
    }
}
