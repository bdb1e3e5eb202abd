use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Provider;
use crate::errors::ProviderError;

/// Ollama client for interacting with Ollama API
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Generate request for the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Random seed for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

/// Generation response from the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    pub model: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationResponse {
    /// A finished response carrying `text`
    pub fn done(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            created_at: String::new(),
            response: text.into(),
            done: true,
            prompt_eval_count: None,
            eval_count: None,
        }
    }
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }

    /// Fix the sampling seed so repeated runs translate identically
    pub fn seed(mut self, seed: u64) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).seed = Some(seed);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system.as_deref()
    }
}

/// Model listing returned by `/api/tags`
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

impl Ollama {
    /// Create a new Ollama client from a complete URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new_with_config(url, 60, 3, 1000)
    }

    /// Create a new Ollama client with configuration
    ///
    /// Note: Ollama typically uses HTTP/1.1, so we don't force HTTP/2.
    pub fn new_with_config(
        url: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        let url = url.into();
        let base_url = if url.starts_with("http://") || url.starts_with("https://") {
            url.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", url.trim_end_matches('/'))
        };

        Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .http1_only()
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate text from the Ollama API with retry logic.
    ///
    /// Network failures and server errors are retried with exponential
    /// backoff; client errors fail immediately.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            match self.client.post(&url).json(request).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let response_text = response.text().await.map_err(|e| {
                            ProviderError::RequestFailed(format!("Failed to get response text from Ollama API: {}", e))
                        })?;
                        return Self::parse_generation(&response_text);
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to get error response text".to_string());

                    if !status.is_server_error() {
                        error!("Ollama API error ({}): {}", status, error_text);
                        return Err(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message: error_text,
                        });
                    }

                    error!(
                        "Ollama API error ({}): {} - attempt {}/{}",
                        status,
                        error_text,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(ProviderError::ApiError {
                        status_code: status.as_u16(),
                        message: error_text,
                    });
                }
                Err(e) => {
                    error!(
                        "Ollama API network error: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(ProviderError::ConnectionError(format!(
                        "Failed to send request to Ollama API: {}",
                        e
                    )));
                }
            }

            attempt += 1;

            // If we have more retries left, wait with exponential backoff
            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1).min(16));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Ollama API request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }

    /// Parse a generate response, accepting either a single JSON object or
    /// a JSONL stream whose pieces are concatenated
    pub fn parse_generation(response_text: &str) -> Result<GenerationResponse, ProviderError> {
        if let Ok(response) = serde_json::from_str::<GenerationResponse>(response_text) {
            return Ok(response);
        }

        let pieces: Vec<GenerationResponse> = response_text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str::<GenerationResponse>(line).ok())
            .collect();

        let Some(last) = pieces.last() else {
            let preview: String = response_text.chars().take(500).collect();
            error!("Failed to parse Ollama API response. Raw response (first 500 chars): {}", preview);
            return Err(ProviderError::ParseError(
                "Ollama response contains no valid JSON object".to_string(),
            ));
        };

        debug!("Reassembled streamed Ollama response from {} pieces", pieces.len());
        Ok(GenerationResponse {
            model: last.model.clone(),
            created_at: last.created_at.clone(),
            response: pieces.iter().map(|p| p.response.as_str()).collect(),
            done: true,
            prompt_eval_count: last.prompt_eval_count,
            eval_count: last.eval_count,
        })
    }

    /// List locally available models
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to reach Ollama at {}: {}", self.base_url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Invalid /api/tags response: {}", e)))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.generate(&request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let models = self.list_models().await?;
        debug!("Ollama at {} serves {} model(s)", self.base_url, models.len());
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.clone()
    }
}
