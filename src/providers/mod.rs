/*!
 * Clients for generation backends.
 *
 * - `ollama`: HTTP client for a local Ollama server
 * - `mock`: scripted backends for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// An async text generation backend.
///
/// `RemoteTranslator` drives one of these from blocking code, so
/// implementations only need to be `Send + Sync`.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Request payload understood by the backend
    type Request: Send + Sync;

    /// Raw response returned by the backend
    type Response: Send + Sync;

    /// Run one generation request
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Check that the backend answers at all
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Generated text carried by a response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod mock;
pub mod ollama;
