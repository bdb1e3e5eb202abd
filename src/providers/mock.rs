/*!
 * Mock provider implementations for testing.
 *
 * - `MockTranslator` is a synchronous `Translator` that records every call
 * - `MockProvider` stands in for an LLM server behind `RemoteTranslator`
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Provider;
use super::ollama::{GenerationRequest, GenerationResponse};
use crate::errors::{ProviderError, TranslationError};
use crate::translation::Translator;

/// Behavior mode for the mocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a tagged translation
    Working,
    /// Fails on the given 1-based call and succeeds otherwise
    FailOnCall(usize),
    /// Always fails with an error
    Failing,
    /// Succeeds with blank output
    Empty,
}

/// Translator that tags its input and remembers the call order
#[derive(Debug, Clone)]
pub struct MockTranslator {
    behavior: MockBehavior,
    tag: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            tag: "[T]".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that fails on the `call`-th invocation
    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall(call))
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Prefix put in front of every translation
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Texts received so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Translator for MockTranslator {
    fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let call_no = {
            let mut calls = self.calls.lock();
            calls.push(text.to_string());
            calls.len()
        };

        let fail = match self.behavior {
            MockBehavior::Failing => true,
            MockBehavior::FailOnCall(n) => call_no == n,
            MockBehavior::Working | MockBehavior::Empty => false,
        };
        if fail {
            return Err(ProviderError::RequestFailed(format!("mock failure on call {}", call_no)).into());
        }

        if self.behavior == MockBehavior::Empty {
            return Ok(String::new());
        }
        Ok(format!("{} {}", self.tag, text))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Scripted stand-in for an Ollama server
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    request_count: AtomicUsize,
    reply: fn(&GenerationRequest) -> String,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: AtomicUsize::new(0),
            reply: |request| format!("[translated] {}", request.prompt()),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Set a custom response generator
    pub fn with_reply(mut self, reply: fn(&GenerationRequest) -> String) -> Self {
        self.reply = reply;
        self
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("mock server unreachable".to_string())),
            MockBehavior::FailOnCall(n) if n == count => Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("mock failure on request {}", count),
            }),
            MockBehavior::Empty => Ok(GenerationResponse::done(request.model(), "  \n")),
            _ => Ok(GenerationResponse::done(request.model(), (self.reply)(&request))),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("mock server unreachable".to_string())),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.clone()
    }
}
