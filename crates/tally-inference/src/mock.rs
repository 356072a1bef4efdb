//! Scripted generation backend for tests.
//!
//! ```rust
//! use tally_core::{GenerationBackend, GenerationRequest};
//! use tally_inference::mock::MockGenerationBackend;
//!
//! # tokio_test_block_on(async {
//! let backend = MockGenerationBackend::new().with_fixed_response("4");
//! let out = backend.generate(&GenerationRequest::new("What is 2+2?")).await.unwrap();
//! assert_eq!(out, "4");
//! assert_eq!(backend.call_count(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tally_core::{Error, GenerationBackend, GenerationRequest, Result};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

/// Generation backend that returns a fixed reply and records every request.
#[derive(Clone)]
pub struct MockGenerationBackend {
    reply: Reply,
    model: String,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationBackend {
    pub fn new() -> Self {
        Self {
            reply: Reply::Text("Mock response".to_string()),
            model: "mock-model".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `response` to every request.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        self.reply = Reply::Text(response.into());
        self
    }

    /// Fail every request with a synthesis error carrying `message`.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.reply = Reply::Fail(message.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(message) => Err(Error::Synthesis(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
