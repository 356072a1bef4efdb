//! Core traits for tally.
//!
//! The generation backend is the only seam to an external service; the API
//! and synthesizer hold it as `Arc<dyn GenerationBackend>` so tests can
//! substitute a fake.

use async_trait::async_trait;

use crate::Result;

/// A single-turn chat generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// System instruction, sent first when present.
    pub system: Option<String>,
    /// User message.
    pub prompt: String,
    /// Sampling temperature; backend default when `None`.
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text for the request and return the first candidate's
    /// content, unmodified.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
