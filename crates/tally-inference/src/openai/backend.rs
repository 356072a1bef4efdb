//! OpenAI-compatible generation backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use tally_core::defaults::{
    ENV_GEN_MODEL, ENV_GEN_TIMEOUT, ENV_HTTP_REFERER, ENV_OPENAI_API_KEY, ENV_OPENAI_URL,
    ENV_SKIP_TLS_VERIFY, ENV_X_TITLE, GEN_MODEL, GEN_TIMEOUT_SECS, OPENAI_URL,
};
use tally_core::{Error, GenerationBackend, GenerationRequest, Result};

use super::error::{to_tally_error, OpenAIErrorCode};
use super::types::*;

/// Configuration for OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Model to use for generation.
    pub gen_model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Skip TLS verification (for self-signed certs in local environments).
    pub skip_tls_verify: bool,
    /// HTTP-Referer header for OpenRouter.ai rankings (optional).
    pub http_referer: Option<String>,
    /// X-Title header for app name on OpenRouter.ai (optional).
    pub x_title: Option<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: OPENAI_URL.to_string(),
            api_key: None,
            gen_model: GEN_MODEL.to_string(),
            timeout_seconds: GEN_TIMEOUT_SECS,
            skip_tls_verify: false,
            http_referer: None,
            x_title: None,
        }
    }
}

impl OpenAIConfig {
    /// Read configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(ENV_OPENAI_URL).unwrap_or_else(|_| OPENAI_URL.to_string()),
            api_key: std::env::var(ENV_OPENAI_API_KEY)
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gen_model: std::env::var(ENV_GEN_MODEL).unwrap_or_else(|_| GEN_MODEL.to_string()),
            timeout_seconds: std::env::var(ENV_GEN_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(GEN_TIMEOUT_SECS),
            skip_tls_verify: std::env::var(ENV_SKIP_TLS_VERIFY)
                .map(|v| v == "1" || v.to_lowercase() == "true")
                .unwrap_or(false),
            http_referer: std::env::var(ENV_HTTP_REFERER).ok(),
            x_title: std::env::var(ENV_X_TITLE).ok(),
        }
    }
}

/// OpenAI-compatible generation backend.
pub struct OpenAIBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIBackend {
    /// Create a new OpenAI backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let mut client_builder =
            Client::builder().timeout(Duration::from_secs(config.timeout_seconds));

        if config.skip_tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "openai",
            model = %config.gen_model,
            "Initializing OpenAI backend: url={}, auth={}",
            config.base_url,
            if config.api_key.is_some() { "key" } else { "none" }
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        // Add OpenRouter-specific headers if configured
        if let Some(ref referer) = self.config.http_referer {
            req = req.header("HTTP-Referer", referer);
        }

        if let Some(ref title) = self.config.x_title {
            req = req.header("X-Title", title);
        }

        req.header("Content-Type", "application/json")
    }
}

#[async_trait]
impl GenerationBackend for OpenAIBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let start = Instant::now();
        debug!(
            subsystem = "inference",
            component = "openai",
            op = "generate",
            model = %self.config.gen_model,
            prompt_len = request.prompt.len(),
            "Sending chat completion"
        );

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref().filter(|s| !s.is_empty()) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(request.prompt.clone()));

        let body = ChatCompletionRequest {
            model: self.config.gen_model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: None,
            stream: false,
        };

        let response = self
            .build_request("/chat/completions")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Synthesis(format!(
                        "Request timed out after {}s",
                        self.config.timeout_seconds
                    ))
                } else {
                    Error::Synthesis(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body: OpenAIErrorResponse = response.json().await.unwrap_or(OpenAIErrorResponse {
                error: OpenAIError {
                    message: "Unknown error".to_string(),
                    error_type: "unknown".to_string(),
                    code: None,
                },
            });
            let code = OpenAIErrorCode::from_response(status.as_u16(), &body.error.error_type);
            return Err(to_tally_error(
                code,
                &format!("OpenAI returned {}: {}", status, body.error.message),
            ));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Synthesis(format!("Failed to parse response: {}", e)))?;

        let choice = result
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Synthesis("Response contained no choices".to_string()))?;
        let content = choice.message.content.unwrap_or_default();

        debug!(
            subsystem = "inference",
            component = "openai",
            op = "generate",
            response_len = content.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Generation complete"
        );
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.gen_model
    }
}
