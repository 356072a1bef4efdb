//! OpenAI-compatible generation backend.
//!
//! Works with any endpoint that speaks the chat completions protocol:
//!
//! - OpenAI cloud API
//! - OpenRouter (optional `HTTP-Referer` / `X-Title` headers)
//! - Ollama (in OpenAI compatibility mode)
//! - vLLM, LocalAI, LM Studio
//!
//! # Example
//!
//! ```rust,no_run
//! use tally_core::{GenerationBackend, GenerationRequest};
//! use tally_inference::openai::{OpenAIBackend, OpenAIConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAIBackend::new(OpenAIConfig {
//!         base_url: "http://localhost:11434/v1".to_string(), // Ollama
//!         gen_model: "llama3".to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//!     let request = GenerationRequest::new("What is 2+2?").with_temperature(0.0);
//!     let text = backend.generate(&request).await.unwrap();
//!     println!("{}", text);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::*;
pub use error::{to_tally_error, OpenAIErrorCode};
pub use types::*;
