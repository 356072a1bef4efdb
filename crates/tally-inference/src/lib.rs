//! # tally-inference
//!
//! Text generation for tally.
//!
//! - [`openai`]: backend for any OpenAI-compatible `/chat/completions` API
//!   (OpenAI, OpenRouter, Ollama in compatibility mode, vLLM, ...)
//! - [`synthesis`]: prompt construction and answer clean-up
//! - `mock` (feature `mock`): scripted backend for tests

pub mod openai;
pub mod synthesis;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use openai::{OpenAIBackend, OpenAIConfig};
pub use synthesis::{build_prompt, clean_answer, AnswerSynthesizer, SYSTEM_PROMPT};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationBackend;
