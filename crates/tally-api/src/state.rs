//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use tally_core::GenerationBackend;
use tally_inference::AnswerSynthesizer;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub synthesizer: AnswerSynthesizer,
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(backend: Arc<dyn GenerationBackend>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            synthesizer: AnswerSynthesizer::new(backend),
            upload_dir: Arc::new(upload_dir.into()),
        }
    }
}
