//! Answer synthesis.
//!
//! Builds the prompt for a question (plus an optional data sample), sends it
//! to the configured [`GenerationBackend`] at zero temperature, and reduces
//! the reply to a single literal answer with [`clean_answer`].

use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use tally_core::defaults::{GEN_TEMPERATURE, SAMPLE_ROWS};
use tally_core::{Error, GenerationBackend, GenerationRequest, Result, Row};

/// System instruction sent with every synthesis request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers data science \
assignment questions concisely and accurately. Provide only the exact answer without \
explanations, introductions, or additional text.";

const QUESTION_PREAMBLE: &str = "Answer the following question from an IIT Madras Data \
Science assignment as concisely as possible, providing only the exact answer that should \
be entered in the assignment form: ";

/// Boilerplate a model tends to put in front of the answer.
static ANSWER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(answer:|the answer is:|the value is:)")
        .expect("answer prefix pattern is valid")
});

/// Build the user prompt for `question`.
///
/// With a sample, at most [`SAMPLE_ROWS`] rows are appended as a JSON array,
/// labeled with how many rows are shown.
pub fn build_prompt(question: &str, sample: Option<&[Row]>) -> Result<String> {
    let mut prompt = format!("{}{}", QUESTION_PREAMBLE, question);

    if let Some(rows) = sample {
        let shown = &rows[..rows.len().min(SAMPLE_ROWS)];
        let data = serde_json::to_string(shown)?;
        prompt.push_str(&format!(
            "\n\nThe attached file contains the following data (showing first {} rows):\n{}",
            shown.len(),
            data
        ));
    }

    Ok(prompt)
}

/// Reduce raw model output to a single literal answer.
///
/// 1. Trim surrounding whitespace.
/// 2. If several lines remain, keep only the last non-blank one; explanation
///    usually comes first and the answer last.
/// 3. Drop a leading `answer:`, `the answer is:` or `the value is:` (any
///    case) and trim again.
///
/// A single-line reply passes through step 2 unchanged. A blank reply yields
/// an empty string.
pub fn clean_answer(raw: &str) -> String {
    let text = raw.trim();

    let line = if text.contains('\n') {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .last()
            .unwrap_or_default()
    } else {
        text
    };

    ANSWER_PREFIX.replace(line, "").trim().to_string()
}

/// Turns a question into a literal answer using a generation backend.
#[derive(Clone)]
pub struct AnswerSynthesizer {
    backend: Arc<dyn GenerationBackend>,
}

impl AnswerSynthesizer {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Ask the backend and clean its reply.
    ///
    /// Every backend failure, and a reply that cleans down to nothing, is an
    /// [`Error::Synthesis`].
    pub async fn synthesize(&self, question: &str, sample: Option<&[Row]>) -> Result<String> {
        let start = Instant::now();
        let prompt = build_prompt(question, sample)?;
        let request = GenerationRequest::new(prompt)
            .with_system(SYSTEM_PROMPT)
            .with_temperature(GEN_TEMPERATURE);

        let raw = self.backend.generate(&request).await.map_err(|e| match e {
            Error::Synthesis(_) => e,
            other => Error::Synthesis(other.to_string()),
        })?;

        let answer = clean_answer(&raw);
        debug!(
            subsystem = "inference",
            component = "synthesis",
            op = "synthesize",
            model = %self.backend.model_name(),
            prompt_len = request.prompt.len(),
            response_len = raw.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Answer synthesized"
        );

        if answer.is_empty() {
            return Err(Error::Synthesis(
                "Model returned an empty answer".to_string(),
            ));
        }
        Ok(answer)
    }
}
