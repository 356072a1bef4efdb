//! Question answering handler.
//!
//! Accepts a question and an optional CSV or ZIP attachment. The answer is
//! read straight from the data when the question points at its `answer`
//! column, and synthesized by the generation backend otherwise.

use std::path::Path;
use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use tally_core::Error;
use tally_intake::{dispatch, Intake};

use crate::uploads::StoredUpload;
use crate::{ApiError, AppState};

/// Successful answer.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Parsed multipart form.
#[derive(Debug, Default)]
struct AskForm {
    question: Option<String>,
    upload: Option<StoredUpload>,
}

impl AskForm {
    /// Read all fields, streaming the `file` field to disk under `upload_root`.
    ///
    /// Only the first file is kept. File fields without a filename (an empty
    /// browser file input) are skipped.
    async fn read(mut multipart: Multipart, upload_root: &Path) -> Result<Self, ApiError> {
        let mut form = AskForm::default();

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("question") => {
                    form.question = Some(field.text().await?);
                }
                Some("file") => {
                    let file_name = field.file_name().map(str::to_string);
                    if form.upload.is_some() || file_name.as_deref().map_or(true, str::is_empty) {
                        continue;
                    }

                    let upload = StoredUpload::create(upload_root, file_name.as_deref()).await?;
                    let mut file = tokio::fs::File::create(upload.path())
                        .await
                        .map_err(Error::from)?;
                    while let Some(chunk) = field.chunk().await? {
                        file.write_all(&chunk).await.map_err(Error::from)?;
                    }
                    file.flush().await.map_err(Error::from)?;
                    form.upload = Some(upload);
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }
}

/// Answer a question, optionally using an attached data file.
///
/// # Multipart Fields
/// - `question`: the question text (required)
/// - `file`: a `.csv` file, or a `.zip` holding one (optional)
///
/// # Returns
/// - 200 OK with `{ "answer": ... }`
/// - 400 Bad Request if the question is missing or empty
/// - 413 Payload Too Large if the upload exceeds the configured limit
/// - 500 Internal Server Error with `details` if the file cannot be read or
///   the answer cannot be generated
#[utoipa::path(post, path = "/api", tag = "Answers",
    responses(
        (status = 200, description = "Answer", body = AnswerResponse),
        (status = 400, description = "Missing question", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload too large", body = crate::error::ErrorResponse),
        (status = 500, description = "Processing failed", body = crate::error::ErrorResponse)
    ))]
pub async fn ask(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnswerResponse>, ApiError> {
    let start = Instant::now();
    let AskForm { question, upload } = AskForm::read(multipart, &state.upload_dir).await?;

    let outcome = resolve_answer(&state, question.as_deref(), upload.as_ref()).await;

    if let Some(upload) = upload {
        upload.cleanup().await;
    }

    match &outcome {
        Ok((_, source)) => info!(
            subsystem = "api",
            op = "ask",
            answer_source = *source,
            duration_ms = start.elapsed().as_millis() as u64,
            "Question answered"
        ),
        Err(e @ (ApiError::BadRequest(_) | ApiError::PayloadTooLarge(_))) => warn!(
            subsystem = "api",
            op = "ask",
            error = %e,
            "Rejected request"
        ),
        Err(e) => error!(
            subsystem = "api",
            op = "ask",
            error = %e,
            duration_ms = start.elapsed().as_millis() as u64,
            "Error processing request"
        ),
    }

    outcome.map(|(answer, _)| Json(AnswerResponse { answer }))
}

/// Validate, dispatch the upload, and pick the answer. Returns the answer and
/// where it came from.
async fn resolve_answer(
    state: &AppState,
    question: Option<&str>,
    upload: Option<&StoredUpload>,
) -> Result<(String, &'static str), ApiError> {
    let question = question
        .filter(|q| !q.is_empty())
        .ok_or_else(|| Error::Validation("Question is required".to_string()))?;

    let mut intake = match upload {
        Some(upload) => dispatch(upload.path(), question).await?,
        None => Intake::default(),
    };

    if let Some(answer) = intake.direct_answer.take() {
        return Ok((answer, "direct"));
    }

    let answer = state
        .synthesizer
        .synthesize(question, intake.sample())
        .await?;
    Ok((answer, "synthesized"))
}
