//! Upload dispatch.
//!
//! Decides what an uploaded file contributes to answering a question:
//! a parsed dataset, and possibly an answer read straight out of it.

use std::path::{Path, PathBuf};

use tracing::debug;

use tally_core::defaults::{
    ARCHIVE_EXTENSION, DIRECT_ANSWER_COLUMN, DIRECT_ANSWER_MARKER, SAMPLE_ROWS, TABLE_EXTENSION,
};
use tally_core::{file_extension, Dataset, Error, Result, Row};

use crate::archive::extract;
use crate::table::read_table;

/// How an upload is handled, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Archive,
    Table,
    Other,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Self {
        match file_extension(path).as_str() {
            ARCHIVE_EXTENSION => FileKind::Archive,
            TABLE_EXTENSION => FileKind::Table,
            _ => FileKind::Other,
        }
    }
}

/// What an upload produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intake {
    pub dataset: Option<Dataset>,
    pub direct_answer: Option<String>,
}

impl Intake {
    /// Leading rows forwarded to synthesis, at most [`SAMPLE_ROWS`].
    pub fn sample(&self) -> Option<&[Row]> {
        self.dataset
            .as_deref()
            .map(|rows| &rows[..rows.len().min(SAMPLE_ROWS)])
    }
}

/// Route the upload at `path` and derive its dataset and direct answer.
///
/// Unknown extensions produce an empty [`Intake`]. Only extraction and parse
/// failures are errors.
pub async fn dispatch(path: &Path, question: &str) -> Result<Intake> {
    let kind = FileKind::from_path(path);
    debug!(
        subsystem = "intake",
        component = "dispatch",
        path = %path.display(),
        kind = ?kind,
        "Dispatching upload"
    );

    let dataset = match kind {
        FileKind::Archive => {
            let dir = extract(path).await?;
            match find_table(&dir).await? {
                Some(table) => Some(read_table(&table).await?),
                None => {
                    debug!(
                        subsystem = "intake",
                        component = "dispatch",
                        path = %dir.display(),
                        "Archive holds no CSV file"
                    );
                    None
                }
            }
        }
        FileKind::Table => Some(read_table(path).await?),
        FileKind::Other => None,
    };

    let direct_answer = dataset
        .as_deref()
        .and_then(|rows| direct_answer(question, rows));
    if direct_answer.is_some() {
        debug!(
            subsystem = "intake",
            component = "dispatch",
            answer_source = "direct",
            "Answer read from dataset"
        );
    }

    Ok(Intake {
        dataset,
        direct_answer,
    })
}

/// First CSV file directly inside `dir`, by file name.
///
/// Subdirectories are not searched.
pub async fn find_table(dir: &Path) -> Result<Option<PathBuf>> {
    let list_error =
        |e: std::io::Error| Error::Extraction(format!("Failed to list {}: {}", dir.display(), e));

    let mut entries = tokio::fs::read_dir(dir).await.map_err(list_error)?;
    let mut tables = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
        let path = entry.path();
        let is_file = entry.file_type().await.map_err(list_error)?.is_file();
        if is_file && FileKind::from_path(&path) == FileKind::Table {
            tables.push(path);
        }
    }

    tables.sort();
    Ok(tables.into_iter().next())
}

/// The shortcut for questions that point at the `answer` column: when the
/// question mentions `"answer" column` (exact case) and the first row has a
/// non-empty `answer` field, that raw value is the answer.
pub fn direct_answer(question: &str, rows: &[Row]) -> Option<String> {
    if !question.contains(DIRECT_ANSWER_MARKER) {
        return None;
    }
    rows.first()
        .and_then(|row| row.get(DIRECT_ANSWER_COLUMN))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
