//! CSV parsing into ordered rows.

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use tally_core::{Dataset, Error, Result, Row};

/// Parse the CSV file at `path`.
///
/// The first record names the columns. Every later record becomes a [`Row`]
/// with its values kept as raw strings. Blank lines are skipped; short
/// records omit their missing columns and surplus fields are keyed `_<index>`.
/// Any read or decode failure rejects the whole file.
pub async fn read_table(path: &Path) -> Result<Dataset> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || read_table_blocking(&path))
        .await
        .map_err(|e| Error::Internal(format!("Table read task failed: {}", e)))?
}

fn read_table_blocking(path: &Path) -> Result<Dataset> {
    let start = Instant::now();
    let parse_error =
        |e: csv::Error| Error::TableParse(format!("Failed to read {}: {}", path.display(), e));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(parse_error)?;

    let headers = reader.headers().map_err(parse_error)?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        let row: Row = record
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let column = match headers.get(i) {
                    Some(name) => name.to_string(),
                    None => format!("_{}", i),
                };
                (column, value)
            })
            .collect();
        rows.push(row);
    }

    debug!(
        subsystem = "intake",
        component = "table",
        op = "read_table",
        path = %path.display(),
        row_count = rows.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Table parsed"
    );

    Ok(rows)
}
