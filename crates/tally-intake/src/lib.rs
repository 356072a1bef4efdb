//! # tally-intake
//!
//! Turns an uploaded file into something the answer pipeline can use:
//!
//! - [`archive`] unpacks ZIP uploads next to the upload itself
//! - [`table`] parses CSV into ordered [`Row`](tally_core::Row)s
//! - [`dispatch`] routes an upload by extension and applies the
//!   direct-answer shortcut
//!
//! All blocking filesystem work runs on tokio's blocking pool.

pub mod archive;
pub mod dispatch;
pub mod table;

pub use archive::{extract, extraction_dir_for};
pub use dispatch::{direct_answer, dispatch, find_table, FileKind, Intake};
pub use table::read_table;
