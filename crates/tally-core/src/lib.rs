//! # tally-core
//!
//! Core types, traits, and defaults shared by the tally crates.
//!
//! Nothing in here touches the network or the filesystem; the intake,
//! inference, and API crates build on these definitions.

pub mod defaults;
pub mod error;
pub mod file_safety;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use file_safety::{file_extension, sanitize_filename};
pub use models::{Dataset, Row};
pub use traits::{GenerationBackend, GenerationRequest};
