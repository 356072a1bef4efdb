//! Centralized default constants for tally.
//!
//! Every crate reads its defaults from here instead of defining its own
//! magic numbers. Environment variable names live next to the value they
//! override.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";

/// Comma-separated CORS origin whitelist. Unset means any origin.
pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";

// =============================================================================
// UPLOADS
// =============================================================================

/// Root directory for per-request upload scratch space.
pub const UPLOAD_DIR: &str = "uploads";

pub const ENV_UPLOAD_DIR: &str = "UPLOAD_DIR";

/// Maximum request body size in bytes (50 MB).
pub const MAX_UPLOAD_SIZE_BYTES: usize = 50 * 1024 * 1024;

pub const ENV_MAX_UPLOAD_SIZE_BYTES: &str = "MAX_UPLOAD_SIZE_BYTES";

/// Maximum filename length (ext4/NTFS compatible).
pub const FILENAME_MAX_LENGTH: usize = 255;

/// Filename used when the client sends none, or one that sanitizes to nothing.
pub const FALLBACK_FILENAME: &str = "unnamed_file";

// =============================================================================
// INTAKE
// =============================================================================

/// Extension (lowercase, no dot) routed through the archive extractor.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Extension (lowercase, no dot) routed to the table reader.
pub const TABLE_EXTENSION: &str = "csv";

/// Prefix of the directory an archive is unpacked into.
pub const EXTRACT_DIR_PREFIX: &str = "extract_";

/// Question substring that enables the direct-answer shortcut.
pub const DIRECT_ANSWER_MARKER: &str = "\"answer\" column";

/// Column read by the direct-answer shortcut.
pub const DIRECT_ANSWER_COLUMN: &str = "answer";

/// Number of leading rows forwarded to the synthesizer.
pub const SAMPLE_ROWS: usize = 10;

// =============================================================================
// GENERATION
// =============================================================================

/// Default OpenAI-compatible API endpoint.
pub const OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default generation model.
pub const GEN_MODEL: &str = "gpt-4o";

/// Sampling temperature for answer synthesis.
pub const GEN_TEMPERATURE: f32 = 0.0;

/// Default generation request timeout in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 300;

pub const ENV_OPENAI_URL: &str = "OPENAI_BASE_URL";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_GEN_MODEL: &str = "OPENAI_GEN_MODEL";
pub const ENV_GEN_TIMEOUT: &str = "OPENAI_TIMEOUT";
pub const ENV_SKIP_TLS_VERIFY: &str = "OPENAI_SKIP_TLS_VERIFY";
pub const ENV_HTTP_REFERER: &str = "OPENAI_HTTP_REFERER";
pub const ENV_X_TITLE: &str = "OPENAI_X_TITLE";

// =============================================================================
// LOGGING
// =============================================================================

/// Default `RUST_LOG` filter when the variable is unset.
pub const LOG_FILTER: &str = "tally_api=debug,tally_intake=debug,tally_inference=debug,tower_http=debug";

pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_LOG_FILE: &str = "LOG_FILE";
pub const ENV_LOG_ANSI: &str = "LOG_ANSI";
