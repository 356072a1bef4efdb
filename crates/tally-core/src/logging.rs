//! Structured logging field names for tally.
//!
//! All crates use these constants so that log aggregation can query the same
//! field names across the API, intake, and inference subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request failed, response is a 500 |
//! | WARN  | Recoverable issue (cleanup failure, skipped entry) |
//! | INFO  | Lifecycle events (startup), request completions |
//! | DEBUG | Decision points (dispatch route, direct answer hit) |
//! | TRACE | Per-row / per-entry iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "intake", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "archive", "table", "dispatch", "synthesis", "openai"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "extract", "read_table", "dispatch", "synthesize", "cleanup"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Client-supplied (sanitized) filename.
pub const FILE_NAME: &str = "file_name";

/// Filesystem path being operated on.
pub const PATH: &str = "path";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of parsed rows.
pub const ROW_COUNT: &str = "row_count";

/// Number of archive entries unpacked.
pub const ENTRY_COUNT: &str = "entry_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for generation.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// How the answer was produced ("direct", "synthesized").
pub const ANSWER_SOURCE: &str = "answer_source";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
