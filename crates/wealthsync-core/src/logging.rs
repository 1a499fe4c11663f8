//! Structured logging field name constants for wealthsync.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across a request. Format: UUIDv7.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "ingest", "inference", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "classifier", "stager", "dispatcher", "gemini"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "analyze", "chat", "stage", "upload_file"
pub const OPERATION: &str = "op";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model identifier used for the call.
pub const MODEL: &str = "model";

/// Provider family handling the call.
pub const PROVIDER: &str = "provider";

/// Number of parts in an assembled prompt.
pub const PROMPT_PARTS: &str = "prompt_parts";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Ingestion fields ──────────────────────────────────────────────────────

/// Number of evidence items in a request.
pub const EVIDENCE_COUNT: &str = "evidence_count";

/// Number of evidence items dropped as unsupported.
pub const DROPPED_COUNT: &str = "dropped_count";

/// Filename of the evidence item being handled.
pub const FILENAME: &str = "filename";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Stored profile ID being operated on.
pub const PROFILE_ID: &str = "profile_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
