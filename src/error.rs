//! Error types for psycurve

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during session analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Trial {trial} violates stimulus-side invariant: {detail}")]
    InvariantViolation { trial: usize, detail: String },

    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    #[error("Failed to parse trial payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("No sessions matched: {0}")]
    NoSessions(String),
}
