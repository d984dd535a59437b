//! Error types for validator construction and catalog loading.
//!
//! Per-frame data problems (occluded joints, low confidence, degenerate
//! segments) never show up here. They are absorbed by omission in the
//! returned `ValidationResult`.

use thiserror::Error;

/// Result type for trainer operations
pub type TrainerResult<T> = Result<T, TrainerError>;

/// Errors raised while building validators or loading exercise data
#[derive(Debug, Error)]
pub enum TrainerError {
    /// No definition is registered for the requested exercise id
    #[error("Unknown exercise: {id}")]
    UnknownExercise {
        /// Requested exercise id
        id: String,
    },

    /// Neither the native nor the fallback validator could be built
    #[error("No validator available for {exercise_id} (native: {native}; fallback: {fallback})")]
    ValidatorUnavailable {
        /// Exercise the validator was requested for
        exercise_id: String,
        /// Why the native path failed
        native: String,
        /// Why the fallback path failed
        fallback: String,
    },

    /// Definition failed validation at registration or session construction
    #[error("Invalid exercise definition '{id}': {reason}")]
    InvalidDefinition {
        /// Offending exercise id
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// Malformed catalog or config JSON
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrainerError {
    pub(crate) fn invalid(id: &str, reason: impl Into<String>) -> Self {
        TrainerError::InvalidDefinition {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
