//! Core error taxonomy.
//!
//! Defined in `drillforge-core` so the session orchestrator can classify
//! failures without string matching: parsing and generator failures abort
//! the current turn, store failures are recovered locally.

use thiserror::Error;

/// Errors raised by the core tutoring engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Generator text did not match the section-tag protocol.
    ///
    /// Fatal for the current request; never retried automatically.
    #[error("malformed generator output: {reason}")]
    MalformedOutput { reason: String },

    /// The text generator could not be reached or returned an error.
    #[error("text generator unavailable: {0}")]
    GeneratorUnavailable(String),

    /// The question store could not be reached or returned an error.
    #[error("question store unavailable: {0}")]
    StoreUnavailable(String),

    /// The caller omitted a required field (e.g. topic).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CoreError {
    /// Returns `true` if the turn can continue after this error.
    ///
    /// Store failures degrade gracefully (ephemeral ids, swallowed writes);
    /// everything else aborts the turn.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CoreError::StoreUnavailable(_))
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        CoreError::MalformedOutput {
            reason: reason.into(),
        }
    }
}
