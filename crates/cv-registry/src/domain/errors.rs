//! # Error Types
//!
//! All error types for the registry and its driven collaborators.

use thiserror::Error;

use super::entities::{CaseKey, OwnerId};

// =============================================================================
// COLLABORATOR ERRORS
// =============================================================================

/// Errors from the key-value contract.
///
/// A timeout is indistinguishable from a lost ack, so callers must never
/// assume a timed-out write did or did not apply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The contract (or its signer) rejected the call.
    #[error("call rejected: {0}")]
    Rejected(String),

    /// The call did not complete in time.
    #[error("call timed out")]
    Timeout,

    /// The contract endpoint could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the encryption gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncryptionError {
    #[error("encryption backend unavailable: {0}")]
    Unavailable(String),

    #[error("plaintext rejected: {0}")]
    Rejected(String),
}

/// Errors from the outcome analyzer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("analysis backend unavailable: {0}")]
    Unavailable(String),

    #[error("ciphertext rejected: {0}")]
    Rejected(String),
}

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors surfaced by registry operations.
///
/// Each kind demands different caller handling (re-submit, re-auth, disable
/// the action, or just display a message), so none are collapsed together.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The gateway failed; nothing was written.
    #[error("encryption failed: {0}")]
    EncryptionFailed(#[from] EncryptionError),

    /// The analyzer failed; nothing was written.
    #[error("analysis failed: {0}")]
    AnalysisFailed(#[from] AnalysisError),

    /// A `get` against the contract failed.
    #[error("store read failed for `{key}`: {source}")]
    StoreReadFailed { key: String, source: StoreError },

    /// A `set` against the contract failed. Not retried internally: the
    /// registry cannot tell "not applied" from "applied, ack lost".
    #[error("store write failed for `{key}`: {source}")]
    StoreWriteFailed { key: String, source: StoreError },

    /// The index kept moving underneath the write loop until the retry
    /// budget ran out.
    #[error("index write conflict persisted after {attempts} attempts")]
    IndexConflict { attempts: u32 },

    /// No record exists under the given key.
    #[error("case not found: {key}")]
    NotFound { key: CaseKey },

    /// The actor is not the owner of the case.
    #[error("{actor} is not the owner of case {key}")]
    NotAuthorized { key: CaseKey, actor: OwnerId },

    /// The case already settled; `pending` is the only reviewable state.
    #[error("case {key} is already {from}; only pending cases can be reviewed")]
    InvalidTransition { key: CaseKey, from: &'static str },

    /// Stored bytes for the index or a record did not decode.
    #[error("malformed {what}: {reason}")]
    DecodeError { what: &'static str, reason: String },

    /// Submission precondition violated (empty field).
    #[error("invalid submission: {reason}")]
    InvalidSubmission { reason: &'static str },

    /// Could not reserve a free record key within the attempt budget.
    #[error("record key collision persisted after {attempts} attempts")]
    KeyCollision { attempts: u32 },
}
