//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the case registry to its callers (a web front-end,
//! a gateway, tests).

use async_trait::async_trait;

use crate::domain::{
    CaseCategory, CaseKey, CaseListing, CaseRecord, OwnerId, RegistryError, RegistryStats,
};

/// Review decision for a pending case.
///
/// These are the only two targets a case can transition to; `pending` is an
/// initial state, never a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseDecision {
    /// Run the analyzer and settle the case with its outcome.
    Analyze,
    /// Settle the case as rejected, with no outcome.
    Reject,
}

/// Primary API of the case registry.
#[async_trait]
pub trait CaseRegistryApi: Send + Sync {
    /// List all visible cases, newest first.
    ///
    /// Index entries whose record cannot be read or decoded are omitted and
    /// tallied in [`CaseListing::skipped`] instead of failing the listing.
    /// An absent index is the first-use state and yields an empty listing.
    ///
    /// Errors: `StoreReadFailed` (index read), `DecodeError` (malformed
    /// index bytes).
    async fn list_cases(&self) -> Result<CaseListing, RegistryError>;

    /// Encrypt and store a new case, then register its key in the index.
    ///
    /// On success both the record and the index entry are durably written.
    /// On failure nothing user-visible changes; the one tolerated partial
    /// effect is an orphan record (written, but never indexed), which
    /// listings ignore.
    ///
    /// Errors: `InvalidSubmission`, `EncryptionFailed`, `KeyCollision`,
    /// `StoreReadFailed`, `StoreWriteFailed`, `IndexConflict`.
    async fn submit_case(
        &self,
        category: CaseCategory,
        plaintext: &[u8],
        owner: OwnerId,
    ) -> Result<CaseRecord, RegistryError>;

    /// Settle a pending case as analyzed or rejected.
    ///
    /// Only the owner may settle a case, and only while it is pending; a
    /// settled case never changes again. Returns the updated record.
    ///
    /// Errors: `NotFound`, `NotAuthorized`, `InvalidTransition`,
    /// `AnalysisFailed`, `StoreReadFailed`, `StoreWriteFailed`,
    /// `DecodeError`.
    async fn transition(
        &self,
        key: &CaseKey,
        decision: CaseDecision,
        actor: &OwnerId,
    ) -> Result<CaseRecord, RegistryError>;

    /// Snapshot of the operational counters.
    async fn stats(&self) -> RegistryStats;
}
