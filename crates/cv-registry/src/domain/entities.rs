//! # Domain Entities
//!
//! Core data structures for the case registry.
//!
//! ## Type Decisions
//!
//! - `CaseStatus` is a tagged variant, not a status field plus optional
//!   outcome fields: a `pending` or `rejected` case cannot carry an outcome
//!   by construction.
//! - `OwnerId` normalizes to lowercase at construction so ownership
//!   comparisons are canonical (wallet addresses arrive in mixed case).
//! - `payload` is opaque bytes; it is stored as a base64 string in the
//!   on-chain JSON value and never interpreted by the registry.

use serde::{Deserialize, Serialize};

use super::errors::RegistryError;

/// Unique identifier of a case record.
///
/// Generated at submission time as `<unix-millis>-<random suffix>`, which is
/// collision-resistant across concurrent submitters; the registry re-checks
/// the store before use anyway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseKey(String);

impl CaseKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CaseKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for CaseKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl std::fmt::Display for CaseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a case owner (the submitting account).
///
/// Stored and compared in lowercase. The original wallet flow hands out
/// checksummed and lowercased spellings of the same address
/// interchangeably, so equality must not be case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(raw: impl Into<String>) -> Result<Self, RegistryError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::InvalidSubmission {
                reason: "owner identity is empty",
            });
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short classification of a case, e.g. "Contract" or "Employment".
///
/// Free-form but never empty. The well-known vocabulary the submission form
/// offers lives in [`crate::domain::value_objects::WELL_KNOWN_CATEGORIES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseCategory(String);

impl CaseCategory {
    pub fn new(raw: impl Into<String>) -> Result<Self, RegistryError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(RegistryError::InvalidSubmission {
                reason: "case category is empty",
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Analysis verdict vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLabel {
    Favorable,
    Unfavorable,
    Neutral,
    Complex,
}

impl OutcomeLabel {
    /// The full verdict vocabulary, in the order the analyzer samples it.
    pub const ALL: [OutcomeLabel; 4] = [
        OutcomeLabel::Favorable,
        OutcomeLabel::Unfavorable,
        OutcomeLabel::Neutral,
        OutcomeLabel::Complex,
    ];
}

impl std::fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Favorable => "favorable",
            Self::Unfavorable => "unfavorable",
            Self::Neutral => "neutral",
            Self::Complex => "complex",
        };
        f.write_str(name)
    }
}

/// Result of analyzing a case.
///
/// `confidence` is a percentage in 0..=100; the simulated analyzer produces
/// values in 60..=99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub label: OutcomeLabel,
    pub confidence: u8,
}

/// Workflow status of a case.
///
/// Monotonic: a case starts `Pending` and settles exactly once. An outcome
/// exists if and only if the case is `Analyzed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseStatus {
    Pending,
    Analyzed { outcome: Outcome },
    Rejected,
}

impl CaseStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Stable lowercase name, matching the on-chain tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Analyzed { .. } => "analyzed",
            Self::Rejected => "rejected",
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Self::Analyzed { outcome } => Some(outcome),
            _ => None,
        }
    }
}

/// One submitted case record, as persisted under `record:<key>`.
///
/// Everything except `status` is immutable after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub key: CaseKey,
    pub owner: OwnerId,
    pub category: CaseCategory,
    /// Submission time, unix seconds.
    pub created_at: u64,
    /// Encrypted blob from the gateway; opaque to the registry.
    #[serde(with = "opaque_payload")]
    pub payload: Vec<u8>,
    #[serde(flatten)]
    pub status: CaseStatus,
}

/// Base64 string representation for the opaque payload bytes inside the
/// on-chain JSON value.
mod opaque_payload {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// Result of listing the registry.
///
/// `skipped` counts index entries whose record could not be read or decoded;
/// those are omitted from `records` rather than failing the whole listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseListing {
    /// Successfully decoded records, newest first.
    pub records: Vec<CaseRecord>,
    /// Index entries skipped because their record was missing or malformed.
    pub skipped: usize,
}

impl CaseListing {
    /// Per-status tallies, as displayed on the dashboard.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            total: self.records.len(),
            ..StatusCounts::default()
        };
        for record in &self.records {
            match record.status {
                CaseStatus::Pending => counts.pending += 1,
                CaseStatus::Analyzed { .. } => counts.analyzed += 1,
                CaseStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

/// Case tallies by workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub analyzed: usize,
    pub rejected: usize,
}

/// Operational counters kept by the registry service.
///
/// `records_skipped`, `index_retries` and `index_conflicts` are the
/// diagnostic side channel for partial failures that the listing and the
/// index write loop deliberately do not surface as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Cases submitted successfully (record and index both written).
    pub cases_submitted: u64,
    /// Cases settled as analyzed.
    pub cases_analyzed: u64,
    /// Cases settled as rejected.
    pub cases_rejected: u64,
    /// Index entries skipped during listings (missing or malformed record).
    pub records_skipped: u64,
    /// Index write attempts retried because the index moved underneath us.
    pub index_retries: u64,
    /// Index writes abandoned after the retry budget was exhausted.
    pub index_conflicts: u64,
}
