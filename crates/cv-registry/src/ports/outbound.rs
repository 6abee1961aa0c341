//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the registry depends on. External adapters implement these to
//! provide:
//! - the on-chain key-value contract
//! - the encryption gateway
//! - the outcome analyzer
//! - wall-clock time
//!
//! Dependencies point inward: adapters implement these traits; the registry
//! service only ever sees the traits.

use async_trait::async_trait;

use crate::domain::{AnalysisError, EncryptionError, Outcome, StoreError};

// =============================================================================
// KEY-VALUE CONTRACT
// =============================================================================

/// The generic on-chain key-value contract.
///
/// This is the entire contract surface: no listing, no iteration, no
/// multi-key atomicity, no compare-and-set. Writes may fail or be rejected
/// but never partially apply within one key.
///
/// ## Implementation Notes
///
/// Both calls are long-latency network operations against an external
/// ledger. A timeout must surface as an error; the caller decides what an
/// unacknowledged write means.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// An absent key yields empty bytes, not an error.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

// =============================================================================
// ENCRYPTION GATEWAY
// =============================================================================

/// The external encryption service.
///
/// The registry hands it plaintext exactly once at submission and treats
/// the returned blob as opaque forever after. No decryption interface
/// exists here; nothing in the registry reads plaintext back.
#[async_trait]
pub trait EncryptionGateway: Send + Sync {
    async fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError>;
}

// =============================================================================
// OUTCOME ANALYZER
// =============================================================================

/// The external analysis service.
///
/// Takes the encrypted payload and produces a verdict without the registry
/// ever seeing plaintext. A production deployment puts a genuine
/// homomorphic computation behind this; the bundled adapter simulates one.
#[async_trait]
pub trait OutcomeAnalyzer: Send + Sync {
    async fn analyze(&self, payload: &[u8]) -> Result<Outcome, AnalysisError>;
}

// =============================================================================
// TIME SOURCE
// =============================================================================

/// Abstract wall-clock, so tests can pin timestamps.
pub trait TimeSource: Send + Sync {
    /// Current unix time in milliseconds.
    fn now_millis(&self) -> u64;
}
