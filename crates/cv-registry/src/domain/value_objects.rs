//! # Value Objects
//!
//! Well-known store keys, vocabulary constants, and registry configuration.

use serde::{Deserialize, Serialize};

use super::entities::CaseKey;

/// Well-known key the index (the ordered set of record keys) lives under.
///
/// The backing contract has no way to enumerate keys, so this single entry
/// is the registry's only way to find its records again.
pub const INDEX_KEY: &str = "case_keys";

/// Prefix for record entries in the contract's flat namespace.
pub const RECORD_KEY_PREFIX: &str = "record:";

/// Storage key for a case record.
pub fn record_key(key: &CaseKey) -> String {
    format!("{RECORD_KEY_PREFIX}{key}")
}

/// Categories the submission form offers. The registry accepts any
/// non-empty category string; this list is for callers building pickers.
pub const WELL_KNOWN_CATEGORIES: [&str; 6] = [
    "Contract",
    "Intellectual",
    "Employment",
    "Personal",
    "Corporate",
    "Criminal",
];

/// Configuration for the registry service.
///
/// Controls the retry budgets around the two generation/write loops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Attempts for the index read-verify-write loop before giving up
    /// with an index conflict.
    pub max_index_write_attempts: u32,
    /// Attempts to generate a record key that is free in the store.
    pub max_key_attempts: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_index_write_attempts: 5,
            max_key_attempts: 4,
        }
    }
}
