//! # Codecs
//!
//! Byte encodings for the two kinds of value the registry persists: the
//! index (a JSON array of record keys) and individual records (a JSON
//! object with a tagged status). The contract stores raw bytes; everything
//! here is the only place those bytes are interpreted.

use super::entities::{CaseKey, CaseRecord};
use super::errors::RegistryError;

/// The ordered set of record keys, as stored under the index key.
///
/// Order is insertion order; consumers re-sort by `created_at` anyway.
/// No key appears twice: `append` is idempotent and `decode` drops
/// duplicates a misbehaving external writer may have introduced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseIndex {
    keys: Vec<CaseKey>,
}

impl CaseIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode the index from stored bytes.
    ///
    /// Empty bytes are the first-use state and decode to the empty index.
    /// Anything else must be a JSON array of key strings.
    pub fn decode(bytes: &[u8]) -> Result<Self, RegistryError> {
        if bytes.is_empty() {
            return Ok(Self::empty());
        }
        let raw: Vec<CaseKey> =
            serde_json::from_slice(bytes).map_err(|err| RegistryError::DecodeError {
                what: "case index",
                reason: err.to_string(),
            })?;
        let mut index = Self::empty();
        for key in raw {
            index.append(key);
        }
        Ok(index)
    }

    pub fn encode(&self) -> Result<Vec<u8>, RegistryError> {
        serde_json::to_vec(&self.keys).map_err(|err| RegistryError::DecodeError {
            what: "case index",
            reason: err.to_string(),
        })
    }

    /// Append a key if it is not already present. Returns `false` when the
    /// key was already there (nothing to write back).
    pub fn append(&mut self, key: CaseKey) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    pub fn contains(&self, key: &CaseKey) -> bool {
        self.keys.iter().any(|existing| existing == key)
    }

    pub fn keys(&self) -> &[CaseKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl CaseRecord {
    /// Encode for storage under `record:<key>`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RegistryError> {
        serde_json::to_vec(self).map_err(|err| RegistryError::DecodeError {
            what: "case record",
            reason: err.to_string(),
        })
    }

    /// Decode a stored record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RegistryError> {
        serde_json::from_slice(bytes).map_err(|err| RegistryError::DecodeError {
            what: "case record",
            reason: err.to_string(),
        })
    }
}
