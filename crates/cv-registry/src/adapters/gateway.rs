//! # Simulated Encryption Gateway
//!
//! Stand-in for the external homomorphic encryption service. The blob shape
//! (`FHE-` marker followed by base64) matches what the original front-end
//! produced, so stored payloads look the same on chain; the registry treats
//! the bytes as opaque either way.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::domain::EncryptionError;
use crate::ports::EncryptionGateway;

/// Marker prefix on simulated ciphertexts.
pub const SIMULATED_CIPHERTEXT_PREFIX: &str = "FHE-";

/// Reversible-encoding gateway. NOT encryption; a deployment substitutes a
/// real FHE client behind the same port.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedFheGateway;

impl SimulatedFheGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EncryptionGateway for SimulatedFheGateway {
    async fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        let mut blob = String::with_capacity(
            SIMULATED_CIPHERTEXT_PREFIX.len() + plaintext.len().div_ceil(3) * 4,
        );
        blob.push_str(SIMULATED_CIPHERTEXT_PREFIX);
        STANDARD.encode_string(plaintext, &mut blob);
        Ok(blob.into_bytes())
    }
}
