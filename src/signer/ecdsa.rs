//! secp256k1 keys and recoverable signatures.
//!
//! # Security
//! - Keys are never logged or serialized
//! - Signatures are RFC 6979 deterministic with low-s normalization

use alloy::primitives::{keccak256, Address, Signature, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::signer::error::{KeyError, KeyResult};
use crate::signer::scheme::SchemeKind;

/// Serialized length: `r(32) ‖ s(32) ‖ recovery_id(1)`.
pub const ECDSA_SIGNATURE_LEN: usize = 65;

/// A secp256k1 private key.
#[derive(Debug, Clone)]
pub struct EcdsaKey {
    signer: PrivateKeySigner,
}

impl EcdsaKey {
    /// Parse a hex-encoded private key, with or without `0x`.
    pub fn from_hex(private_key_hex: &str) -> KeyResult<Self> {
        let key_hex = private_key_hex
            .trim()
            .strip_prefix("0x")
            .unwrap_or(private_key_hex.trim());

        let signer: PrivateKeySigner = key_hex.parse().map_err(|e| KeyError::InvalidKey {
            scheme: SchemeKind::Ecdsa,
            reason: format!("{}", e),
        })?;

        tracing::debug!(address = %signer.address(), "Loaded ECDSA key");
        Ok(Self { signer })
    }

    /// Generate a fresh random key.
    pub fn random() -> Self {
        Self {
            signer: PrivateKeySigner::random(),
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a 32-byte digest.
    pub fn sign_digest(&self, digest: &B256) -> KeyResult<[u8; ECDSA_SIGNATURE_LEN]> {
        let signature = self
            .signer
            .sign_hash_sync(digest)
            .map_err(|e| KeyError::Signing {
                scheme: SchemeKind::Ecdsa,
                reason: e.to_string(),
            })?;

        let mut out = [0u8; ECDSA_SIGNATURE_LEN];
        out[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
        out[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());
        out[64] = signature.v() as u8;
        Ok(out)
    }
}

/// keccak-256, the digest used by the ECDSA scheme.
pub fn keccak_digest(data: &[u8]) -> B256 {
    keccak256(data)
}

/// Recover the signer of `digest` and compare it against `expected`.
pub fn verify_digest(digest: &B256, signature: &[u8], expected: Address) -> KeyResult<()> {
    let fail = |reason: String| KeyError::Verification {
        scheme: SchemeKind::Ecdsa,
        reason,
    };

    if signature.len() != ECDSA_SIGNATURE_LEN {
        return Err(fail(format!(
            "expected {} signature bytes, got {}",
            ECDSA_SIGNATURE_LEN,
            signature.len()
        )));
    }

    let y_parity = match signature[64] {
        0 => false,
        1 => true,
        other => return Err(fail(format!("recovery id must be 0 or 1, got {}", other))),
    };
    let parsed = Signature::new(
        U256::from_be_slice(&signature[..32]),
        U256::from_be_slice(&signature[32..64]),
        y_parity,
    );

    let recovered = parsed
        .recover_address_from_prehash(digest)
        .map_err(|e| fail(e.to_string()))?;
    if recovered != expected {
        return Err(fail(format!(
            "recovered signer {} does not match {}",
            recovered, expected
        )));
    }
    Ok(())
}
