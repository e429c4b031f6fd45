//! Ed25519 keys with BLAKE2b digests.
//!
//! The digest is BLAKE2b-256 keyed with the 16-byte constant
//! `CryptapeCryptape`. The public key is not recoverable from an Ed25519
//! signature, so it travels with it: `signature(64) ‖ public_key(32)`.

use alloy::primitives::{Address, B256};
use blake2::digest::consts::U32;
use blake2::digest::{KeyInit, Mac};
use blake2::Blake2bMac;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::signer::error::{KeyError, KeyResult};
use crate::signer::scheme::SchemeKind;

/// Key for the BLAKE2b digest.
pub const BLAKE2B_KEY: &[u8; 16] = b"CryptapeCryptape";

/// Serialized length: `signature(64) ‖ public_key(32)`.
pub const EDDSA_SIGNATURE_LEN: usize = 96;

/// An Ed25519 private key.
#[derive(Clone)]
pub struct EdDsaKey {
    signing_key: SigningKey,
    address: Address,
}

impl std::fmt::Debug for EdDsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdDsaKey")
            .field("address", &self.address())
            .finish()
    }
}

impl EdDsaKey {
    /// Parse a hex-encoded key: a 32-byte seed, or a 64-byte `seed ‖ public`
    /// keypair whose public half must match the seed.
    pub fn from_hex(private_key_hex: &str) -> KeyResult<Self> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(key_hex).map_err(|e| invalid(e.to_string()))?;

        match bytes.len() {
            32 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(&bytes);
                Self::from_seed(&seed)
            }
            64 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(&bytes[..32]);
                let key = Self::from_seed(&seed)?;
                if key.public_key() != bytes[32..] {
                    return Err(invalid("public half does not match the seed".to_string()));
                }
                Ok(key)
            }
            n => Err(invalid(format!("expected 32 or 64 bytes, got {}", n))),
        }
    }

    pub fn from_seed(seed: &[u8; 32]) -> KeyResult<Self> {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Generate a fresh random key.
    pub fn random() -> KeyResult<Self> {
        Self::from_signing_key(SigningKey::generate(&mut rand::rngs::OsRng))
    }

    fn from_signing_key(signing_key: SigningKey) -> KeyResult<Self> {
        let address = address_of(&signing_key.verifying_key().to_bytes())?;
        Ok(Self {
            signing_key,
            address,
        })
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Last 20 bytes of the BLAKE2b digest of the public key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a digest; the output carries the public key.
    pub fn sign_digest(&self, digest: &B256) -> [u8; EDDSA_SIGNATURE_LEN] {
        let signature = self.signing_key.sign(digest.as_slice());
        let mut out = [0u8; EDDSA_SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64..].copy_from_slice(&self.public_key());
        out
    }
}

fn invalid(reason: String) -> KeyError {
    KeyError::InvalidKey {
        scheme: SchemeKind::EdDsaBlake2b,
        reason,
    }
}

/// Keyed BLAKE2b-256, the digest used by the EdDSA scheme.
pub fn blake2b_digest(data: &[u8]) -> KeyResult<B256> {
    let mut mac = <Blake2bMac<U32> as KeyInit>::new_from_slice(BLAKE2B_KEY).map_err(|e| {
        KeyError::Signing {
            scheme: SchemeKind::EdDsaBlake2b,
            reason: format!("BLAKE2b key rejected: {}", e),
        }
    })?;
    mac.update(data);
    Ok(B256::from_slice(&mac.finalize().into_bytes()))
}

pub fn address_of(public_key: &[u8; 32]) -> KeyResult<Address> {
    Ok(Address::from_slice(&blake2b_digest(public_key)?[12..]))
}

/// Verify `signature ‖ public_key` over `digest` and check the key's address.
pub fn verify_digest(digest: &B256, signature: &[u8], expected: Address) -> KeyResult<()> {
    let fail = |reason: String| KeyError::Verification {
        scheme: SchemeKind::EdDsaBlake2b,
        reason,
    };

    if signature.len() != EDDSA_SIGNATURE_LEN {
        return Err(fail(format!(
            "expected {} signature bytes, got {}",
            EDDSA_SIGNATURE_LEN,
            signature.len()
        )));
    }

    let mut sig_bytes = [0u8; 64];
    sig_bytes.copy_from_slice(&signature[..64]);
    let mut public = [0u8; 32];
    public.copy_from_slice(&signature[64..]);

    let signer = address_of(&public)?;
    if signer != expected {
        return Err(fail(format!(
            "embedded public key belongs to {}, not {}",
            signer, expected
        )));
    }

    let verifying_key = VerifyingKey::from_bytes(&public).map_err(|e| fail(e.to_string()))?;
    verifying_key
        .verify(digest.as_slice(), &Signature::from_bytes(&sig_bytes))
        .map_err(|e| fail(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake2b_known_vector() {
        assert_eq!(
            hex::encode(blake2b_digest(b"").unwrap()),
            "d67f729f8d19ed2e92f817cf5c31c7812dd39ed35b0b1aae41c7665f46c36b9f"
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let key = EdDsaKey::from_seed(&[7u8; 32]).unwrap();
        let digest = blake2b_digest(b"appchain").unwrap();
        let signature = key.sign_digest(&digest);
        assert_eq!(&signature[64..], &key.public_key());
        verify_digest(&digest, &signature, key.address()).unwrap();

        // RFC 8032 signatures are deterministic.
        assert_eq!(signature, key.sign_digest(&digest));
    }

    #[test]
    fn test_verify_rejects_tampered_digest() {
        let key = EdDsaKey::random().unwrap();
        let signature = key.sign_digest(&blake2b_digest(b"one").unwrap());
        let other = blake2b_digest(b"two").unwrap();
        assert!(verify_digest(&other, &signature, key.address()).is_err());
    }

    #[test]
    fn test_from_hex_keypair_forms() {
        let key = EdDsaKey::from_seed(&[1u8; 32]).unwrap();
        let seed_hex = hex::encode([1u8; 32]);
        assert_eq!(EdDsaKey::from_hex(&seed_hex).unwrap().address(), key.address());

        let pair_hex = format!("0x{}{}", seed_hex, hex::encode(key.public_key()));
        assert_eq!(EdDsaKey::from_hex(&pair_hex).unwrap().address(), key.address());

        let bad_pair = format!("{}{}", seed_hex, "00".repeat(32));
        assert!(EdDsaKey::from_hex(&bad_pair).is_err());
        assert!(EdDsaKey::from_hex("abcd").is_err());
    }

    #[test]
    fn test_address_matches_public_key_digest() {
        let key = EdDsaKey::from_seed(&[9u8; 32]).unwrap();
        let digest = blake2b_digest(&key.public_key()).unwrap();
        assert_eq!(key.address().as_slice(), &digest[12..]);
        assert_eq!(address_of(&key.public_key()).unwrap(), key.address());
    }
}
