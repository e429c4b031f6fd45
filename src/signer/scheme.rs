//! Signing scheme selection.

use std::fmt;

use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::signer::error::KeyResult;
use crate::signer::ecdsa::{self, EcdsaKey};
use crate::signer::eddsa::{self, EdDsaKey};
use crate::signer::signed::SignedTransaction;
use crate::transaction::{Crypto, Transaction, UnverifiedTransaction};

/// Which scheme produced a signature. Carries no key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    /// secp256k1 over keccak-256.
    Ecdsa,
    /// Ed25519 over keyed BLAKE2b-256.
    EdDsaBlake2b,
}

impl SchemeKind {
    /// The digest this scheme signs and uses for transaction hashes.
    pub fn digest(&self, data: &[u8]) -> KeyResult<B256> {
        match self {
            SchemeKind::Ecdsa => Ok(ecdsa::keccak_digest(data)),
            SchemeKind::EdDsaBlake2b => eddsa::blake2b_digest(data),
        }
    }

    pub fn signature_len(&self) -> usize {
        match self {
            SchemeKind::Ecdsa => ecdsa::ECDSA_SIGNATURE_LEN,
            SchemeKind::EdDsaBlake2b => eddsa::EDDSA_SIGNATURE_LEN,
        }
    }

    /// Check `signature` over `digest` against `expected` under this scheme.
    pub fn verify(&self, digest: &B256, signature: &[u8], expected: Address) -> Result<()> {
        match self {
            SchemeKind::Ecdsa => ecdsa::verify_digest(digest, signature, expected)?,
            SchemeKind::EdDsaBlake2b => eddsa::verify_digest(digest, signature, expected)?,
        }
        Ok(())
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeKind::Ecdsa => f.write_str("ECDSA"),
            SchemeKind::EdDsaBlake2b => f.write_str("EdDSA"),
        }
    }
}

/// Signing credentials: one scheme together with the key it owns.
#[derive(Debug, Clone)]
pub enum SigningScheme {
    Ecdsa(EcdsaKey),
    EdDsaBlake2b(EdDsaKey),
}

impl SigningScheme {
    /// Parse a hex private key for the given scheme.
    pub fn from_hex(kind: SchemeKind, private_key_hex: &str) -> Result<Self> {
        Ok(match kind {
            SchemeKind::Ecdsa => SigningScheme::Ecdsa(EcdsaKey::from_hex(private_key_hex)?),
            SchemeKind::EdDsaBlake2b => {
                SigningScheme::EdDsaBlake2b(EdDsaKey::from_hex(private_key_hex)?)
            }
        })
    }

    pub fn kind(&self) -> SchemeKind {
        match self {
            SigningScheme::Ecdsa(_) => SchemeKind::Ecdsa,
            SigningScheme::EdDsaBlake2b(_) => SchemeKind::EdDsaBlake2b,
        }
    }

    /// Sender address derived from the key.
    pub fn address(&self) -> Address {
        match self {
            SigningScheme::Ecdsa(key) => key.address(),
            SigningScheme::EdDsaBlake2b(key) => key.address(),
        }
    }

    /// Sign the transaction's canonical envelope.
    pub fn sign(&self, transaction: &Transaction) -> Result<SignedTransaction> {
        transaction.validate()?;

        let envelope = transaction.envelope();
        let digest = self.kind().digest(&envelope.to_bytes())?;
        let signature = match self {
            SigningScheme::Ecdsa(key) => key.sign_digest(&digest)?.to_vec(),
            SigningScheme::EdDsaBlake2b(key) => key.sign_digest(&digest).to_vec(),
        };

        let raw = UnverifiedTransaction {
            transaction: Some(envelope),
            signature: signature.clone(),
            crypto: Crypto::Default as i32,
        }
        .to_bytes();
        let hash = self.kind().digest(&raw)?;

        Ok(SignedTransaction::new(
            transaction.clone(),
            self.kind(),
            signature,
            raw,
            hash,
        ))
    }
}

impl From<EcdsaKey> for SigningScheme {
    fn from(key: EcdsaKey) -> Self {
        SigningScheme::Ecdsa(key)
    }
}

impl From<EdDsaKey> for SigningScheme {
    fn from(key: EdDsaKey) -> Self {
        SigningScheme::EdDsaBlake2b(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::transaction::TransactionError;
    use alloy::primitives::address;

    fn transaction() -> Transaction {
        Transaction::call(
            address!("0xabcdef0123456789abcdef0123456789abcdef01"),
            vec![0x4f, 0x2b, 0xe9, 0x1f],
        )
        .with_nonce(alloy::primitives::U256::from(1u64))
        .with_quota(50_000)
        .with_valid_until_block(200)
        .with_chain_id(1)
    }

    #[test]
    fn test_signature_lengths() {
        let ecdsa = SigningScheme::Ecdsa(EcdsaKey::random());
        let eddsa = SigningScheme::EdDsaBlake2b(EdDsaKey::random().unwrap());
        assert_eq!(ecdsa.sign(&transaction()).unwrap().signature().len(), 65);
        assert_eq!(eddsa.sign(&transaction()).unwrap().signature().len(), 96);
    }

    #[test]
    fn test_sign_rejects_zero_quota() {
        let scheme = SigningScheme::Ecdsa(EcdsaKey::random());
        let err = scheme.sign(&transaction().with_quota(0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Transaction(TransactionError::InvalidQuota)
        ));
    }

    #[test]
    fn test_from_hex_by_kind() {
        let scheme = SigningScheme::from_hex(
            SchemeKind::Ecdsa,
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap();
        assert_eq!(scheme.kind(), SchemeKind::Ecdsa);
        assert!(SigningScheme::from_hex(SchemeKind::EdDsaBlake2b, "zz").is_err());
    }
}
