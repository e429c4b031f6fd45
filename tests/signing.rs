//! Signing pipeline against known vectors.

use std::sync::Arc;

use alloy::primitives::{address, b256, Address, U256};
use appchain_client::client::MockTransport;
use appchain_client::config::ClientConfig;
use appchain_client::manager::TransactionRequest;
use appchain_client::signer::{EcdsaKey, EdDsaKey, SchemeKind, SigningScheme};
use appchain_client::transaction::{Crypto, Transaction, UnverifiedTransaction};
use appchain_client::Error;
use serde_json::json;

mod common;

const TO: Address = address!("0xabcdef0123456789abcdef0123456789abcdef01");

const EXPECTED_RAW: &str = "0x0a5e0a28616263646566303132333435363738396162636465663031323334353637\
    38396162636465663031120131\
    18d0860320c8012a044f2be91f3220000000000000000000000000000000000000000000000000000000000000\
    000038011241a4af08d7423afb1529529fc8273665c17aeac966fd12c531858b9401771872b770a4cc54bcf880\
    1c5385f7c5115b77b8b6b6ff6d866266cd685a81ac52b5624101";

fn fixture_transaction() -> Transaction {
    Transaction::call(TO, vec![0x4f, 0x2b, 0xe9, 0x1f])
        .with_nonce(U256::from(1u64))
        .with_quota(50_000)
        .with_valid_until_block(200)
        .with_version(0)
        .with_chain_id(1)
}

#[test]
fn test_ecdsa_raw_transaction_matches_known_vector() {
    let scheme = SigningScheme::from_hex(SchemeKind::Ecdsa, common::TEST_PRIVATE_KEY).unwrap();
    assert_eq!(
        scheme.address(),
        address!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266")
    );

    let signed = scheme.sign(&fixture_transaction()).unwrap();
    assert_eq!(signed.to_hex(), EXPECTED_RAW);
    assert_eq!(
        signed.hash(),
        b256!("0x94fc54483320b240498431a5b2fd70598b27c895d7ca8b01e16400048ec32469")
    );
    assert_eq!(signed.signature().len(), 65);
    assert_eq!(signed.signature()[64], 1);
    signed.verify(scheme.address()).unwrap();
}

#[tokio::test]
async fn test_manager_broadcasts_known_vector() {
    let mock = Arc::new(MockTransport::new());
    mock.push_result("getTransactionCount", json!("0x1")).push_result(
        "sendRawTransaction",
        json!({
            "hash": "0x94fc54483320b240498431a5b2fd70598b27c895d7ca8b01e16400048ec32469",
            "status": "OK"
        }),
    );
    let manager = common::ecdsa_manager(&mock, &ClientConfig::default(), Default::default());

    let request = TransactionRequest::call(TO, vec![0x4f, 0x2b, 0xe9, 0x1f], 50_000)
        .with_valid_until_block(200);
    let tx_hash = manager.send_transaction(request).await.unwrap();

    assert_eq!(
        tx_hash,
        b256!("0x94fc54483320b240498431a5b2fd70598b27c895d7ca8b01e16400048ec32469")
    );
    let raw = mock
        .calls()
        .into_iter()
        .find(|call| call.method == "sendRawTransaction")
        .unwrap();
    assert_eq!(raw.params[0], json!(EXPECTED_RAW));
}

#[test]
fn test_eddsa_signature_layout() {
    let key = EdDsaKey::from_seed(&[7u8; 32]).unwrap();
    let scheme = SigningScheme::from(key.clone());
    let signed = scheme.sign(&fixture_transaction()).unwrap();

    assert_eq!(signed.signature().len(), 96);
    assert_eq!(&signed.signature()[64..], &key.public_key());
    signed.verify(key.address()).unwrap();

    let decoded = UnverifiedTransaction::from_bytes(signed.raw()).unwrap();
    assert_eq!(decoded.crypto, Crypto::Default as i32);
    assert_eq!(decoded.signature, signed.signature().to_vec());
}

#[test]
fn test_signature_does_not_verify_under_other_scheme() {
    let ecdsa = SigningScheme::from(EcdsaKey::random());
    let eddsa = SigningScheme::from(EdDsaKey::random().unwrap());
    let tx = fixture_transaction();

    let by_ecdsa = ecdsa.sign(&tx).unwrap();
    let by_eddsa = eddsa.sign(&tx).unwrap();

    assert!(by_ecdsa.verify_as(SchemeKind::EdDsaBlake2b, ecdsa.address()).is_err());
    assert!(by_eddsa.verify_as(SchemeKind::Ecdsa, eddsa.address()).is_err());
    assert!(by_ecdsa.verify(eddsa.address()).is_err());
}

#[test]
fn test_zero_quota_is_not_signed() {
    let scheme = SigningScheme::from(EcdsaKey::random());
    let tx = Transaction::call(TO, Vec::<u8>::new()).with_value(U256::from(1));
    assert!(matches!(scheme.sign(&tx), Err(Error::Transaction(_))));
}
