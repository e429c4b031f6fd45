//! JSON-RPC over HTTP against a local node stub.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use appchain_client::client::{AppChainClient, BlockTag, HttpTransport, Transport, TransportError};
use appchain_client::config::RpcConfig;
use serde_json::{json, Value};

mod common;

fn rpc_config(addr: SocketAddr, timeout_secs: u64) -> RpcConfig {
    RpcConfig {
        url: format!("http://{}", addr),
        timeout_secs,
        log_payloads: true,
    }
}

#[tokio::test]
async fn test_requests_are_framed_and_results_parsed() {
    let addr: SocketAddr = "127.0.0.1:28381".parse().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();
    common::start_rpc_backend(addr, move |request| {
        recorded.lock().unwrap().push(request.clone());
        async move {
            let result = match request["method"].as_str() {
                Some("blockNumber") => json!("0x1f"),
                Some("getBalance") => json!("0xde0b6b3a7640000"),
                _ => Value::Null,
            };
            json!({"jsonrpc": "2.0", "id": request["id"], "result": result})
        }
    })
    .await;

    let transport = HttpTransport::new(&rpc_config(addr, 5)).unwrap();
    let client = AppChainClient::new(Arc::new(transport));

    assert_eq!(client.block_number().await.unwrap(), 31);
    let balance = client.get_balance(Address::ZERO, BlockTag::Number(16)).await.unwrap();
    assert_eq!(balance, U256::from(1_000_000_000_000_000_000u64));

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0]["jsonrpc"], json!("2.0"));
    assert_eq!(seen[0]["method"], json!("blockNumber"));
    assert_eq!(seen[0]["params"], json!([]));
    assert_eq!(seen[0]["id"], json!(1));
    assert_eq!(seen[1]["id"], json!(2));
    assert_eq!(seen[1]["params"][1], json!("0x10"));
}

#[tokio::test]
async fn test_rpc_error_object_is_mapped() {
    let addr: SocketAddr = "127.0.0.1:28382".parse().unwrap();
    common::start_rpc_backend(addr, |request| async move {
        json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "error": {"code": -32602, "message": "invalid params"}
        })
    })
    .await;

    let transport = HttpTransport::new(&rpc_config(addr, 5)).unwrap();
    let err = transport.send("peerCount", vec![]).await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Rpc {
            method: "peerCount".to_string(),
            code: -32602,
            message: "invalid params".to_string(),
        }
    );
}

#[tokio::test]
async fn test_missing_receipt_is_none() {
    let addr: SocketAddr = "127.0.0.1:28383".parse().unwrap();
    common::start_rpc_backend(addr, |request| async move {
        json!({"jsonrpc": "2.0", "id": request["id"], "result": null})
    })
    .await;

    let client = AppChainClient::from_config(&rpc_config(addr, 5)).unwrap();
    let receipt = client
        .get_transaction_receipt(alloy::primitives::B256::ZERO)
        .await
        .unwrap();
    assert!(receipt.is_none());
}

#[tokio::test]
async fn test_slow_node_times_out() {
    let addr: SocketAddr = "127.0.0.1:28384".parse().unwrap();
    common::start_silent_backend(addr).await;

    let transport = HttpTransport::new(&rpc_config(addr, 1)).unwrap();
    let err = transport.send("blockNumber", vec![]).await.unwrap_err();
    assert!(matches!(err, TransportError::Timeout { timeout_secs: 1, .. }));
}

#[tokio::test]
async fn test_unreachable_node_is_http_error() {
    let transport = HttpTransport::new(&rpc_config("127.0.0.1:28389".parse().unwrap(), 2)).unwrap();
    let err = transport.send("blockNumber", vec![]).await.unwrap_err();
    assert!(matches!(err, TransportError::Http { .. }));
}
