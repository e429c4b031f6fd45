//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use appchain_client::client::{AppChainClient, MockTransport};
use appchain_client::config::ClientConfig;
use appchain_client::manager::{Sleeper, TransactionManager};
use appchain_client::signer::EcdsaKey;
use appchain_client::transaction::{TransactionEnvelope, UnverifiedTransaction};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Well-known development key; its address is 0xf39f…2266.
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Counts sleeps instead of waiting.
#[derive(Default)]
pub struct CountingSleeper {
    sleeps: AtomicU32,
}

impl CountingSleeper {
    pub fn sleeps(&self) -> u32 {
        self.sleeps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, _duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
    }
}

/// An ECDSA manager over `mock` that never really sleeps.
pub fn ecdsa_manager(
    mock: &Arc<MockTransport>,
    config: &ClientConfig,
    sleeper: Arc<CountingSleeper>,
) -> TransactionManager {
    let key = EcdsaKey::from_hex(TEST_PRIVATE_KEY).unwrap();
    TransactionManager::new(AppChainClient::new(mock.clone()), key.into(), config)
        .with_sleeper(sleeper)
}

pub fn hash_hex(byte: &str) -> String {
    format!("0x{}", byte.repeat(32))
}

/// A `sendRawTransaction` result the node accepted.
pub fn accepted(byte: &str) -> Value {
    json!({"hash": hash_hex(byte), "status": "OK"})
}

pub fn receipt(byte: &str, contract: Option<&str>, error: Option<&str>) -> Value {
    json!({
        "transactionHash": hash_hex(byte),
        "transactionIndex": "0x0",
        "blockHash": hash_hex("bb"),
        "blockNumber": "0x65",
        "quotaUsed": "0x5208",
        "contractAddress": contract,
        "logs": [],
        "errorMessage": error,
    })
}

/// Decode every raw transaction the mock received, in order.
pub fn submitted(mock: &MockTransport) -> Vec<(UnverifiedTransaction, TransactionEnvelope)> {
    mock.calls()
        .into_iter()
        .filter(|call| call.method == "sendRawTransaction")
        .map(|call| {
            let raw = call.params[0].as_str().unwrap().trim_start_matches("0x").to_string();
            let decoded = UnverifiedTransaction::from_bytes(&hex::decode(raw).unwrap()).unwrap();
            let envelope = decoded.transaction.clone().unwrap();
            (decoded, envelope)
        })
        .collect()
}

/// Start a JSON-RPC node stub. `f` receives each request body and returns
/// the response body.
pub async fn start_rpc_backend<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Value> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_json_body(&mut socket).await else {
                            return;
                        };
                        let body = f(request).await.to_string();
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a backend that accepts connections and never answers.
pub async fn start_silent_backend(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
}

async fn read_json_body(socket: &mut tokio::net::TcpStream) -> Option<Value> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(split) = text.find("\r\n\r\n") {
            let headers = text[..split].to_ascii_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = split + 4;
            if buf.len() >= body_start + length {
                return serde_json::from_slice(&buf[body_start..body_start + length]).ok();
            }
        }
    }
}
