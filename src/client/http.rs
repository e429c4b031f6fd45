//! JSON-RPC over HTTP.
//!
//! # Responsibilities
//! - Frame requests as JSON-RPC 2.0 with a per-transport request id
//! - Map HTTP, timeout and JSON-RPC error objects to [`TransportError`]
//! - Optionally log raw payloads (`RpcConfig::log_payloads`)

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::transport::{Transport, TransportError};
use crate::config::schema::RpcConfig;
use crate::observability::metrics;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Vec<Value>,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// HTTP transport backed by a shared `reqwest` client.
#[derive(Debug)]
pub struct HttpTransport {
    url: url::Url,
    client: reqwest::Client,
    timeout_secs: u64,
    log_payloads: bool,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Build a transport from RPC configuration.
    pub fn new(config: &RpcConfig) -> Result<Self, TransportError> {
        let url: url::Url = config.url.parse().map_err(|e| TransportError::Http {
            method: "connect".to_string(),
            reason: format!("invalid RPC URL '{}': {}", config.url, e),
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Http {
                method: "connect".to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!(
            rpc_url = %url,
            timeout_secs = config.timeout_secs,
            "JSON-RPC transport initialized"
        );

        Ok(Self {
            url,
            client,
            timeout_secs: config.timeout_secs,
            log_payloads: config.log_payloads,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id(),
        };

        if self.log_payloads {
            tracing::debug!(
                method = method,
                id = request.id,
                payload = %serde_json::to_string(&request).unwrap_or_default(),
                "JSON-RPC request"
            );
        }
        metrics::record_rpc_request(method);

        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| classify(method, self.timeout_secs, e))?
            .error_for_status()
            .map_err(|e| classify(method, self.timeout_secs, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| classify(method, self.timeout_secs, e))?;

        if self.log_payloads {
            tracing::debug!(method = method, id = request.id, payload = %body, "JSON-RPC response");
        }

        parse_response(method, &body)
    }
}

fn classify(method: &str, timeout_secs: u64, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            method: method.to_string(),
            timeout_secs,
        }
    } else {
        TransportError::Http {
            method: method.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Extract `result` or map the error object. A missing `result` is `null`.
fn parse_response(method: &str, body: &str) -> Result<Value, TransportError> {
    let response: JsonRpcResponse =
        serde_json::from_str(body).map_err(|e| TransportError::decode(method, e))?;

    if let Some(error) = response.error {
        return Err(TransportError::Rpc {
            method: method.to_string(),
            code: error.code,
            message: error.message,
        });
    }
    Ok(response.result.unwrap_or(Value::Null))
}
