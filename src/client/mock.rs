//! Scripted in-memory transport.
//!
//! Responses are queued per method and consumed in order; once a queue is
//! empty the method's fallback (if any) is returned for every further call.
//! Every request is recorded for later assertions.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::transport::{Transport, TransportError};

type Response = Result<Value, TransportError>;

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<Value>,
}

#[derive(Debug, Default)]
struct MockState {
    queued: HashMap<String, VecDeque<Response>>,
    fallback: HashMap<String, Response>,
    calls: Vec<RecordedCall>,
}

#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one successful result for `method`.
    pub fn push_result(&self, method: &str, result: Value) -> &Self {
        self.push(method, Ok(result))
    }

    /// Queue one failure for `method`.
    pub fn push_error(&self, method: &str, error: TransportError) -> &Self {
        self.push(method, Err(error))
    }

    /// Result returned for `method` whenever its queue is empty.
    pub fn set_fallback(&self, method: &str, result: Value) -> &Self {
        self.lock().fallback.insert(method.to_string(), Ok(result));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    fn push(&self, method: &str, response: Response) -> &Self {
        self.lock()
            .queued
            .entry(method.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// A panic in another test thread must not hide the recorded calls.
    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall {
            method: method.to_string(),
            params,
        });

        if let Some(response) = state.queued.get_mut(method).and_then(VecDeque::pop_front) {
            return response;
        }
        match state.fallback.get(method) {
            Some(response) => response.clone(),
            None => Err(TransportError::Rpc {
                method: method.to_string(),
                code: -32601,
                message: "method not scripted".to_string(),
            }),
        }
    }
}
