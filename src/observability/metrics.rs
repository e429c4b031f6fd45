//! Metrics collection.
//!
//! Counters go through the `metrics` facade; the embedding application
//! chooses and installs a recorder. Without one, every update is a no-op.
//!
//! # Metrics
//! - `appchain_rpc_requests_total` (counter): JSON-RPC requests by method
//! - `appchain_transactions_submitted_total` (counter): raw transactions broadcast
//! - `appchain_receipt_polls_total` (counter): `getTransactionReceipt` attempts
//! - `appchain_transactions_finished_total` (counter): terminal outcomes by `outcome`

use metrics::counter;

/// Terminal outcome label for `appchain_transactions_finished_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Confirmed,
    Reverted,
    TimedOut,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Confirmed => "confirmed",
            Outcome::Reverted => "reverted",
            Outcome::TimedOut => "timed_out",
        }
    }
}

pub fn record_rpc_request(method: &str) {
    counter!("appchain_rpc_requests_total", "method" => method.to_string()).increment(1);
}

pub fn record_submission() {
    counter!("appchain_transactions_submitted_total").increment(1);
}

pub fn record_receipt_poll() {
    counter!("appchain_receipt_polls_total").increment(1);
}

pub fn record_outcome(outcome: Outcome) {
    counter!("appchain_transactions_finished_total", "outcome" => outcome.as_str()).increment(1);
}
