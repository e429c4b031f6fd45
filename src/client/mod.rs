//! Node access over JSON-RPC.
//!
//! # Data Flow
//! ```text
//! AppChainClient (typed methods)
//!     → Transport::send(method, params)
//!         → HttpTransport (reqwest, JSON-RPC 2.0 framing)
//!         → MockTransport (scripted, for tests)
//!     ← result Value → parsed quantities / Receipt
//! ```
//!
//! # Design Decisions
//! - One `Arc<dyn Transport>` is shared by every manager; requests are stateless
//! - Payload logging is a per-transport setting, not global state

#[allow(clippy::module_inception)]
pub mod client;
pub mod http;
pub mod mock;
pub mod transport;
pub mod types;

pub use client::AppChainClient;
pub use http::HttpTransport;
pub use mock::{MockTransport, RecordedCall};
pub use transport::{Transport, TransportError};
pub use types::{BlockTag, CallRequest, Receipt, SendTransactionResult};
