//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! client, manager, remote:
//!     → tracing events (tx_hash, nonce, attempt, method fields)
//!     → metrics.rs counters (metrics facade)
//!
//! Consumers (installed by the application):
//!     → logging.rs init_logging (tracing-subscriber, plain or JSON)
//!     → any metrics recorder/exporter
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber or recorder on its own
//! - Metrics are cheap (atomic increments, no-ops without a recorder)

pub mod logging;
pub mod metrics;
