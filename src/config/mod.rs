//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → sections handed to HttpTransport, TransactionManager, WorkerPool
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - No process-wide settings; each component receives its own section

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ChainConfig, ClientConfig, ConfirmationConfig, NonceConfig, NonceStrategy,
    ObservabilityConfig, RpcConfig, RuntimeConfig,
};
pub use validation::{validate_config, ValidationError};
