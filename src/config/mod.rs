//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, SOLANA_RPC_URL override)
//!     → validation.rs (semantic checks)
//!     → SolanaDemoConfig (validated, immutable)
//!     → passed by value into each component's constructor
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; no endpoint switching mid-session
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::SolanaDemoConfig;
pub use schema::{Commitment, IndexerConfig, LogFormat, ObservabilityConfig, PriceConfig, RpcConfig};
