//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MintClientConfig (validated, immutable)
//! ```
//!
//! All fields have defaults, so a missing file section falls back to them.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{EventConfig, MintClientConfig, ObservabilityConfig, RpcConfig};
