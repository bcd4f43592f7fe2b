//! Configuration schema definitions.
//!
//! This module defines the runtime settings of the mint client.
//! All types derive Serde traits for deserialization from config files.
//! Contract address and target network live in [`crate::constants`].

use serde::{Deserialize, Serialize};

/// Root configuration for the mint client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MintClientConfig {
    /// JSON-RPC and transaction settings.
    pub rpc: RpcConfig,

    /// Mint notification listener settings.
    pub events: EventConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// JSON-RPC connection and transaction confirmation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required before a mint counts as included.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for a mint to be included, in seconds.
    pub inclusion_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub receipt_poll_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            inclusion_timeout_secs: 300,
            receipt_poll_ms: 2000,
        }
    }
}

/// Mint notification listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EventConfig {
    /// Log polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Notifications held for the consumer before the listener pauses.
    pub buffer_size: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 4000,
            buffer_size: 64,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
