//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! injected wallet (provider.rs trait; client.rs + wallet.rs for a local key)
//!     → gateway.rs (detect provider, produce signer, bind contract)
//!     → contract.rs (mint call encoding, event filter and decoding)
//!     → transaction.rs (submit mint, await inclusion)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contract;
pub mod gateway;
pub mod provider;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::RpcWalletProvider;
pub use contract::NftContract;
pub use gateway::{Caller, ProviderGateway, ProviderHandle, Signer};
pub use provider::WalletProvider;
pub use transaction::MintOrchestrator;
pub use types::{
    ChainId, InclusionReceipt, MintError, MintEvent, MintResult, MintTransaction, ProviderError,
    ProviderResult, TxStatus,
};
pub use wallet::LocalWallet;
