//! NFT mint client.
//!
//! Connects a wallet, mints from the `MyEpicNFT` collection and relays the
//! contract's mint notifications.

pub mod app;
pub mod blockchain;
pub mod config;
pub mod constants;
pub mod events;
pub mod observability;
pub mod session;

pub use app::{MintApp, Notice, View};
pub use blockchain::{MintError, ProviderGateway, WalletProvider};
pub use config::MintClientConfig;
pub use session::WalletSession;
