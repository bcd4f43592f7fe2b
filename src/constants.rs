//! Build-time constants for the deployed collection.
//!
//! None of these are runtime configurable. Redeploying the contract means
//! editing this file and rebuilding.

use alloy::primitives::{address, Address};

use crate::blockchain::types::ChainId;

/// Address of the deployed `MyEpicNFT` contract.
pub const CONTRACT_ADDRESS: Address = address!("409661842C654CA37b16118f6cF8615970663CF8");

/// The only network the contract is deployed on (Sepolia, `0xaa36a7`).
pub const REQUIRED_CHAIN: ChainId = ChainId(11_155_111);

/// Social handle shown in the footer.
pub const TWITTER_HANDLE: &str = "factfullness86";

/// Base URL of the NFT viewer used in mint-completed notices.
pub const VIEWER_BASE_URL: &str = "https://gemcase.vercel.app/view/evm/sepolia";

/// Base URL of the block explorer used after a mint is included.
pub const EXPLORER_TX_URL: &str = "https://sepolia.etherscan.io/tx";

/// Link to the social profile.
pub fn twitter_link() -> String {
    format!("https://twitter.com/{}", TWITTER_HANDLE)
}

/// Label rendered next to the social link.
pub fn twitter_label() -> String {
    format!("built on @{}", TWITTER_HANDLE)
}
