//! User-facing messages.

use std::fmt;

use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;

use crate::blockchain::types::{ChainId, MintError, MintEvent};
use crate::constants::{EXPLORER_TX_URL, VIEWER_BASE_URL};

/// Link to view a minted token.
pub fn viewer_link(contract: Address, token_id: U256) -> String {
    format!("{}/{}/{}", VIEWER_BASE_URL, contract, token_id)
}

/// Link to a transaction on the block explorer.
pub fn explorer_link(tx_hash: TxHash) -> String {
    format!("{}/{}", EXPLORER_TX_URL, tx_hash)
}

/// A message the UI shows as an alert or banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// No wallet is installed.
    InstallWallet,
    /// The wallet granted access.
    Connected { account: Address },
    /// The user declined, or the prompt failed.
    AuthorizationDenied { reason: String },
    /// The wallet is on another network.
    WrongNetwork { expected: ChainId, actual: ChainId },
    /// The network could not be checked.
    NetworkUnverified { reason: String },
    /// Mint was requested before the session was ready.
    NotReady { reason: String },
    /// The mint transaction was sent and is being mined.
    MintSubmitted { tx_hash: TxHash },
    /// The mint transaction was included.
    Minted { tx_hash: TxHash, explorer_link: String },
    /// The mint attempt failed; the user may try again.
    MintFailed {
        reason: String,
        tx_hash: Option<TxHash>,
        explorer_link: Option<String>,
    },
    /// The contract reported a minted token.
    MintCompleted {
        recipient: Address,
        token_id: U256,
        viewer_link: String,
    },
}

impl Notice {
    /// Notice for a mint error. Malformed events are never shown.
    pub fn from_error(error: &MintError) -> Option<Self> {
        let notice = match error {
            MintError::ProviderAbsent | MintError::ProviderUnavailable => Notice::InstallWallet,
            MintError::AuthorizationDenied(reason) => Notice::AuthorizationDenied {
                reason: reason.clone(),
            },
            MintError::WrongNetwork { expected, actual } => Notice::WrongNetwork {
                expected: *expected,
                actual: *actual,
            },
            MintError::SessionNotReady(reason) => Notice::NotReady {
                reason: reason.clone(),
            },
            MintError::SubmissionFailed(reason) => Notice::MintFailed {
                reason: reason.clone(),
                tx_hash: None,
                explorer_link: None,
            },
            MintError::InclusionFailed { hash, reason } => Notice::MintFailed {
                reason: reason.clone(),
                tx_hash: *hash,
                explorer_link: hash.map(explorer_link),
            },
            MintError::MalformedEvent(_) => return None,
        };
        Some(notice)
    }

    /// Notice for a mint notification from `contract`.
    pub fn mint_completed(contract: Address, event: &MintEvent) -> Self {
        Notice::MintCompleted {
            recipient: event.recipient,
            token_id: event.token_id,
            viewer_link: viewer_link(contract, event.token_id),
        }
    }

    /// Successful inclusion.
    pub fn minted(tx_hash: TxHash) -> Self {
        Notice::Minted {
            tx_hash,
            explorer_link: explorer_link(tx_hash),
        }
    }

    /// Whether the notice reports a problem.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Notice::InstallWallet
                | Notice::AuthorizationDenied { .. }
                | Notice::WrongNetwork { .. }
                | Notice::NetworkUnverified { .. }
                | Notice::NotReady { .. }
                | Notice::MintFailed { .. }
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InstallWallet => write!(f, "Get a wallet! No Ethereum wallet was detected."),
            Notice::Connected { account } => write!(f, "Connected {}", account),
            Notice::AuthorizationDenied { reason } => {
                write!(f, "Wallet connection was not authorized: {}", reason)
            }
            Notice::WrongNetwork { expected, actual } => write!(
                f,
                "You are not connected to the Sepolia test network! (expected {}, wallet is on {})",
                expected, actual
            ),
            Notice::NetworkUnverified { reason } => {
                write!(f, "Could not verify the wallet network: {}", reason)
            }
            Notice::NotReady { reason } => write!(f, "Cannot mint yet: {}", reason),
            Notice::MintSubmitted { tx_hash } => write!(f, "Mining {}...please wait.", tx_hash),
            Notice::Minted { explorer_link, .. } => {
                write!(f, "Mined, see transaction: {}", explorer_link)
            }
            Notice::MintFailed {
                reason,
                explorer_link,
                ..
            } => match explorer_link {
                Some(link) => write!(f, "Mint failed: {} ({})", reason, link),
                None => write!(f, "Mint failed: {}", reason),
            },
            Notice::MintCompleted { viewer_link, .. } => write!(
                f,
                "We've minted your NFT and sent it to your wallet. It may take a few minutes to show up. Here's the link: {}",
                viewer_link
            ),
        }
    }
}
