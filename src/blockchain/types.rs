//! Chain-specific types and error definitions.

use std::fmt;

use alloy::primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chain ID type for strong typing.
///
/// Displays the way wallets report it from `eth_chainId` (`0xaa36a7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Errors reported by a wallet provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The user declined the request in the wallet UI (EIP-1193 code 4001).
    #[error("user rejected the request")]
    UserRejected,

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),
}

/// Result type for wallet provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors surfaced by the mint flow.
///
/// Every variant is non-fatal: the app layer turns them into a log entry
/// and, where the user has to act, a notice.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MintError {
    /// No wallet is installed.
    #[error("no wallet provider detected")]
    ProviderAbsent,

    /// A signer was requested while no provider is present.
    #[error("wallet provider unavailable")]
    ProviderUnavailable,

    /// The user declined the authorization prompt, or it errored.
    #[error("wallet authorization denied: {0}")]
    AuthorizationDenied(String),

    /// The wallet is connected to a different network.
    #[error("wrong network: expected {expected}, connected to {actual}")]
    WrongNetwork { expected: ChainId, actual: ChainId },

    /// Mint was requested before the session reached `NetworkVerified`.
    #[error("session not ready for minting: {0}")]
    SessionNotReady(String),

    /// The mint call was rejected or errored before leaving the client.
    #[error("mint submission failed: {0}")]
    SubmissionFailed(String),

    /// The transaction was sent but not confirmed.
    #[error("mint transaction {} failed: {}", display_hash(.hash), .reason)]
    InclusionFailed { hash: Option<TxHash>, reason: String },

    /// A mint notification was missing expected fields.
    #[error("malformed mint event: {0}")]
    MalformedEvent(String),
}

fn display_hash(hash: &Option<TxHash>) -> String {
    hash.map(|h| h.to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

/// Result type for mint flow operations.
pub type MintResult<T> = Result<T, MintError>;

/// Lifecycle status of a mint transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// Submitted, not yet included.
    Pending,
    /// Included with the required confirmation depth.
    Confirmed,
    /// Reverted, dropped or timed out.
    Failed,
}

/// One mint attempt. Never reused across attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintTransaction {
    /// Transaction hash returned by the wallet.
    pub hash: TxHash,
    /// Current status.
    pub status: TxStatus,
    /// Block the transaction was included in, once known.
    pub block_number: Option<u64>,
}

impl MintTransaction {
    /// A freshly submitted transaction.
    pub fn pending(hash: TxHash) -> Self {
        Self {
            hash,
            status: TxStatus::Pending,
            block_number: None,
        }
    }

    /// Mark included. `block_number` is `None` when the node omitted it.
    pub(crate) fn confirm(&mut self, block_number: Option<u64>) {
        self.status = TxStatus::Confirmed;
        self.block_number = block_number;
    }

    pub(crate) fn fail(&mut self) {
        self.status = TxStatus::Failed;
    }
}

/// Minimal view of a transaction receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InclusionReceipt {
    /// Hash of the included transaction.
    pub tx_hash: TxHash,
    /// Block number, if the node reported one.
    pub block_number: Option<u64>,
    /// Whether execution succeeded.
    pub succeeded: bool,
}

/// A decoded `NewEpicNFTMinted` notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintEvent {
    /// Address that received the token.
    pub recipient: Address,
    /// Identifier of the minted token.
    pub token_id: U256,
    /// Block where the event was emitted.
    pub block_number: Option<u64>,
    /// Transaction that emitted the event.
    pub tx_hash: Option<TxHash>,
}
