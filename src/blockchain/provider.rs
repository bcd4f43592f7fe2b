//! Wallet provider capability.
//!
//! Mirrors the subset of an EIP-1193 injected provider the mint flow needs.
//! Browser bindings and the local-key adapter in [`crate::blockchain::client`]
//! both implement it, and tests substitute a scripted wallet.

use alloy::primitives::{Address, TxHash};
use alloy::rpc::types::{Filter, Log, TransactionRequest};
use async_trait::async_trait;

use crate::blockchain::types::{InclusionReceipt, ProviderResult};

/// A connected wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts the user has already authorized (`eth_accounts`). Never prompts.
    async fn authorized_accounts(&self) -> ProviderResult<Vec<Address>>;

    /// Prompt the user for access (`eth_requestAccounts`).
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>>;

    /// Active chain identifier (`eth_chainId`).
    async fn chain_id(&self) -> ProviderResult<u64>;

    /// Sign and broadcast a transaction from `tx.from`.
    ///
    /// The wallet asks the user to approve the fee; rejection is reported as
    /// [`ProviderError::UserRejected`](crate::blockchain::types::ProviderError::UserRejected).
    async fn send_transaction(&self, tx: TransactionRequest) -> ProviderResult<TxHash>;

    /// Receipt of a transaction, `None` while it is still pending.
    async fn transaction_receipt(&self, hash: TxHash) -> ProviderResult<Option<InclusionReceipt>>;

    /// Latest block number.
    async fn block_number(&self) -> ProviderResult<u64>;

    /// Logs matching a filter.
    async fn logs(&self, filter: &Filter) -> ProviderResult<Vec<Log>>;
}
