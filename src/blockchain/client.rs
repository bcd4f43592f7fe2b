//! JSON-RPC backed wallet provider.
//!
//! # Responsibilities
//! - Connect to a JSON-RPC endpoint with a local signing key
//! - Answer the account, chain and log queries of [`WalletProvider`]
//! - Sign and broadcast transactions through alloy's wallet filler
//! - Bound every RPC call with a timeout

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{Filter, Log, TransactionRequest};
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::provider::WalletProvider;
use crate::blockchain::types::{InclusionReceipt, ProviderError, ProviderResult};
use crate::blockchain::wallet::LocalWallet;
use crate::config::RpcConfig;

/// Wallet provider backed by an HTTP JSON-RPC node and a local key.
///
/// Behaves like an injected browser wallet: the key is only handed out by
/// `eth_accounts` after the user has authorized it once, unless the wallet
/// was created with `remember_authorization`.
pub struct RpcWalletProvider {
    provider: Arc<dyn Provider + Send + Sync>,
    account: Address,
    authorized: AtomicBool,
    timeout_secs: u64,
}

impl RpcWalletProvider {
    /// Create a provider for `wallet` against the configured endpoint.
    ///
    /// No network call is made here.
    pub fn new(
        config: &RpcConfig,
        wallet: LocalWallet,
        remember_authorization: bool,
    ) -> ProviderResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            ProviderError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let account = wallet.address();
        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url);

        tracing::info!(
            rpc_url = %config.rpc_url,
            account = %account,
            remember_authorization,
            "RPC wallet provider initialized"
        );

        Ok(Self {
            provider: Arc::new(provider) as Arc<dyn Provider + Send + Sync>,
            account,
            authorized: AtomicBool::new(remember_authorization),
            timeout_secs: config.rpc_timeout_secs,
        })
    }

    async fn call<T, E, F>(&self, method: &'static str, fut: F) -> ProviderResult<T>
    where
        E: std::fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        match timeout(Duration::from_secs(self.timeout_secs), fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(ProviderError::Rpc(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(ProviderError::Timeout(self.timeout_secs))
            }
        }
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn authorized_accounts(&self) -> ProviderResult<Vec<Address>> {
        if self.authorized.load(Ordering::SeqCst) {
            Ok(vec![self.account])
        } else {
            Ok(Vec::new())
        }
    }

    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        self.authorized.store(true, Ordering::SeqCst);
        Ok(vec![self.account])
    }

    async fn chain_id(&self) -> ProviderResult<u64> {
        self.call("eth_chainId", self.provider.get_chain_id()).await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> ProviderResult<TxHash> {
        if tx.from.is_some_and(|from| from != self.account) {
            return Err(ProviderError::Rpc(format!(
                "account {} is not managed by this wallet",
                tx.from.unwrap_or_default()
            )));
        }

        let fut = async {
            self.provider
                .send_transaction(tx)
                .await
                .map(|pending| *pending.tx_hash())
        };
        self.call("eth_sendTransaction", fut).await
    }

    async fn transaction_receipt(&self, hash: TxHash) -> ProviderResult<Option<InclusionReceipt>> {
        let receipt = self
            .call("eth_getTransactionReceipt", self.provider.get_transaction_receipt(hash))
            .await?;

        Ok(receipt.map(|r| InclusionReceipt {
            tx_hash: r.transaction_hash,
            block_number: r.block_number,
            succeeded: r.status(),
        }))
    }

    async fn block_number(&self) -> ProviderResult<u64> {
        self.call("eth_blockNumber", self.provider.get_block_number()).await
    }

    async fn logs(&self, filter: &Filter) -> ProviderResult<Vec<Log>> {
        self.call("eth_getLogs", self.provider.get_logs(filter)).await
    }
}

impl std::fmt::Debug for RpcWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWalletProvider")
            .field("account", &self.account)
            .field("authorized", &self.authorized.load(Ordering::SeqCst))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
