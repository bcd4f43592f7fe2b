//! Mint submission and inclusion monitoring.
//!
//! # Responsibilities
//! - Gate the mint on a network-checked session
//! - Send the mint call through the wallet (the user approves the fee)
//! - Poll for the receipt until the required depth or the timeout
//!
//! There is no retry: a failed attempt needs a new explicit `mint`.

use std::time::Duration;

use alloy::primitives::TxHash;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::contract::NftContract;
use crate::blockchain::types::{MintError, MintResult, MintTransaction, TxStatus};
use crate::config::RpcConfig;
use crate::observability::metrics;
use crate::session::WalletSession;

/// Drives one mint attempt from submission to confirmation.
#[derive(Debug, Clone)]
pub struct MintOrchestrator {
    confirmation_blocks: u32,
    inclusion_timeout: Duration,
    poll_interval: Duration,
}

impl MintOrchestrator {
    /// Create an orchestrator from the RPC settings.
    ///
    /// A zero poll interval is raised to 1 ms.
    pub fn new(config: &RpcConfig) -> Self {
        Self {
            confirmation_blocks: config.confirmation_blocks,
            inclusion_timeout: Duration::from_secs(config.inclusion_timeout_secs),
            poll_interval: Duration::from_millis(config.receipt_poll_ms.max(1)),
        }
    }

    /// Override the inclusion timeout.
    pub fn with_inclusion_timeout(mut self, inclusion_timeout: Duration) -> Self {
        self.inclusion_timeout = inclusion_timeout;
        self
    }

    /// Submit the mint call.
    ///
    /// Suspends while the wallet asks the user to approve the fee. Nothing is
    /// created when the user rejects or the wallet errors.
    pub async fn mint(
        &self,
        session: &WalletSession,
        contract: &NftContract,
    ) -> MintResult<MintTransaction> {
        let account = session.mint_account()?;
        match contract.signer_account() {
            Some(signer) if signer == account => {}
            Some(signer) => {
                return Err(MintError::SessionNotReady(format!(
                    "contract is bound to {} but the session account is {}",
                    signer, account
                )))
            }
            None => return Err(MintError::ProviderUnavailable),
        }

        let request = contract.mint_request()?;

        tracing::info!(account = %account, contract = %contract.address(), "Going to pop wallet now to pay gas...");
        match contract.provider().send_transaction(request).await {
            Ok(hash) => {
                tracing::info!(tx_hash = %hash, "Mining...please wait.");
                metrics::record_mint_attempt("submitted");
                Ok(MintTransaction::pending(hash))
            }
            Err(e) => {
                tracing::warn!(error = %e, account = %account, "Mint submission failed");
                metrics::record_mint_attempt("submission_failed");
                Err(MintError::SubmissionFailed(e.to_string()))
            }
        }
    }

    /// Wait until `txn` is included with the configured depth.
    ///
    /// Moves the transaction to `Confirmed` and returns its hash, or to
    /// `Failed` on revert or timeout. Receipt query errors are logged and
    /// polling continues.
    pub async fn await_inclusion(
        &self,
        contract: &NftContract,
        txn: &mut MintTransaction,
    ) -> MintResult<TxHash> {
        match txn.status {
            TxStatus::Confirmed => return Ok(txn.hash),
            TxStatus::Failed => {
                return Err(MintError::InclusionFailed {
                    hash: Some(txn.hash),
                    reason: "transaction already failed".to_string(),
                })
            }
            TxStatus::Pending => {}
        }

        let tx_hash = txn.hash;
        let provider = contract.provider();
        let required = u64::from(self.confirmation_blocks.max(1));

        let result = timeout(self.inclusion_timeout, async {
            let mut ticker = interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let receipt = match provider.transaction_receipt(tx_hash).await {
                    Ok(Some(r)) => r,
                    Ok(None) => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt query failed");
                        continue;
                    }
                };

                if !receipt.succeeded {
                    return Err("transaction reverted".to_string());
                }

                if required == 1 {
                    return Ok(receipt.block_number);
                }

                let current_block = match provider.block_number().await {
                    Ok(block) => block,
                    Err(e) => {
                        tracing::warn!(error = %e, "Block number query failed");
                        continue;
                    }
                };
                let depth = confirmations(
                    current_block,
                    receipt.block_number.unwrap_or(current_block),
                );

                if depth >= required {
                    return Ok(receipt.block_number);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = depth,
                    required = required,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        let reason = match result {
            Ok(Ok(block_number)) => {
                txn.confirm(block_number);
                tracing::info!(tx_hash = %tx_hash, block_number = ?block_number, "Mined");
                metrics::record_mint_attempt("confirmed");
                return Ok(tx_hash);
            }
            Ok(Err(reason)) => reason,
            Err(_) => format!("not included within {:?}", self.inclusion_timeout),
        };

        txn.fail();
        tracing::warn!(tx_hash = %tx_hash, reason = %reason, "Mint transaction failed");
        metrics::record_mint_attempt("inclusion_failed");
        Err(MintError::InclusionFailed {
            hash: Some(tx_hash),
            reason,
        })
    }
}

/// Confirmation depth, counting the inclusion block itself.
fn confirmations(current_block: u64, tx_block: u64) -> u64 {
    current_block.saturating_sub(tx_block) + 1
}
