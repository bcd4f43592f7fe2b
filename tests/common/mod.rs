//! Shared utilities for integration testing.
//!
//! `ScriptedWallet` is an in-memory wallet and chain: it answers account and
//! chain queries from its script and, when a transaction is sent, "mines" it
//! into the next block and emits the contract's mint notification.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::{address, Address, Bytes, LogData, TxHash, B256, U256};
use alloy::rpc::types::{Filter, Log, TransactionRequest};
use alloy::sol_types::SolEvent;
use async_trait::async_trait;

use nft_mint_client::blockchain::contract::MyEpicNFT;
use nft_mint_client::blockchain::{
    InclusionReceipt, ProviderError, ProviderGateway, ProviderResult, WalletProvider,
};
use nft_mint_client::config::MintClientConfig;

pub const ALICE: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const BOB: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
pub const CONTRACT: Address = address!("409661842C654CA37b16118f6cF8615970663CF8");
pub const SEPOLIA: u64 = 11_155_111;
pub const MAINNET: u64 = 1;
pub const START_BLOCK: u64 = 100;

/// What happens to a sent transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mining {
    /// Included in the next block; a mint notification is emitted.
    Include,
    /// Included in the next block but reverted.
    Revert,
    /// Never included.
    Never,
}

struct Script {
    authorized: Vec<Address>,
    grant: ProviderResult<Vec<Address>>,
    chain_id: ProviderResult<u64>,
    send: Option<ProviderError>,
    mining: Mining,
    block_number: u64,
    next_token_id: u64,
    receipts: HashMap<TxHash, InclusionReceipt>,
    logs: Vec<Log>,
    sent: Vec<TransactionRequest>,
    calls: Vec<&'static str>,
    probe_error: Option<ProviderError>,
    failing_receipts: u32,
    failing_block_numbers: u32,
    failing_logs: u32,
    omit_receipt_blocks: bool,
}

/// Consume one scripted failure, if any are left.
fn take_failure(remaining: &mut u32) -> ProviderResult<()> {
    if *remaining == 0 {
        return Ok(());
    }
    *remaining -= 1;
    Err(ProviderError::Rpc("scripted failure".to_string()))
}

/// Scripted wallet provider.
pub struct ScriptedWallet {
    script: Mutex<Script>,
}

impl ScriptedWallet {
    /// Sepolia wallet, nothing authorized yet, grants `ALICE` when asked.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(Script {
                authorized: Vec::new(),
                grant: Ok(vec![ALICE]),
                chain_id: Ok(SEPOLIA),
                send: None,
                mining: Mining::Include,
                block_number: START_BLOCK,
                next_token_id: 0,
                receipts: HashMap::new(),
                logs: Vec::new(),
                sent: Vec::new(),
                calls: Vec::new(),
                probe_error: None,
                failing_receipts: 0,
                failing_block_numbers: 0,
                failing_logs: 0,
                omit_receipt_blocks: false,
            }),
        })
    }

    fn with<R>(&self, f: impl FnOnce(&mut Script) -> R) -> R {
        f(&mut self.script.lock().unwrap())
    }

    pub fn authorize(&self, accounts: Vec<Address>) {
        self.with(|s| s.authorized = accounts);
    }

    pub fn grant(&self, result: ProviderResult<Vec<Address>>) {
        self.with(|s| s.grant = result);
    }

    pub fn set_chain(&self, result: ProviderResult<u64>) {
        self.with(|s| s.chain_id = result);
    }

    pub fn reject_transactions(&self, error: ProviderError) {
        self.with(|s| s.send = Some(error));
    }

    pub fn set_mining(&self, mining: Mining) {
        self.with(|s| s.mining = mining);
    }

    /// Make `eth_accounts` fail.
    pub fn fail_probe(&self, error: ProviderError) {
        self.with(|s| s.probe_error = Some(error));
    }

    /// Fail the next `count` receipt queries.
    pub fn fail_next_receipts(&self, count: u32) {
        self.with(|s| s.failing_receipts = count);
    }

    /// Fail the next `count` block number queries.
    pub fn fail_next_block_numbers(&self, count: u32) {
        self.with(|s| s.failing_block_numbers = count);
    }

    /// Fail the next `count` log queries.
    pub fn fail_next_logs(&self, count: u32) {
        self.with(|s| s.failing_logs = count);
    }

    /// Report receipts without a block number.
    pub fn omit_receipt_blocks(&self) {
        self.with(|s| s.omit_receipt_blocks = true);
    }

    pub fn set_next_token_id(&self, token_id: u64) {
        self.with(|s| s.next_token_id = token_id);
    }

    /// Append `log` in a new block.
    pub fn emit_in_next_block(&self, mut log: Log) {
        self.with(|s| {
            s.block_number += 1;
            log.block_number = Some(s.block_number);
            s.logs.push(log);
        });
    }

    pub fn advance_blocks(&self, count: u64) {
        self.with(|s| s.block_number += count);
    }

    pub fn block_number_now(&self) -> u64 {
        self.with(|s| s.block_number)
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.with(|s| s.sent.clone())
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.with(|s| s.calls.clone())
    }

    pub fn count_calls(&self, method: &str) -> usize {
        self.with(|s| s.calls.iter().filter(|c| **c == method).count())
    }
}

#[async_trait]
impl WalletProvider for ScriptedWallet {
    async fn authorized_accounts(&self) -> ProviderResult<Vec<Address>> {
        self.with(|s| {
            s.calls.push("eth_accounts");
            match &s.probe_error {
                Some(error) => Err(error.clone()),
                None => Ok(s.authorized.clone()),
            }
        })
    }

    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        self.with(|s| {
            s.calls.push("eth_requestAccounts");
            if let Ok(accounts) = &s.grant {
                s.authorized = accounts.clone();
            }
            s.grant.clone()
        })
    }

    async fn chain_id(&self) -> ProviderResult<u64> {
        self.with(|s| {
            s.calls.push("eth_chainId");
            s.chain_id.clone()
        })
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> ProviderResult<TxHash> {
        self.with(|s| {
            s.calls.push("eth_sendTransaction");
            if let Some(error) = &s.send {
                return Err(error.clone());
            }

            s.sent.push(tx.clone());
            let hash = B256::from(U256::from(s.sent.len()));

            if s.mining == Mining::Never {
                return Ok(hash);
            }

            s.block_number += 1;
            let succeeded = s.mining == Mining::Include;
            let receipt_block = (!s.omit_receipt_blocks).then_some(s.block_number);
            s.receipts.insert(
                hash,
                InclusionReceipt {
                    tx_hash: hash,
                    block_number: receipt_block,
                    succeeded,
                },
            );

            let contract = tx.to.and_then(|kind| kind.to().copied());
            if let (true, Some(contract), Some(from)) = (succeeded, contract, tx.from) {
                let token_id = s.next_token_id;
                s.next_token_id += 1;
                let mut log = mint_log(contract, from, token_id);
                log.block_number = Some(s.block_number);
                log.transaction_hash = Some(hash);
                s.logs.push(log);
            }
            Ok(hash)
        })
    }

    async fn transaction_receipt(&self, hash: TxHash) -> ProviderResult<Option<InclusionReceipt>> {
        self.with(|s| {
            s.calls.push("eth_getTransactionReceipt");
            take_failure(&mut s.failing_receipts)?;
            Ok(s.receipts.get(&hash).copied())
        })
    }

    async fn block_number(&self) -> ProviderResult<u64> {
        self.with(|s| {
            s.calls.push("eth_blockNumber");
            take_failure(&mut s.failing_block_numbers)?;
            Ok(s.block_number)
        })
    }

    async fn logs(&self, filter: &Filter) -> ProviderResult<Vec<Log>> {
        self.with(|s| {
            s.calls.push("eth_getLogs");
            take_failure(&mut s.failing_logs)?;
            let from = filter.get_from_block().unwrap_or(0);
            let to = filter.get_to_block().unwrap_or(u64::MAX);
            Ok(s.logs
                .iter()
                .filter(|log| {
                    log.block_number
                        .is_some_and(|block| block >= from && block <= to)
                })
                .cloned()
                .collect())
        })
    }
}

/// A well-formed mint notification.
pub fn mint_log(contract: Address, recipient: Address, token_id: u64) -> Log {
    let data = MyEpicNFT::NewEpicNFTMinted {
        sender: recipient,
        tokenId: U256::from(token_id),
    }
    .encode_log_data();
    Log {
        inner: alloy::primitives::Log {
            address: contract,
            data,
        },
        ..Default::default()
    }
}

/// A mint notification with the right topic but a truncated payload.
pub fn truncated_mint_log(contract: Address) -> Log {
    let data = LogData::new_unchecked(
        vec![MyEpicNFT::NewEpicNFTMinted::SIGNATURE_HASH],
        Bytes::from(vec![0u8; 20]),
    );
    Log {
        inner: alloy::primitives::Log {
            address: contract,
            data,
        },
        ..Default::default()
    }
}

pub fn gateway(wallet: &Arc<ScriptedWallet>) -> ProviderGateway {
    ProviderGateway::new(Some(wallet.clone() as Arc<dyn WalletProvider>))
}

/// Configuration with short polling intervals.
pub fn test_config() -> MintClientConfig {
    let mut config = MintClientConfig::default();
    config.rpc.receipt_poll_ms = 10;
    config.rpc.inclusion_timeout_secs = 5;
    config.events.poll_interval_ms = 10;
    config
}
