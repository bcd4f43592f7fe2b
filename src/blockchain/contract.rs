//! Binding for the `MyEpicNFT` collection contract.
//!
//! Only two members of the ABI are used: the `makeAnEpicNFT()` call and the
//! `NewEpicNFTMinted` event.

use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::rpc::types::{Filter, Log, TransactionRequest};
use alloy::sol;
use alloy::sol_types::{SolCall, SolEvent};

use crate::blockchain::gateway::{Caller, ProviderHandle};
use crate::blockchain::types::{MintError, MintEvent, MintResult};

sol! {
    /// Minimal ABI of the deployed collection.
    interface MyEpicNFT {
        /// Mints the next token to `msg.sender`.
        function makeAnEpicNFT() external;

        /// Emitted after a token has been minted.
        #[derive(Debug)]
        event NewEpicNFTMinted(address sender, uint256 tokenId);
    }
}

/// Contract handle bound to a fixed address.
#[derive(Debug, Clone)]
pub struct NftContract {
    caller: Caller,
    address: Address,
}

impl NftContract {
    pub(crate) fn new(caller: Caller, address: Address) -> Self {
        Self { caller, address }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Provider the handle talks to.
    pub fn provider(&self) -> &ProviderHandle {
        self.caller.provider()
    }

    /// Sending account, if the handle is bound to a signer.
    pub fn signer_account(&self) -> Option<Address> {
        match &self.caller {
            Caller::Signer(signer) => Some(signer.account()),
            Caller::ReadOnly(_) => None,
        }
    }

    /// Unsigned `makeAnEpicNFT()` transaction from the bound signer.
    ///
    /// Gas, fees and nonce are left for the wallet to fill.
    pub fn mint_request(&self) -> MintResult<TransactionRequest> {
        let from = self.signer_account().ok_or(MintError::ProviderUnavailable)?;
        let input = MyEpicNFT::makeAnEpicNFTCall {}.abi_encode();

        Ok(TransactionRequest::default()
            .with_from(from)
            .with_to(self.address)
            .with_input(input))
    }

    /// Filter for mint notifications emitted in `[from_block, to_block]`.
    pub fn mint_filter(&self, from_block: u64, to_block: u64) -> Filter {
        Filter::new()
            .address(self.address)
            .event(MyEpicNFT::NewEpicNFTMinted::SIGNATURE)
            .from_block(from_block)
            .to_block(to_block)
    }

    /// Decode a mint notification.
    pub fn decode_mint_event(&self, log: &Log) -> MintResult<MintEvent> {
        if log.inner.address != self.address {
            return Err(MintError::MalformedEvent(format!(
                "emitted by {} instead of {}",
                log.inner.address, self.address
            )));
        }

        let decoded = log
            .log_decode::<MyEpicNFT::NewEpicNFTMinted>()
            .map_err(|e| MintError::MalformedEvent(e.to_string()))?;
        let event = decoded.inner.data;

        Ok(MintEvent {
            recipient: event.sender,
            token_id: event.tokenId,
            block_number: log.block_number,
            tx_hash: log.transaction_hash,
        })
    }
}
