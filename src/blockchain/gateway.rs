//! Provider detection and capability handles.
//!
//! The gateway is created with whatever wallet the host environment injected
//! (possibly none). Absence is an ordinary outcome that callers branch on.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use alloy::primitives::Address;

use crate::blockchain::contract::NftContract;
use crate::blockchain::provider::WalletProvider;
use crate::blockchain::types::{MintError, MintResult};

/// Shared handle to a detected wallet provider.
#[derive(Clone)]
pub struct ProviderHandle(Arc<dyn WalletProvider>);

impl ProviderHandle {
    /// Wrap a provider.
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self(provider)
    }
}

impl Deref for ProviderHandle {
    type Target = dyn WalletProvider;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProviderHandle")
    }
}

/// A provider bound to the account that signs and sends transactions.
#[derive(Debug, Clone)]
pub struct Signer {
    provider: ProviderHandle,
    account: Address,
}

impl Signer {
    /// Bind `provider` to `account`.
    pub fn new(provider: ProviderHandle, account: Address) -> Self {
        Self { provider, account }
    }

    /// The sending account.
    pub fn account(&self) -> Address {
        self.account
    }

    /// The underlying provider.
    pub fn provider(&self) -> &ProviderHandle {
        &self.provider
    }
}

/// What a contract handle is bound to.
#[derive(Debug, Clone)]
pub enum Caller {
    /// Can send transactions.
    Signer(Signer),
    /// Can only read state and logs.
    ReadOnly(ProviderHandle),
}

impl Caller {
    /// The provider behind either binding.
    pub fn provider(&self) -> &ProviderHandle {
        match self {
            Caller::Signer(signer) => signer.provider(),
            Caller::ReadOnly(provider) => provider,
        }
    }
}

impl From<Signer> for Caller {
    fn from(signer: Signer) -> Self {
        Caller::Signer(signer)
    }
}

impl From<ProviderHandle> for Caller {
    fn from(provider: ProviderHandle) -> Self {
        Caller::ReadOnly(provider)
    }
}

/// Entry point to the injected wallet, if any.
#[derive(Debug, Clone, Default)]
pub struct ProviderGateway {
    injected: Option<ProviderHandle>,
}

impl ProviderGateway {
    /// Gateway over an injected provider, or over nothing.
    pub fn new(injected: Option<Arc<dyn WalletProvider>>) -> Self {
        Self {
            injected: injected.map(ProviderHandle::new),
        }
    }

    /// Gateway for an environment without a wallet.
    pub fn absent() -> Self {
        Self::default()
    }

    /// The injected provider, or `None` when no wallet is installed.
    pub fn detect_provider(&self) -> Option<ProviderHandle> {
        self.injected.clone()
    }

    /// A signer for `account` on the injected provider.
    ///
    /// Callers are expected to check [`detect_provider`](Self::detect_provider)
    /// first; calling this without a provider is a precondition violation.
    pub fn signer(&self, account: Address) -> MintResult<Signer> {
        match &self.injected {
            Some(provider) => Ok(Signer::new(provider.clone(), account)),
            None => Err(MintError::ProviderUnavailable),
        }
    }

    /// Bind the contract at `address`. Makes no network call.
    pub fn bind_contract(&self, caller: impl Into<Caller>, address: Address) -> NftContract {
        NftContract::new(caller.into(), address)
    }
}
