//! Authorization and network checks that drive [`WalletSession`].

use alloy::primitives::Address;

use crate::blockchain::gateway::ProviderGateway;
use crate::blockchain::types::{ChainId, MintError, MintResult, ProviderError};
use crate::observability::metrics;
use crate::session::state::{AuthSource, WalletSession};

/// Result of the silent authorization probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// An account was already authorized and is now the session account.
    Found(Address),
    /// The wallet has not authorized this site yet.
    NotFound,
    /// No wallet is installed.
    ProviderAbsent,
}

/// Result of a completed network check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkCheck {
    /// The wallet is on the required network.
    Matched(ChainId),
    /// The wallet is on another network. Minting stays possible but will
    /// most likely fail.
    Mismatch { expected: ChainId, actual: ChainId },
    /// The chain id could not be read.
    Skipped(String),
}

impl NetworkCheck {
    /// The user-facing warning for this outcome, if any.
    pub fn warning(&self) -> Option<MintError> {
        match self {
            NetworkCheck::Mismatch { expected, actual } => Some(MintError::WrongNetwork {
                expected: *expected,
                actual: *actual,
            }),
            _ => None,
        }
    }
}

/// Runs the session transitions against the injected provider.
#[derive(Debug, Clone)]
pub struct SessionManager {
    gateway: ProviderGateway,
    required_chain: ChainId,
}

impl SessionManager {
    pub fn new(gateway: ProviderGateway, required_chain: ChainId) -> Self {
        Self {
            gateway,
            required_chain,
        }
    }

    pub fn gateway(&self) -> &ProviderGateway {
        &self.gateway
    }

    pub fn required_chain(&self) -> ChainId {
        self.required_chain
    }

    /// Look for an account the wallet already authorized, without prompting.
    pub async fn probe_authorization(&self, session: &mut WalletSession) -> ProbeOutcome {
        let Some(provider) = self.gateway.detect_provider() else {
            tracing::info!("No wallet provider detected; install a wallet to continue");
            metrics::record_authorization("probe", "provider_absent");
            return ProbeOutcome::ProviderAbsent;
        };

        let accounts = match provider.authorized_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!(error = %e, "Authorized account query failed");
                metrics::record_authorization("probe", "error");
                return ProbeOutcome::NotFound;
            }
        };

        match accounts.first() {
            Some(&account) => {
                session.authenticated(account, AuthSource::Probe);
                tracing::info!(account = %account, session = %session.id(), "Found an authorized account");
                metrics::record_authorization("probe", "found");
                ProbeOutcome::Found(account)
            }
            None => {
                tracing::info!("No authorized account found");
                metrics::record_authorization("probe", "not_found");
                ProbeOutcome::NotFound
            }
        }
    }

    /// Prompt the user to authorize an account.
    ///
    /// On failure the session is left untouched.
    pub async fn request_authorization(&self, session: &mut WalletSession) -> MintResult<Address> {
        let Some(provider) = self.gateway.detect_provider() else {
            tracing::warn!("Authorization requested without a wallet provider");
            metrics::record_authorization("explicit", "provider_absent");
            return Err(MintError::ProviderAbsent);
        };

        let accounts = provider.request_accounts().await.map_err(|e| {
            tracing::warn!(error = %e, "Wallet authorization failed");
            metrics::record_authorization("explicit", "denied");
            match e {
                ProviderError::UserRejected => {
                    MintError::AuthorizationDenied("request rejected by user".to_string())
                }
                other => MintError::AuthorizationDenied(other.to_string()),
            }
        })?;

        let Some(&account) = accounts.first() else {
            tracing::warn!("Wallet returned no accounts");
            metrics::record_authorization("explicit", "denied");
            return Err(MintError::AuthorizationDenied(
                "wallet returned no accounts".to_string(),
            ));
        };

        session.authenticated(account, AuthSource::Explicit);
        tracing::info!(account = %account, session = %session.id(), "Connected");
        metrics::record_authorization("explicit", "granted");
        Ok(account)
    }

    /// Compare the wallet's active chain with the required network.
    ///
    /// Moves an authenticated session to `NetworkVerified` whatever the
    /// outcome; a mismatch or an unreadable chain is recorded as a warning.
    pub async fn verify_network(&self, session: &mut WalletSession) -> MintResult<NetworkCheck> {
        if !session.is_authenticated() {
            return Err(MintError::SessionNotReady(
                "no authorized account".to_string(),
            ));
        }
        let provider = self
            .gateway
            .detect_provider()
            .ok_or(MintError::ProviderAbsent)?;

        match provider.chain_id().await {
            Ok(id) => {
                let actual = ChainId(id);
                session.network_checked(actual, self.required_chain)?;
                tracing::info!(chain_id = %actual, "Connected to chain");

                if actual == self.required_chain {
                    Ok(NetworkCheck::Matched(actual))
                } else {
                    tracing::warn!(
                        expected = %self.required_chain,
                        actual = %actual,
                        "Wallet is not connected to the required network"
                    );
                    Ok(NetworkCheck::Mismatch {
                        expected: self.required_chain,
                        actual,
                    })
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read chain id; network check skipped");
                session.network_unverified(e.to_string())?;
                Ok(NetworkCheck::Skipped(e.to_string()))
            }
        }
    }
}
