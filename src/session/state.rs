//! The wallet session value and its transitions.
//!
//! ```text
//! Unauthenticated --probe/authorize--> Authenticated --network checked--> NetworkVerified
//!        ^                                                                      |
//!        +------------------------------- reset ------------------------------+
//! ```
//!
//! A wrong network is a warning flag on `NetworkVerified`, not a state of its
//! own. Minting is gated on `NetworkVerified`.

use std::fmt;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blockchain::types::{ChainId, MintError, MintResult};

/// Identity of one session, renewed on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where the session's account came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthSource {
    /// Found through the silent `eth_accounts` probe.
    Probe,
    /// Granted through the explicit prompt.
    Explicit,
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Unauthenticated,
    Authenticated,
    NetworkVerified,
}

/// Warning recorded by the network check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkWarning {
    /// The wallet is on another chain.
    Mismatch { expected: ChainId, actual: ChainId },
    /// The chain could not be read; the check was skipped.
    Unverified { reason: String },
}

/// Session state for the lifetime of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    id: SessionId,
    account: Option<Address>,
    source: Option<AuthSource>,
    network: Option<ChainId>,
    phase: SessionPhase,
    network_warning: Option<NetworkWarning>,
}

impl Default for WalletSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletSession {
    /// An empty, unauthenticated session.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            account: None,
            source: None,
            network: None,
            phase: SessionPhase::Unauthenticated,
            network_warning: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn source(&self) -> Option<AuthSource> {
        self.source
    }

    pub fn network(&self) -> Option<ChainId> {
        self.network
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn network_warning(&self) -> Option<&NetworkWarning> {
        self.network_warning.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase != SessionPhase::Unauthenticated
    }

    /// The account to mint from, if the session has passed the network check.
    pub fn mint_account(&self) -> MintResult<Address> {
        match (self.phase, self.account) {
            (SessionPhase::NetworkVerified, Some(account)) => Ok(account),
            (SessionPhase::Authenticated, _) => Err(MintError::SessionNotReady(
                "network has not been checked".to_string(),
            )),
            _ => Err(MintError::SessionNotReady(
                "no authorized account".to_string(),
            )),
        }
    }

    /// Probe-success and authorize-success transition.
    ///
    /// Re-authenticating with the same account keeps the current phase.
    /// A different account starts over at `Authenticated` and must be
    /// re-checked against the network.
    pub(crate) fn authenticated(&mut self, account: Address, source: AuthSource) {
        if self.account == Some(account) {
            return;
        }
        self.account = Some(account);
        self.source = Some(source);
        self.network = None;
        self.network_warning = None;
        self.phase = SessionPhase::Authenticated;
    }

    /// Network-checked transition.
    pub(crate) fn network_checked(&mut self, actual: ChainId, required: ChainId) -> MintResult<()> {
        self.require_authenticated()?;
        self.network = Some(actual);
        self.network_warning = (actual != required).then_some(NetworkWarning::Mismatch {
            expected: required,
            actual,
        });
        self.phase = SessionPhase::NetworkVerified;
        Ok(())
    }

    /// Network check skipped because the chain could not be read.
    pub(crate) fn network_unverified(&mut self, reason: String) -> MintResult<()> {
        self.require_authenticated()?;
        self.network = None;
        self.network_warning = Some(NetworkWarning::Unverified { reason });
        self.phase = SessionPhase::NetworkVerified;
        Ok(())
    }

    /// Drop the account and start a new session identity.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn require_authenticated(&self) -> MintResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(MintError::SessionNotReady(
                "no authorized account".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const ALICE: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    const BOB: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
    const SEPOLIA: ChainId = ChainId(11_155_111);

    #[test]
    fn test_new_session_is_empty() {
        let session = WalletSession::new();
        assert_eq!(session.account(), None);
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert!(session.mint_account().is_err());
    }

    #[test]
    fn test_full_transition_path() {
        let mut session = WalletSession::new();
        session.authenticated(ALICE, AuthSource::Probe);
        assert_eq!(session.phase(), SessionPhase::Authenticated);
        assert!(matches!(
            session.mint_account(),
            Err(MintError::SessionNotReady(_))
        ));

        session.network_checked(SEPOLIA, SEPOLIA).unwrap();
        assert_eq!(session.phase(), SessionPhase::NetworkVerified);
        assert_eq!(session.network_warning(), None);
        assert_eq!(session.mint_account().unwrap(), ALICE);
    }

    #[test]
    fn test_wrong_network_is_a_flag() {
        let mut session = WalletSession::new();
        session.authenticated(ALICE, AuthSource::Explicit);
        session.network_checked(ChainId(1), SEPOLIA).unwrap();

        assert_eq!(
            session.network_warning(),
            Some(&NetworkWarning::Mismatch {
                expected: SEPOLIA,
                actual: ChainId(1)
            })
        );
        assert_eq!(session.mint_account().unwrap(), ALICE);
    }

    #[test]
    fn test_network_check_requires_account() {
        let mut session = WalletSession::new();
        assert!(session.network_checked(SEPOLIA, SEPOLIA).is_err());
        assert!(session.network_unverified("down".into()).is_err());
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
    }

    #[test]
    fn test_same_account_keeps_phase() {
        let mut session = WalletSession::new();
        session.authenticated(ALICE, AuthSource::Probe);
        session.network_checked(SEPOLIA, SEPOLIA).unwrap();

        session.authenticated(ALICE, AuthSource::Explicit);
        assert_eq!(session.phase(), SessionPhase::NetworkVerified);
        assert_eq!(session.source(), Some(AuthSource::Probe));
    }

    #[test]
    fn test_account_switch_requires_new_check() {
        let mut session = WalletSession::new();
        session.authenticated(ALICE, AuthSource::Probe);
        session.network_checked(SEPOLIA, SEPOLIA).unwrap();

        session.authenticated(BOB, AuthSource::Explicit);
        assert_eq!(session.account(), Some(BOB));
        assert_eq!(session.phase(), SessionPhase::Authenticated);
        assert_eq!(session.network(), None);
    }

    #[test]
    fn test_reset_renews_identity() {
        let mut session = WalletSession::new();
        let first = session.id();
        session.authenticated(ALICE, AuthSource::Probe);

        session.reset();
        assert_ne!(session.id(), first);
        assert_eq!(session.account(), None);
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
    }
}
