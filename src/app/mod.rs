//! Entry points for the user interface.
//!
//! # Data Flow
//! ```text
//! mount          → on_mount       → probe → verify network → attach listener
//! "Connect"      → connect_wallet → authorize → verify network → attach listener
//! "Mint NFT"     → mint_nft       → submit → await inclusion
//! listener event → next_mint_notice
//! ```
//!
//! Every failure stops here: it is logged and turned into a [`Notice`].

pub mod notice;

use alloy::primitives::Address;

use crate::blockchain::contract::NftContract;
use crate::blockchain::gateway::ProviderGateway;
use crate::blockchain::transaction::MintOrchestrator;
use crate::blockchain::types::{ChainId, MintError, MintResult, MintTransaction};
use crate::config::MintClientConfig;
use crate::constants::{self, CONTRACT_ADDRESS, REQUIRED_CHAIN};
use crate::events::{EventSubscriber, MintEventStream, Subscription};
use crate::session::{NetworkCheck, NetworkWarning, ProbeOutcome, SessionManager, WalletSession};

pub use notice::{explorer_link, viewer_link, Notice};

/// What the UI should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// "Connect to Wallet" is shown while unauthenticated.
    pub show_connect_button: bool,
    /// "Mint NFT" is shown once authenticated, whatever the network.
    pub show_mint_button: bool,
    pub account: Option<Address>,
    pub network_warning: Option<NetworkWarning>,
    pub social_link: String,
    pub social_label: String,
}

/// The mint client as seen by the page.
pub struct MintApp {
    sessions: SessionManager,
    session: WalletSession,
    orchestrator: MintOrchestrator,
    subscriber: EventSubscriber,
    contract_address: Address,
    events: Option<MintEventStream>,
    last_transaction: Option<MintTransaction>,
}

impl MintApp {
    /// App for the deployed collection on Sepolia.
    pub fn new(gateway: ProviderGateway, config: &MintClientConfig) -> Self {
        Self::with_target(gateway, config, CONTRACT_ADDRESS, REQUIRED_CHAIN)
    }

    /// App for another deployment of the same contract.
    pub fn with_target(
        gateway: ProviderGateway,
        config: &MintClientConfig,
        contract_address: Address,
        required_chain: ChainId,
    ) -> Self {
        Self {
            sessions: SessionManager::new(gateway, required_chain),
            session: WalletSession::new(),
            orchestrator: MintOrchestrator::new(&config.rpc),
            subscriber: EventSubscriber::new(&config.events),
            contract_address,
            events: None,
            last_transaction: None,
        }
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// The most recent mint attempt that reached the network.
    pub fn last_transaction(&self) -> Option<&MintTransaction> {
        self.last_transaction.as_ref()
    }

    /// Number of running mint listeners.
    pub fn active_listeners(&self) -> usize {
        self.subscriber.active_listeners()
    }

    /// Current render state.
    pub fn view(&self) -> View {
        let authenticated = self.session.is_authenticated();
        View {
            show_connect_button: !authenticated,
            show_mint_button: authenticated,
            account: self.session.account(),
            network_warning: self.session.network_warning().cloned(),
            social_link: constants::twitter_link(),
            social_label: constants::twitter_label(),
        }
    }

    /// Silent start-up probe.
    pub async fn on_mount(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        match self.sessions.probe_authorization(&mut self.session).await {
            ProbeOutcome::Found(_) => self.establish(&mut notices).await,
            ProbeOutcome::NotFound => {}
            ProbeOutcome::ProviderAbsent => notices.push(Notice::InstallWallet),
        }
        notices
    }

    /// "Connect to Wallet".
    pub async fn connect_wallet(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        match self.sessions.request_authorization(&mut self.session).await {
            Ok(account) => {
                notices.push(Notice::Connected { account });
                self.establish(&mut notices).await;
            }
            Err(e) => report(&e, &mut notices),
        }
        notices
    }

    /// "Mint NFT": submit and wait for inclusion.
    pub async fn mint_nft(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();

        let contract = match self.signed_contract() {
            Ok(contract) => contract,
            Err(e) => {
                report(&e, &mut notices);
                return notices;
            }
        };

        let mut txn = match self.orchestrator.mint(&self.session, &contract).await {
            Ok(txn) => txn,
            Err(e) => {
                report(&e, &mut notices);
                return notices;
            }
        };
        notices.push(Notice::MintSubmitted { tx_hash: txn.hash });

        match self.orchestrator.await_inclusion(&contract, &mut txn).await {
            Ok(hash) => notices.push(Notice::minted(hash)),
            Err(e) => report(&e, &mut notices),
        }
        self.last_transaction = Some(txn);
        notices
    }

    /// Wait for the next mint notification from the attached listener.
    ///
    /// Returns `None` when no listener is attached or it has stopped.
    pub async fn next_mint_notice(&mut self) -> Option<Notice> {
        let event = self.events.as_mut()?.recv().await?;
        Some(Notice::mint_completed(self.contract_address, &event))
    }

    /// Take the listener's stream to consume it elsewhere.
    pub fn take_event_stream(&mut self) -> Option<MintEventStream> {
        self.events.take()
    }

    /// Network check and listener attachment after a successful authorization.
    async fn establish(&mut self, notices: &mut Vec<Notice>) {
        match self.sessions.verify_network(&mut self.session).await {
            Ok(NetworkCheck::Matched(_)) => {}
            Ok(check @ NetworkCheck::Mismatch { .. }) => {
                if let Some(warning) = check.warning() {
                    report(&warning, notices);
                }
            }
            Ok(NetworkCheck::Skipped(reason)) => {
                notices.push(Notice::NetworkUnverified { reason });
            }
            Err(e) => report(&e, notices),
        }

        let contract = match self.signed_contract() {
            Ok(contract) => contract,
            Err(e) => {
                report(&e, notices);
                return;
            }
        };
        if let Subscription::Attached(stream) =
            self.subscriber.subscribe(self.session.id(), &contract).await
        {
            self.events = Some(stream);
        }
    }

    fn signed_contract(&self) -> MintResult<NftContract> {
        let account = self
            .session
            .account()
            .ok_or_else(|| MintError::SessionNotReady("no authorized account".to_string()))?;
        let gateway = self.sessions.gateway();
        let signer = gateway.signer(account)?;
        Ok(gateway.bind_contract(signer, self.contract_address))
    }
}

fn report(error: &MintError, notices: &mut Vec<Notice>) {
    match error {
        MintError::WrongNetwork { .. } | MintError::AuthorizationDenied(_) => {
            tracing::warn!(error = %error, "Mint flow warning")
        }
        _ => tracing::error!(error = %error, "Mint flow error"),
    }
    if let Some(notice) = Notice::from_error(error) {
        notices.push(notice);
    }
}
