//! Mint notification listener.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use alloy::primitives::Address;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::blockchain::contract::NftContract;
use crate::blockchain::types::{MintEvent, ProviderResult};
use crate::config::EventConfig;
use crate::observability::metrics;
use crate::session::SessionId;

/// Outcome of [`EventSubscriber::subscribe`].
#[derive(Debug)]
pub enum Subscription {
    /// A new listener was attached; its events arrive on the stream.
    Attached(MintEventStream),
    /// A listener for this session and contract is already running.
    AlreadyActive,
}

impl Subscription {
    /// The stream, if a listener was attached by this call.
    pub fn into_stream(self) -> Option<MintEventStream> {
        match self {
            Subscription::Attached(stream) => Some(stream),
            Subscription::AlreadyActive => None,
        }
    }
}

/// Single-consumer stream of decoded mint notifications.
///
/// Bounded: once `buffer_size` notifications are queued the listener stops
/// polling until the consumer catches up. Nothing is dropped.
#[derive(Debug)]
pub struct MintEventStream {
    rx: mpsc::Receiver<MintEvent>,
}

impl MintEventStream {
    /// Wait for the next notification. `None` once the listener has stopped.
    pub async fn recv(&mut self) -> Option<MintEvent> {
        self.rx.recv().await
    }

    /// Next notification if one is already queued.
    pub fn try_recv(&mut self) -> Option<MintEvent> {
        self.rx.try_recv().ok()
    }
}

impl Stream for MintEventStream {
    type Item = MintEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

type ListenerKey = (SessionId, Address);

/// Attaches at most one listener per session and contract.
///
/// Listeners live as long as the subscriber; dropping it stops them all.
#[derive(Debug)]
pub struct EventSubscriber {
    poll_interval: Duration,
    buffer_size: usize,
    listeners: DashMap<ListenerKey, JoinHandle<()>>,
}

impl EventSubscriber {
    /// A zero poll interval or buffer size is raised to 1.
    pub fn new(config: &EventConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
            buffer_size: config.buffer_size.max(1),
            listeners: DashMap::new(),
        }
    }

    /// Attach a listener for `contract` in `session`.
    ///
    /// A second call with the same session and contract returns
    /// [`Subscription::AlreadyActive`] while the first listener is alive.
    /// Must be called from within a tokio runtime.
    pub async fn subscribe(&self, session: SessionId, contract: &NftContract) -> Subscription {
        let key = (session, contract.address());
        if self.is_active(&key) {
            tracing::debug!(session = %session, "Event listener already set up");
            return Subscription::AlreadyActive;
        }

        let start_block = match contract.provider().block_number().await {
            Ok(block) => Some(block),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read start block; listener will pick it up");
                None
            }
        };

        match self.listeners.entry(key) {
            Entry::Occupied(entry) if !entry.get().is_finished() => {
                tracing::debug!(session = %session, "Event listener already set up");
                Subscription::AlreadyActive
            }
            entry => {
                let (tx, rx) = mpsc::channel(self.buffer_size);
                let listener = MintListener {
                    contract: contract.clone(),
                    tx,
                    poll_interval: self.poll_interval,
                    last_block: start_block,
                };
                let handle = tokio::spawn(listener.run());
                entry.insert(handle);

                tracing::info!(
                    session = %session,
                    contract = %contract.address(),
                    start_block = ?start_block,
                    "Setup event listener!"
                );
                Subscription::Attached(MintEventStream { rx })
            }
        }
    }

    /// Number of listeners still running.
    pub fn active_listeners(&self) -> usize {
        self.listeners
            .iter()
            .filter(|entry| !entry.value().is_finished())
            .count()
    }

    fn is_active(&self, key: &ListenerKey) -> bool {
        self.listeners
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for EventSubscriber {
    fn drop(&mut self) {
        for entry in self.listeners.iter() {
            entry.value().abort();
        }
    }
}

/// Polls contract logs and forwards decoded mint events.
struct MintListener {
    contract: NftContract,
    tx: mpsc::Sender<MintEvent>,
    poll_interval: Duration,
    last_block: Option<u64>,
}

impl MintListener {
    async fn run(mut self) {
        loop {
            if let Err(e) = self.poll_events().await {
                tracing::warn!(error = %e, "Error polling mint events");
            }

            if self.tx.is_closed() {
                tracing::debug!(contract = %self.contract.address(), "Event consumer gone; listener stopping");
                return;
            }

            sleep(self.poll_interval).await;
        }
    }

    async fn poll_events(&mut self) -> ProviderResult<()> {
        let provider = self.contract.provider();
        let current_block = provider.block_number().await?;

        let Some(last_block) = self.last_block else {
            self.last_block = Some(current_block);
            tracing::info!(block = current_block, "Initialized mint listener");
            return Ok(());
        };

        if current_block <= last_block {
            return Ok(());
        }

        let filter = self.contract.mint_filter(last_block + 1, current_block);
        let logs = provider.logs(&filter).await?;

        for log in logs {
            match self.contract.decode_mint_event(&log) {
                Ok(event) => {
                    tracing::info!(
                        recipient = %event.recipient,
                        token_id = %event.token_id,
                        "Mint event received"
                    );
                    metrics::record_mint_event("relayed");
                    if self.tx.send(event).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, tx_hash = ?log.transaction_hash, "Dropping malformed mint event");
                    metrics::record_mint_event("malformed");
                }
            }
        }

        self.last_block = Some(current_block);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_settings_are_raised() {
        let subscriber = EventSubscriber::new(&EventConfig {
            poll_interval_ms: 0,
            buffer_size: 0,
        });
        assert_eq!(subscriber.poll_interval, Duration::from_millis(1));
        assert_eq!(subscriber.buffer_size, 1);
        assert_eq!(subscriber.active_listeners(), 0);
    }
}
