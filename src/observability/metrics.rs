//! Metrics collection.
//!
//! # Metrics
//! - `nft_authorizations_total` (counter): wallet authorizations by source, outcome
//! - `nft_mint_attempts_total` (counter): mint attempts by outcome
//! - `nft_mint_events_total` (counter): mint notifications by outcome

/// Record an authorization attempt.
pub fn record_authorization(source: &'static str, outcome: &'static str) {
    metrics::counter!("nft_authorizations_total", "source" => source, "outcome" => outcome)
        .increment(1);
}

/// Record the outcome of a mint attempt.
pub fn record_mint_attempt(outcome: &'static str) {
    metrics::counter!("nft_mint_attempts_total", "outcome" => outcome).increment(1);
}

/// Record a received mint notification.
pub fn record_mint_event(outcome: &'static str) {
    metrics::counter!("nft_mint_events_total", "outcome" => outcome).increment(1);
}
