//! Session state subsystem.
//!
//! # Data Flow
//! ```text
//! page mount   → manager.probe_authorization  ─┐
//! user connect → manager.request_authorization ─┼→ WalletSession (state.rs)
//!                manager.verify_network        ─┘
//! ```
//!
//! The session is owned by the caller and passed in by `&mut`. The event
//! listener never touches it.

pub mod manager;
pub mod state;

pub use manager::{NetworkCheck, ProbeOutcome, SessionManager};
pub use state::{AuthSource, NetworkWarning, SessionId, SessionPhase, WalletSession};
