//! Mint notification subsystem.
//!
//! # Data Flow
//! ```text
//! contract logs (NewEpicNFTMinted)
//!     → subscriber.rs listener task (poll, decode, drop malformed)
//!     → MintEventStream (single consumer, owned by the app)
//! ```

pub mod subscriber;

pub use subscriber::{EventSubscriber, MintEventStream, Subscription};
