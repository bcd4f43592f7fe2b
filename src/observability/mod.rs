//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! session / transaction / events produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//! ```
//!
//! Metrics are no-ops until the embedding application installs a recorder.

pub mod logging;
pub mod metrics;
