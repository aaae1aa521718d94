//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, middleware, config watcher:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every per-request log line
//! - Metric updates are fire-and-forget; no recorder installed means no-op

pub mod logging;
pub mod metrics;
