//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and upstream client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) is attached to every request span
//! - Metrics are cheap and disabled by default

pub mod logging;
pub mod metrics;
