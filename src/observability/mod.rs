//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All operations produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms via the metrics facade)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → whatever metrics recorder the embedding application installs
//! ```

pub mod logging;
pub mod metrics;
