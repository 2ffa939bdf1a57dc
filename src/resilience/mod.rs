//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream (RPC, indexer, price aggregator):
//!     → timeouts.rs (enforce per-call deadline)
//!     → expiry surfaces as UpstreamUnavailable
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries or circuit breaking; retry policy belongs to the caller

pub mod timeouts;

pub use timeouts::with_deadline;
