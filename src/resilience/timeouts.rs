//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap every upstream call with a deadline
//! - Map an expired deadline to `UpstreamUnavailable`
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - No retries: a single expired attempt is the final outcome

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::solana::types::{SolanaError, SolanaResult};

/// Run `fut` under `deadline`, reporting expiry as [`SolanaError::UpstreamUnavailable`].
pub async fn with_deadline<T, F>(operation: &str, deadline: Duration, fut: F) -> SolanaResult<T>
where
    F: Future<Output = SolanaResult<T>>,
{
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, timeout_ms = deadline.as_millis() as u64, "Upstream call timed out");
            Err(SolanaError::UpstreamUnavailable(format!(
                "{} timed out after {}ms",
                operation,
                deadline.as_millis()
            )))
        }
    }
}
