//! Metrics collection.
//!
//! # Metrics
//! - `solana_demo_requests_total` (counter): upstream calls by operation, outcome
//! - `solana_demo_request_duration_seconds` (histogram): latency by operation
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no exporter is installed here,
//!   embedding applications install their own recorder
//! - Outcome labels mirror the error taxonomy

use std::time::Instant;

use crate::solana::types::{SolanaError, SolanaResult};

/// Label for a finished call.
pub fn outcome_label<T>(result: &SolanaResult<T>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(SolanaError::MalformedAddress(_)) => "malformed_address",
        Err(SolanaError::InvalidAmount(_)) => "invalid_amount",
        Err(SolanaError::UpstreamUnavailable(_)) => "upstream_unavailable",
        Err(SolanaError::UpstreamProtocolError(_)) => "upstream_protocol_error",
        Err(SolanaError::Signing(_)) => "signing_error",
        Err(SolanaError::Encoding(_)) => "encoding_error",
        Err(SolanaError::Configuration(_)) => "configuration_error",
    }
}

/// Record one upstream call.
pub fn record_request(operation: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "solana_demo_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("solana_demo_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of `result` and hand it back.
pub fn observe<T>(operation: &'static str, start: Instant, result: SolanaResult<T>) -> SolanaResult<T> {
    record_request(operation, outcome_label(&result), start);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome_label(&Ok::<_, SolanaError>(())), "ok");
        assert_eq!(
            outcome_label::<()>(&Err(SolanaError::UpstreamUnavailable("x".into()))),
            "upstream_unavailable"
        );
        assert_eq!(
            outcome_label::<()>(&Err(SolanaError::MalformedAddress("x".into()))),
            "malformed_address"
        );
    }

    #[test]
    fn test_observe_returns_result_unchanged() {
        // No recorder installed: recording is a no-op
        let result = observe("balance", Instant::now(), Ok::<_, SolanaError>(42));
        assert_eq!(result.unwrap(), 42);
    }
}
