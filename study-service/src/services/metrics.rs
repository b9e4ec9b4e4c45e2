//! Service-specific Prometheus metrics.
//!
//! HTTP request metrics come from the shared middleware; this module covers
//! upstream calls and recommendation outcomes.

use super::providers::ProviderError;
use metrics::{counter, histogram};
use std::time::Duration;

/// Record one upstream API call.
pub fn record_upstream_call<T>(
    provider: &'static str,
    result: &Result<T, ProviderError>,
    elapsed: Duration,
) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };

    counter!("upstream_requests_total", "provider" => provider, "outcome" => outcome)
        .increment(1);
    histogram!("upstream_request_duration_seconds", "provider" => provider)
        .record(elapsed.as_secs_f64());
}

/// Record whether a helper produced results (`found`) or the absence sentinel
/// (`empty`).
pub fn record_recommendation(kind: &'static str, found: bool) {
    let outcome = if found { "found" } else { "empty" };
    counter!("recommendations_total", "kind" => kind, "outcome" => outcome).increment(1);
}
