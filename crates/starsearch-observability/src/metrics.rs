//! Metrics collection with Prometheus
//!
//! This module provides Prometheus metrics for StarSearch:
//! - Handler request counts by endpoint and outcome
//! - Upstream latency histograms by endpoint
//! - Upstream status code counts

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use std::sync::Arc;

/// How a handler request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Upstream JSON relayed with 200
    Success,
    /// Upstream returned a non-success status, relayed as an error envelope
    UpstreamError,
    /// Transport, parse or request failure answered with 500
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::UpstreamError => "upstream_error",
            Self::Failure => "failure",
        }
    }
}

/// Metrics collector for StarSearch
#[derive(Clone)]
pub struct Metrics {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Handler requests by endpoint and outcome
    pub requests_total: CounterVec,
    /// Upstream round-trip duration
    pub upstream_duration_seconds: HistogramVec,
    /// Upstream responses by status code
    pub upstream_responses_total: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = CounterVec::new(
            Opts::new("starsearch_requests_total", "Total number of API requests"),
            &["endpoint", "outcome"],
        )?;

        let upstream_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "starsearch_upstream_duration_seconds",
                "Upstream directory request duration in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["endpoint"],
        )?;

        let upstream_responses_total = CounterVec::new(
            Opts::new(
                "starsearch_upstream_responses_total",
                "Upstream responses by status code",
            ),
            &["endpoint", "status"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(upstream_duration_seconds.clone()))?;
        registry.register(Box::new(upstream_responses_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            upstream_duration_seconds,
            upstream_responses_total,
        })
    }

    /// Record how a handler request ended
    pub fn record_request(&self, endpoint: &str, outcome: Outcome) {
        self.requests_total
            .with_label_values(&[endpoint, outcome.as_str()])
            .inc();
    }

    /// Record an upstream round trip that produced a status
    pub fn record_upstream(&self, endpoint: &str, status: u16, duration_secs: f64) {
        self.upstream_duration_seconds
            .with_label_values(&[endpoint])
            .observe(duration_secs);
        self.upstream_responses_total
            .with_label_values(&[endpoint, &status.to_string()])
            .inc();
    }

    /// Render all metrics in the Prometheus text format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        prometheus::TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(metrics.encode().is_ok());
    }

    #[test]
    fn test_record_request() {
        let metrics = Metrics::new().unwrap();
        metrics.record_request("search", Outcome::Success);
        metrics.record_request("search", Outcome::Success);
        metrics.record_request("popular", Outcome::Failure);

        let text = metrics.encode().unwrap();
        assert!(
            text.contains(r#"starsearch_requests_total{endpoint="search",outcome="success"} 2"#)
        );
        assert!(
            text.contains(r#"starsearch_requests_total{endpoint="popular",outcome="failure"} 1"#)
        );
    }

    #[test]
    fn test_record_upstream() {
        let metrics = Metrics::new().unwrap();
        metrics.record_upstream("search", 404, 0.2);

        let text = metrics.encode().unwrap();
        assert!(text.contains(
            r#"starsearch_upstream_responses_total{endpoint="search",status="404"} 1"#
        ));
        assert!(
            text.contains(r#"starsearch_upstream_duration_seconds_count{endpoint="search"} 1"#)
        );
    }

    #[test]
    fn test_outcome_as_str() {
        assert_eq!(Outcome::Success.as_str(), "success");
        assert_eq!(Outcome::UpstreamError.as_str(), "upstream_error");
        assert_eq!(Outcome::Failure.as_str(), "failure");
    }
}
