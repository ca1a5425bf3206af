use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Gate counters
pub static REQUESTS_ALLOWED: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gateway_requests_allowed_total",
            "Requests allowed through the authentication gate",
        ),
        &["outcome"], // "bypass" | "verified"
    )
    .unwrap()
});

// Denials are labelled with the failure kind for server-side diagnosis;
// token values never appear in labels.
pub static REQUESTS_DENIED: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gateway_requests_denied_total",
            "Requests denied by the authentication gate",
        ),
        &["reason"],
    )
    .unwrap()
});

// Proxy metrics
pub static PROXY_REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gateway_proxy_requests_total",
            "Requests forwarded to an upstream service",
        ),
        &["upstream"],
    )
    .unwrap()
});

pub static PROXY_LATENCY: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("gateway_proxy_latency_seconds", "Upstream request latency")
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
    )
    .unwrap()
});

pub static ROUTE_MISSES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "gateway_route_misses_total",
        "Allowed requests with no matching upstream route",
    )
    .unwrap()
});

/// Register all metrics with the registry
pub fn register_metrics() {
    REGISTRY
        .register(Box::new(REQUESTS_ALLOWED.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(REQUESTS_DENIED.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(PROXY_REQUESTS_TOTAL.clone()))
        .unwrap();
    REGISTRY.register(Box::new(PROXY_LATENCY.clone())).unwrap();
    REGISTRY.register(Box::new(ROUTE_MISSES.clone())).unwrap();
}
