use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, register_counter, register_counter_vec,
    register_gauge, register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("imagegen_requests_total", "Total number of generation requests").unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("imagegen_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("imagegen_cache_misses_total", "Total cache misses").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "imagegen_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
    pub static ref PROVIDER_LATENCY: Histogram = register_histogram!(
        "imagegen_provider_latency_seconds",
        "Text-to-image provider round trip in seconds"
    )
    .unwrap();
    pub static ref FAILURES: CounterVec = register_counter_vec!(
        "imagegen_failures_total",
        "Failed generation requests by error code",
        &["code"]
    )
    .unwrap();
    pub static ref UPLOAD_FAILURES: Counter = register_counter!(
        "imagegen_upload_failures_total",
        "Secondary storage uploads that failed after a successful generation"
    )
    .unwrap();
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("imagegen_cache_size", "Current number of items in cache").unwrap();
}
