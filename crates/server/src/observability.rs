use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus 指标（使用默认 registry）
pub static FILES_UPLOADED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("search_hub_files_uploaded_total", "Total files stored")
        .expect("register files_uploaded_total")
});

pub static UPLOADED_BYTES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("search_hub_uploaded_bytes_total", "Total payload bytes stored")
        .expect("register uploaded_bytes_total")
});

pub static FILES_DOWNLOADED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("search_hub_files_downloaded_total", "Total downloads started")
        .expect("register files_downloaded_total")
});

pub static FILES_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("search_hub_files_deleted_total", "Total files deleted")
        .expect("register files_deleted_total")
});

pub static SEARCH_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("search_hub_search_requests_total", "Total aggregated searches served")
        .expect("register search_requests_total")
});

/// Touch every metric so `/metrics` lists them before first use.
pub fn init_metrics() {
    Lazy::force(&FILES_UPLOADED_TOTAL);
    Lazy::force(&UPLOADED_BYTES_TOTAL);
    Lazy::force(&FILES_DOWNLOADED_TOTAL);
    Lazy::force(&FILES_DELETED_TOTAL);
    Lazy::force(&SEARCH_REQUESTS_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
