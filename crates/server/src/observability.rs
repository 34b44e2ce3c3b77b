use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_gauge, Encoder, IntCounter, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "catalog_products_created_total",
        "Total products created"
    )
    .expect("register products_created_total")
});

pub static UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "catalog_products_updated_total",
        "Total product updates applied"
    )
    .expect("register products_updated_total")
});

pub static DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "catalog_products_deleted_total",
        "Total products deleted"
    )
    .expect("register products_deleted_total")
});

pub static NOT_FOUND_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "catalog_product_not_found_total",
        "Total lookups of unknown product ids"
    )
    .expect("register product_not_found_total")
});

pub static PRODUCTS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "catalog_products",
        "Products currently in the catalog"
    )
    .expect("register products gauge")
});

/// Touch every lazy metric so it shows up on `/metrics` before its first use.
pub fn register_all() {
    Lazy::force(&CREATED_TOTAL);
    Lazy::force(&UPDATED_TOTAL);
    Lazy::force(&DELETED_TOTAL);
    Lazy::force(&NOT_FOUND_TOTAL);
    Lazy::force(&PRODUCTS);
}

pub fn set_product_count(n: usize) {
    PRODUCTS.set(i64::try_from(n).unwrap_or(i64::MAX));
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
