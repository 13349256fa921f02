// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! HTTP host for the dashboard. The launch table is loaded once at
//! startup and shared immutably; handlers only ever read it.

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use liftoff_api::{
    parse_dashboard_params, scatter_figure, site_options, success_figure, ApiError, ApiErrorCode,
    DashboardResponseDto, RangeDto, SitesResponseDto, API_VERSION,
};
use liftoff_model::{PayloadBounds, RecordTable};
use liftoff_query::{aggregate_outcomes, filter_for_scatter};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::info;

mod http_handlers;

pub const CRATE_NAME: &str = "liftoff-server";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub response_max_bytes: usize,
    pub sites_ttl: Duration,
    pub dashboard_ttl: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            response_max_bytes: 512 * 1024,
            sites_ttl: Duration::from_secs(300),
            dashboard_ttl: Duration::from_secs(30),
        }
    }
}

#[derive(Default)]
pub struct RequestMetrics {
    counts: Mutex<HashMap<(String, u16), u64>>,
    latency_ns: Mutex<HashMap<String, Vec<u64>>>,
}

impl RequestMetrics {
    pub(crate) async fn observe_request(&self, route: &str, status: StatusCode, latency: Duration) {
        let mut counts = self.counts.lock().await;
        *counts
            .entry((route.to_string(), status.as_u16()))
            .or_insert(0) += 1;
        drop(counts);
        let mut latency_map = self.latency_ns.lock().await;
        latency_map
            .entry(route.to_string())
            .or_insert_with(Vec::new)
            .push(latency.as_nanos() as u64);
    }

    pub(crate) async fn render_text(&self) -> String {
        let counts = self.counts.lock().await.clone();
        let mut rows: Vec<((String, u16), u64)> = counts.into_iter().collect();
        rows.sort();
        let mut body = String::new();
        for ((route, status), count) in rows {
            body.push_str(&format!(
                "http_requests_total{{route=\"{route}\",status=\"{status}\"}} {count}\n"
            ));
        }
        let latency = self.latency_ns.lock().await.clone();
        let mut routes: Vec<(String, Vec<u64>)> = latency.into_iter().collect();
        routes.sort_by(|a, b| a.0.cmp(&b.0));
        for (route, samples) in routes {
            body.push_str(&format!(
                "http_request_latency_p95_seconds{{route=\"{route}\"}} {:.6}\n",
                percentile_ns(&samples, 0.95) as f64 / 1_000_000_000.0
            ));
        }
        body
    }
}

fn percentile_ns(samples: &[u64], p: f64) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    let mut sorted: Vec<u64> = samples.to_vec();
    sorted.sort_unstable();
    let idx = ((sorted.len() as f64) * p).ceil() as usize;
    sorted[idx.saturating_sub(1).min(sorted.len() - 1)]
}

#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RecordTable>,
    pub bounds: PayloadBounds,
    pub api: ApiConfig,
    pub ready: Arc<AtomicBool>,
    pub(crate) metrics: Arc<RequestMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(table: RecordTable, bounds: PayloadBounds) -> Self {
        Self::with_config(table, bounds, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(table: RecordTable, bounds: PayloadBounds, api: ApiConfig) -> Self {
        Self {
            table: Arc::new(table),
            bounds,
            api,
            ready: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http_handlers::healthz_handler))
        .route("/readyz", get(http_handlers::readyz_handler))
        .route("/metrics", get(http_handlers::metrics_handler))
        .route("/v1/version", get(http_handlers::version_handler))
        .route("/v1/sites", get(http_handlers::sites_handler))
        .route("/v1/dashboard", get(http_handlers::dashboard_handler))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_is_lowercase_and_stable() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn percentile_picks_the_upper_tail() {
        let samples: Vec<u64> = (1..=100).collect();
        assert_eq!(percentile_ns(&samples, 0.95), 95);
        assert_eq!(percentile_ns(&[], 0.95), 0);
        assert_eq!(percentile_ns(&[7], 0.5), 7);
    }
}
