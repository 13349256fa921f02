// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use liftoff_ingest::{load_launch_records_with_events, payload_bounds};
use liftoff_server::{build_router, ApiConfig, AppState};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("LIFTOFF_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("LIFTOFF_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let data_path = PathBuf::from(
        env::var("LIFTOFF_DATA").unwrap_or_else(|_| "data/launch_records.csv".to_string()),
    );

    // A bad table is fatal: the process either starts with a complete
    // table or not at all.
    let (table, _events) = load_launch_records_with_events(&data_path)
        .map_err(|e| format!("loading {} failed: {e}", data_path.display()))?;
    let bounds = payload_bounds(&table).map_err(|e| e.to_string())?;
    info!(
        rows = table.len(),
        payload_min = bounds.min,
        payload_max = bounds.max,
        "launch table loaded"
    );

    let api_cfg = ApiConfig {
        max_body_bytes: env_usize("LIFTOFF_MAX_BODY_BYTES", 16 * 1024),
        response_max_bytes: env_usize("LIFTOFF_RESPONSE_MAX_BYTES", 512 * 1024),
        sites_ttl: env_duration_ms("LIFTOFF_SITES_TTL_MS", 300_000),
        dashboard_ttl: env_duration_ms("LIFTOFF_DASHBOARD_TTL_MS", 30_000),
    };
    let state = AppState::with_config(table, bounds, api_cfg);
    let app = build_router(state);

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("bind failed: {e}"))?;
    info!("liftoff-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            let drain_ms = env_u64("LIFTOFF_SHUTDOWN_DRAIN_MS", 5000);
            tokio::time::sleep(Duration::from_millis(drain_ms)).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
