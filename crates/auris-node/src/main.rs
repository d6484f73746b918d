//! `auris-node` – Acoustic Source Stream Bridge
//!
//! This binary is the entry point for the AURIS bridge.  It:
//!
//! 1. Loads the stream configuration (first CLI argument, or the
//!    `AURIS_CONFIG` environment variable).
//! 2. Evaluates the [`StreamGate`]: per stream, non-socket transports
//!    disable the stream, socket transports with a non-json encoding abort
//!    startup.
//! 3. Wires one adapter task per enabled stream onto the event bus.
//! 4. Runs until **Ctrl-C**.

mod config;
mod gate;
mod node;

use auris_bridge::EventBus;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::gate::StreamGate;
use crate::node::BridgeNode;

#[tokio::main]
async fn main() {
    // ── Structured logging ────────────────────────────────────────────────
    // Initialise tracing-subscriber using RUST_LOG (defaults to "info").
    // Set AURIS_LOG_FORMAT=json to emit newline-delimited JSON logs suitable
    // for log aggregators.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("AURIS_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    // ── Configuration ─────────────────────────────────────────────────────
    let Some(config_path) = config_path() else {
        error!("no configuration path given (pass it as the first argument or set AURIS_CONFIG)");
        std::process::exit(2);
    };

    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, path = %config_path.display(), "cannot load configuration");
            std::process::exit(1);
        }
    };

    // ── Stream gate ───────────────────────────────────────────────────────
    // A Configuration error here is an operator misconfiguration requiring
    // manual fix; there is no retry or default substitution.
    let gate = match StreamGate::evaluate(&config) {
        Ok(gate) => gate,
        Err(e) => {
            error!(error = %e, "startup aborted");
            std::process::exit(1);
        }
    };

    if !gate.localization_enabled && !gate.tracking_enabled {
        warn!("both streams are disabled by configuration; the bridge will idle");
    }

    // ── Node wiring ───────────────────────────────────────────────────────
    let bus = Arc::new(EventBus::default());
    let node = BridgeNode::new(Arc::clone(&bus), gate);
    let handles = node.spawn();
    info!(
        localization = gate.localization_enabled,
        tracking = gate.tracking_enabled,
        "auris bridge running"
    );

    // ── Shutdown ──────────────────────────────────────────────────────────
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C");
    }
    info!("Ctrl-C received; shutting down");
    for handle in handles {
        handle.abort();
    }
}

/// Resolve the configuration path: first CLI argument, then `AURIS_CONFIG`.
fn config_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("AURIS_CONFIG").ok())
        .map(PathBuf::from)
}
