//! DAOGov API - DAO Governance Core
//!
//! Proposals are submitted, voted on and finalized against a quorum rule;
//! approved proposals can then be executed. A separate symbolic evaluator maps
//! risk/impact tags to a decision bound by a SHA3-512 commitment.
//!
//! Advisory collaborators (policy analysis text, scenario vectors) are
//! attached to finalize/execute responses but never drive a transition.

mod advisory;
mod audit;
mod config;
mod error;
mod extract;
mod hashing;
mod models;
mod proposal;
mod routes;
mod state;
mod symbolic;

use crate::config::Settings;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting DAOGov - DAO Governance Core...");

    // Load configuration
    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");

    let state = Arc::new(AppState::from_settings(&settings));

    // Build the router
    let app = create_router(state, &settings);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   ─── Proposal Lifecycle ───");
    info!("   POST /api/proposals               - Submit a proposal");
    info!("   GET  /api/proposals               - List proposals (?status=)");
    info!("   GET  /api/proposals/{{id}}          - Get a proposal");
    info!("   POST /api/proposals/{{id}}/votes    - Cast a vote");
    info!("   POST /api/proposals/{{id}}/finalize - Apply quorum rule");
    info!("   POST /api/proposals/{{id}}/execute  - Execute an approved proposal");
    info!("");
    info!("   ─── Symbolic Governance ───");
    info!("   POST /api/symbolic/evaluate       - Evaluate risk/impact tags");
    info!("   POST /api/symbolic/verify         - Verify a commitment hash");
    info!("");
    info!("   ─── Audit ───");
    info!("   GET  /api/audit                   - Audit trail (?resourceId=&limit=)");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,daogov=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
