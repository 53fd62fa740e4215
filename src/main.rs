//! PromptJudge - Application Entry Point
//!
//! This is the main entry point for the PromptJudge server.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptjudge::{
    auth::provider_from_config, catalog::Catalog, config::CONFIG, services::SessionService,
    simulation::Pipeline, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let json_logs = CONFIG.server.json_logs;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting PromptJudge server...");

    let catalog = Catalog::bundled()?;
    tracing::info!(problems = catalog.len(), "Loaded problem catalog");

    let pipeline = Pipeline::simulated(&CONFIG.simulation);
    tracing::info!(
        generation_delay_ms = CONFIG.simulation.generation_delay.as_millis() as u64,
        test_run_delay_ms = CONFIG.simulation.test_run_delay.as_millis() as u64,
        seeded = CONFIG.simulation.seed.is_some(),
        "Simulated pipeline ready"
    );

    let auth = provider_from_config(&CONFIG.auth);

    // Create application state
    let state = AppState::new(catalog, pipeline, auth, CONFIG.clone());

    tokio::spawn(SessionService::sweep_idle_sessions(state.clone()));
    tracing::info!(
        idle_ttl_secs = CONFIG.sessions.idle_ttl.as_secs(),
        "Idle session sweeper started"
    );

    // Build the router
    let app = promptjudge::app(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
