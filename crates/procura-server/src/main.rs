//! Procura HTTP service: field extraction for uploaded order PDFs.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use procura_core::ProcuraConfig;

mod error;
mod routes;
mod state;

use state::AppState;

/// Config file from `PROCURA_CONFIG` or the first argument, if any.
fn resolve_config_path() -> Option<PathBuf> {
    std::env::var_os("PROCURA_CONFIG")
        .map(PathBuf::from)
        .or_else(|| std::env::args_os().nth(1).map(PathBuf::from))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match resolve_config_path() {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ProcuraConfig::from_file(&path)?
        }
        None => ProcuraConfig::default(),
    };
    let config = config.apply_env()?;

    let addr = config.server.bind_address();
    let state = Arc::new(AppState::new(config));
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Procura server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
