//! Shared application state.

use procura_core::{HeuristicPipeline, ProcuraConfig};

/// State shared by all request handlers.
pub struct AppState {
    pub config: ProcuraConfig,
    pub pipeline: HeuristicPipeline,
}

impl AppState {
    pub fn new(config: ProcuraConfig) -> Self {
        let pipeline = HeuristicPipeline::with_config(&config.extraction);
        Self { config, pipeline }
    }
}
