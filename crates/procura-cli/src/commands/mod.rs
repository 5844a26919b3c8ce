//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use procura_core::ProcuraConfig;

/// Load the configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ProcuraConfig> {
    if let Some(path) = config_path {
        return Ok(ProcuraConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(ProcuraConfig::from_file(&default_path)?)
    } else {
        Ok(ProcuraConfig::default())
    }
}
