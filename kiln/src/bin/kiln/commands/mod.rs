pub mod check;
pub mod generate;
pub mod plugins;

use std::path::Path;

use anyhow::Result;
use kiln_build::Builder;

use crate::output::OutputManager;

/// Builder for the configuration at `config`, reporting where it was read from.
pub fn load_builder(config: &Path, output: &OutputManager) -> Result<Builder> {
    if config.exists() {
        output.verbose(&format!("using configuration {}", config.display()));
    } else {
        output.verbose(&format!("{} not found, using defaults", config.display()));
    }
    Builder::from_config(config)
}
