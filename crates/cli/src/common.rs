//! Helpers shared by the commands.

use std::path::Path;

use sdkgen_core::config::CONFIG_FILENAME;
use sdkgen_core::{GeneratorConfig, Result};
use tracing::debug;

/// Load `path`, or `sdkgen.toml` in the working directory when present,
/// or fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    if let Some(path) = path {
        return GeneratorConfig::load(path);
    }
    let local = Path::new(CONFIG_FILENAME);
    if local.is_file() {
        debug!(path = %local.display(), "Using local config file.");
        return GeneratorConfig::load(local);
    }
    Ok(GeneratorConfig::default())
}
