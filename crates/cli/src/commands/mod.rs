pub mod chains;
pub mod portfolio;

use std::path::Path;

use anyhow::{Context, Result};
use lantern_core::ChainRegistry;

/// Built-in registry, or one loaded from a JSON file.
pub fn load_registry(path: Option<&Path>) -> Result<ChainRegistry> {
    match path {
        None => Ok(ChainRegistry::builtin()),
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading registry {}", path.display()))?;
            ChainRegistry::from_json(&json).map_err(Into::into)
        }
    }
}
