//! TOML generation parameters; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dungeon::DungeonConfig;

pub fn load_config(path: &Path) -> Result<DungeonConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: DungeonConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    log::debug!("loaded {config:?} from {}", path.display());
    Ok(config)
}
