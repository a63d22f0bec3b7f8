use std::fs;
use std::path::PathBuf;

use color_eyre::Result;
use tracing::{debug, warn};

use crate::config::AppConfig;

const CONFIG_DIR: &str = "lazyshop";
const CONFIG_FILE: &str = "config.toml";

fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the config file, falling back to defaults when it does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load() -> Result<AppConfig> {
    let Some(path) = config_path() else {
        debug!("No config directory found, using defaults");
        return Ok(AppConfig::default());
    };

    if !path.exists() {
        debug!(?path, "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = toml::from_str(&content)?;
    debug!(?path, "Loaded config");
    Ok(config)
}

fn save(config: &AppConfig) -> Result<()> {
    let Some(dir) = config_dir() else {
        warn!("Could not determine config directory");
        return Ok(());
    };

    fs::create_dir_all(&dir)?;
    let path = dir.join(CONFIG_FILE);
    fs::write(&path, toml::to_string_pretty(config)?)?;
    debug!(?path, "Saved config");
    Ok(())
}

/// Persist the selected theme, keeping the rest of the file as loaded.
///
/// # Errors
/// Returns an error if the config cannot be read or written.
pub fn save_theme(name: &str) -> Result<()> {
    let mut config = load()?;
    config.theme.name = name.to_string();
    save(&config)
}
