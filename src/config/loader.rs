use super::Config;
use crate::Result;
use std::path::{Path, PathBuf};

/// Load configuration from the default location or return defaults
pub fn load_config() -> Result<Config> {
    load_config_from(&default_config_path())
}

/// Load configuration from `config_path`, falling back to defaults if it doesn't exist
pub fn load_config_from(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::debug!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        // Create default config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Config::default())
    }
}

/// Get the path to the config file
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "slashprompt")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.config/slashprompt/config.toml"))
}
