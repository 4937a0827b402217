mod loader;

pub use loader::{default_config_path, load_config, load_config_from};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl StoreConfig {
    /// Store path with a leading `~` expanded to the home directory
    pub fn resolved_path(&self) -> PathBuf {
        let raw = self.path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&raw).to_string())
    }
}

fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "slashprompt")
        .map(|dirs| dirs.data_dir().join("prompts.json"))
        .unwrap_or_else(|| PathBuf::from("~/.local/share/slashprompt/prompts.json"))
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Recorded as the creator of every new prompt
    #[serde(default = "default_creator")]
    pub creator: String,
}

fn default_creator() -> String {
    "default_user".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            creator: default_creator(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteConfig {
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_max_suggestions() -> usize {
    10
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            case_sensitive: false,
        }
    }
}
