pub mod autocomplete;
pub mod config;
pub mod manage;
pub mod resolver;
pub mod store;

pub use config::Config;
pub use resolver::{resolve, Resolution};
pub use store::{Prompt, PromptStore, SharedStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlashPromptError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Command {0} already exists")]
    DuplicateCommand(String),

    #[error("Prompt not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SlashPromptError>;
