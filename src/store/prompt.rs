use crate::{Result, SlashPromptError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Literal token in prompt content replaced with the text typed after the command
pub const INPUT_PLACEHOLDER: &str = "{input}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub title: String,
    pub command: String,
    pub content: String,
    pub creator: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Prompt {
    /// Build a validated prompt; the command is normalized to start with `/`
    pub fn new(
        title: &str,
        command: &str,
        content: &str,
        creator: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        require_fields(title, command, content)?;

        Ok(Self {
            title: title.to_string(),
            command: normalize_command(command),
            content: content.to_string(),
            creator: creator.to_string(),
            created: now,
            modified: now,
        })
    }

    /// Whether the content carries the `{input}` placeholder
    pub fn has_placeholder(&self) -> bool {
        self.content.contains(INPUT_PLACEHOLDER)
    }
}

/// Prefix `command` with `/` unless it already starts with one
pub fn normalize_command(command: &str) -> String {
    if command.starts_with('/') {
        command.to_string()
    } else {
        format!("/{}", command)
    }
}

/// Title, command and content are all mandatory
pub fn require_fields(title: &str, command: &str, content: &str) -> Result<()> {
    let missing: Vec<&str> = [("title", title), ("command", command), ("content", content)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SlashPromptError::Validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )))
    }
}
