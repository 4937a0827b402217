//! Management surface for an editor UI: every action answers with a
//! human-readable status line and the refreshed list of titles.

use crate::store::{Prompt, PromptStore};
use crate::SlashPromptError;

/// Result of a management action, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub ok: bool,
    pub message: String,
    pub titles: Vec<String>,
}

pub struct Manager<'a> {
    store: &'a mut PromptStore,
}

impl<'a> Manager<'a> {
    pub fn new(store: &'a mut PromptStore) -> Self {
        Self { store }
    }

    pub fn create(&mut self, title: &str, command: &str, content: &str) -> Status {
        let outcome = self.store.create(title, command, content);
        let message = match outcome {
            Ok(ref prompt) => format!("Prompt '{}' created successfully!", prompt.title),
            Err(ref e) => error_message(e, "create", [title, command, content]),
        };
        self.status(outcome.is_ok(), message)
    }

    pub fn update(&mut self, selected: &str, title: &str, command: &str, content: &str) -> Status {
        let outcome = self.store.update(selected, title, command, content);
        let message = match outcome {
            Ok(ref prompt) => format!("Prompt '{}' updated successfully!", prompt.title),
            Err(ref e) => error_message(e, "update", [title, command, content]),
        };
        self.status(outcome.is_ok(), message)
    }

    pub fn delete(&mut self, selected: &str) -> Status {
        let outcome = self.store.delete(selected);
        let message = match outcome {
            Ok(()) => format!("Prompt '{}' deleted successfully!", selected),
            Err(ref e) => error_message(e, "delete", [selected]),
        };
        self.status(outcome.is_ok(), message)
    }

    pub fn list(&self) -> Vec<String> {
        self.store.list().map(str::to_string).collect()
    }

    pub fn get(&self, title: &str) -> Option<&Prompt> {
        self.store.get(title)
    }

    /// `(title, command, content)` to prefill the editor; blanks if unknown
    pub fn load_details(&self, selected: &str) -> (String, String, String) {
        match self.store.get(selected) {
            Some(p) => (p.title.clone(), p.command.clone(), p.content.clone()),
            None => (String::new(), String::new(), String::new()),
        }
    }

    fn status(&self, ok: bool, message: String) -> Status {
        if ok {
            tracing::info!("{}", message);
        } else {
            tracing::warn!("{}", message);
        }
        Status {
            ok,
            message,
            titles: self.list(),
        }
    }
}

fn error_message<const N: usize>(err: &SlashPromptError, action: &str, fields: [&str; N]) -> String {
    match err {
        SlashPromptError::Validation(_) if fields.iter().any(|f| f.is_empty()) => {
            "Error: All fields are required".to_string()
        }
        SlashPromptError::Validation(msg) => format!("Error: {}", msg),
        SlashPromptError::DuplicateCommand(cmd) => format!("Error: Command {} already exists", cmd),
        SlashPromptError::NotFound(_) => format!("Error: Please select a prompt to {}", action),
        other => format!("Error: could not {} prompt: {}", action, other),
    }
}
