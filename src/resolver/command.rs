use crate::store::{Prompt, INPUT_PLACEHOLDER};

/// Outcome of running chat input through the slash-command resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub matched: bool,
}

impl Resolution {
    fn passthrough(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: false,
        }
    }
}

/// Split `/cmd rest of input` at the first whitespace character.
///
/// Only that single separator is consumed; any further leading whitespace
/// stays in the remainder.
pub fn split_command(text: &str) -> (&str, &str) {
    match text.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((idx, sep)) => (&text[..idx], &text[idx + sep.len_utf8()..]),
        None => (text, ""),
    }
}

/// Expand `text` if it invokes one of `prompts`, otherwise pass it through.
///
/// With text after the command, every `{input}` in the prompt content is
/// replaced by it; content without the placeholder gets it appended after a
/// blank line. If two prompts somehow share a command, the first one
/// yielded by `prompts` wins.
pub fn resolve<'a, I>(text: &str, prompts: I) -> Resolution
where
    I: IntoIterator<Item = &'a Prompt>,
{
    if !text.starts_with('/') {
        return Resolution::passthrough(text);
    }

    let (command, remainder) = split_command(text);

    let Some(prompt) = prompts.into_iter().find(|p| p.command == command) else {
        tracing::debug!("No prompt registered for {}", command);
        return Resolution::passthrough(text);
    };

    tracing::debug!("Resolved {} to prompt '{}'", command, prompt.title);

    let resolved = if remainder.is_empty() {
        prompt.content.clone()
    } else if prompt.has_placeholder() {
        prompt.content.replace(INPUT_PLACEHOLDER, remainder)
    } else {
        format!("{}\n\n{}", prompt.content, remainder)
    };

    Resolution {
        text: resolved,
        matched: true,
    }
}
