use super::command::resolve;
use crate::store::Prompt;

/// Hook for a host chat app, applied to each submitted message.
///
/// Returns `(text, visible_text)` for the host to send and display. When the
/// message invokes a prompt both become the resolved content; otherwise both
/// inputs come back untouched.
pub fn modify_chat_input<'a, I>(text: &str, visible_text: &str, prompts: I) -> (String, String)
where
    I: IntoIterator<Item = &'a Prompt>,
{
    let resolution = resolve(text, prompts);
    if resolution.matched {
        (resolution.text.clone(), resolution.text)
    } else {
        (text.to_string(), visible_text.to_string())
    }
}
