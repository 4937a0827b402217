mod clock;
mod file;
mod map;
mod prompt;
mod shared;

pub use clock::{Clock, SystemClock};
pub use file::{LoadOrigin, PromptStore};
pub use map::PromptMap;
pub use prompt::{normalize_command, require_fields, Prompt, INPUT_PLACEHOLDER};
pub use shared::SharedStore;
