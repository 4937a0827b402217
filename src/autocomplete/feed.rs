use crate::store::Prompt;
use crate::Result;
use serde::{Deserialize, Serialize, Serializer};

/// What the autocomplete widget needs to know about one prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub content: String,
    pub command: String,
}

impl From<&Prompt> for FeedEntry {
    fn from(prompt: &Prompt) -> Self {
        Self {
            title: prompt.title.clone(),
            content: prompt.content.clone(),
            command: prompt.command.clone(),
        }
    }
}

/// Command-keyed projection of the store, serialized as a flat JSON object
/// `{ "/cmd": { "title", "content", "command" } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteFeed {
    entries: Vec<FeedEntry>,
}

impl AutocompleteFeed {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, command: &str) -> bool {
        self.get(command).is_some()
    }

    pub fn get(&self, command: &str) -> Option<&FeedEntry> {
        self.entries.iter().find(|e| e.command == command)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedEntry> + '_ {
        self.entries.iter()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for AutocompleteFeed {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|e| (&e.command, e)))
    }
}

/// Build the feed from the current prompts.
///
/// Should two prompts share a command, the first is kept so the feed agrees
/// with what the resolver would expand.
pub fn feed<'a, I>(prompts: I) -> AutocompleteFeed
where
    I: IntoIterator<Item = &'a Prompt>,
{
    let mut entries: Vec<FeedEntry> = Vec::new();
    for prompt in prompts {
        if entries.iter().any(|e| e.command == prompt.command) {
            continue;
        }
        entries.push(FeedEntry::from(prompt));
    }
    AutocompleteFeed { entries }
}

/// One `"<command> - <title>"` line per prompt
pub fn available_commands<'a, I>(prompts: I) -> String
where
    I: IntoIterator<Item = &'a Prompt>,
{
    let lines: Vec<String> = prompts
        .into_iter()
        .map(|p| format!("{} - {}", p.command, p.title))
        .collect();

    if lines.is_empty() {
        "No prompts available".to_string()
    } else {
        lines.join("\n")
    }
}
