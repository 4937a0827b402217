use super::Prompt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Title-keyed mapping of prompts that remembers insertion order.
///
/// Serialized as a JSON object `{ "<title>": { ...prompt } }` with the keys
/// written in insertion order, and read back in the order they appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptMap {
    entries: Vec<Prompt>,
}

impl PromptMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn get(&self, title: &str) -> Option<&Prompt> {
        self.entries.iter().find(|p| p.title == title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Prompt> {
        self.entries.iter_mut().find(|p| p.title == title)
    }

    /// Insert under `prompt.title`. An existing entry with that title is
    /// replaced in place and returned.
    pub fn insert(&mut self, prompt: Prompt) -> Option<Prompt> {
        match self.position(&prompt.title) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx], prompt)),
            None => {
                self.entries.push(prompt);
                None
            }
        }
    }

    pub fn remove(&mut self, title: &str) -> Option<Prompt> {
        self.position(title).map(|idx| self.entries.remove(idx))
    }

    pub fn values(&self) -> impl Iterator<Item = &Prompt> + '_ {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|p| p.title.as_str())
    }

    /// First prompt other than the one keyed `except` that holds `command`
    pub fn command_owner(&self, command: &str, except: Option<&str>) -> Option<&Prompt> {
        self.entries
            .iter()
            .find(|p| p.command == command && Some(p.title.as_str()) != except)
    }

    pub fn to_vec(&self) -> Vec<Prompt> {
        self.entries.clone()
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|p| p.title == title)
    }
}

impl Serialize for PromptMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|p| (&p.title, p)))
    }
}

impl<'de> Deserialize<'de> for PromptMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct PromptMapVisitor;

        impl<'de> Visitor<'de> for PromptMapVisitor {
            type Value = PromptMap;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of prompt titles to prompts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = PromptMap::new();
                while let Some((title, mut prompt)) = access.next_entry::<String, Prompt>()? {
                    // The key is the identity; keep the record consistent with it
                    prompt.title = title;
                    map.insert(prompt);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(PromptMapVisitor)
    }
}
