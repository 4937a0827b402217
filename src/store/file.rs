use super::clock::{Clock, SystemClock};
use super::map::PromptMap;
use super::prompt::{normalize_command, require_fields, Prompt};
use crate::{Result, SlashPromptError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// How the in-memory mapping was obtained at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Read from an existing, well-formed file
    Loaded { count: usize },
    /// No file existed; an empty one was written
    Created,
    /// A file existed but could not be read or parsed; started empty
    Recovered { reason: String },
}

/// Title-keyed prompt registry persisted as a single JSON file.
///
/// Every successful mutation rewrites the whole file before returning. If
/// that write fails the error is returned but the in-memory change is kept,
/// so memory may run ahead of disk until the next successful save.
pub struct PromptStore {
    path: PathBuf,
    creator: String,
    prompts: PromptMap,
    origin: LoadOrigin,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for PromptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptStore")
            .field("path", &self.path)
            .field("creator", &self.creator)
            .field("prompts", &self.prompts.len())
            .field("origin", &self.origin)
            .finish()
    }
}

impl PromptStore {
    pub fn load(path: impl Into<PathBuf>, creator: impl Into<String>) -> Result<Self> {
        Self::load_with_clock(path, creator, Box::new(SystemClock))
    }

    pub fn load_with_clock(
        path: impl Into<PathBuf>,
        creator: impl Into<String>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let path = path.into();
        let mut store = PromptStore {
            path,
            creator: creator.into(),
            prompts: PromptMap::new(),
            origin: LoadOrigin::Created,
            clock,
        };

        match std::fs::read_to_string(&store.path) {
            Ok(contents) => match serde_json::from_str::<PromptMap>(&contents) {
                Ok(prompts) => {
                    tracing::info!("Loaded {} prompt(s) from {:?}", prompts.len(), store.path);
                    store.origin = LoadOrigin::Loaded {
                        count: prompts.len(),
                    };
                    store.prompts = prompts;
                }
                Err(e) => {
                    tracing::warn!(
                        "Prompts file {:?} is malformed ({}); starting with an empty store. \
                         Existing prompts will be overwritten on the next change.",
                        store.path,
                        e
                    );
                    store.origin = LoadOrigin::Recovered {
                        reason: e.to_string(),
                    };
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No prompts file at {:?}, creating an empty one", store.path);
                store.save()?;
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read prompts file {:?} ({}); starting with an empty store",
                    store.path,
                    e
                );
                store.origin = LoadOrigin::Recovered {
                    reason: e.to_string(),
                };
            }
        }

        Ok(store)
    }

    /// Overwrite the backing file with the full mapping
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.prompts)?;

        // Write next to the target and rename so readers never see a partial file
        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!("Saved {} prompt(s) to {:?}", self.prompts.len(), self.path);
        Ok(())
    }

    pub fn create(&mut self, title: &str, command: &str, content: &str) -> Result<Prompt> {
        let prompt = Prompt::new(title, command, content, &self.creator, self.clock.now())?;

        if let Some(owner) = self.prompts.command_owner(&prompt.command, Some(title)) {
            tracing::debug!("Command {} already held by '{}'", prompt.command, owner.title);
            return Err(SlashPromptError::DuplicateCommand(prompt.command));
        }

        if self.prompts.contains_key(title) {
            return Err(SlashPromptError::Validation(format!(
                "a prompt titled '{}' already exists",
                title
            )));
        }

        self.prompts.insert(prompt.clone());
        tracing::info!("Created prompt '{}' ({})", prompt.title, prompt.command);

        self.save()?;
        Ok(prompt)
    }

    pub fn update(
        &mut self,
        selected_title: &str,
        new_title: &str,
        command: &str,
        content: &str,
    ) -> Result<Prompt> {
        if !self.prompts.contains_key(selected_title) {
            return Err(SlashPromptError::NotFound(selected_title.to_string()));
        }

        require_fields(new_title, command, content)?;
        let command = normalize_command(command);

        if self.prompts.command_owner(&command, Some(selected_title)).is_some() {
            return Err(SlashPromptError::DuplicateCommand(command));
        }

        let renaming = new_title != selected_title;
        if renaming && self.prompts.contains_key(new_title) {
            return Err(SlashPromptError::Validation(format!(
                "cannot rename '{}': a prompt titled '{}' already exists",
                selected_title, new_title
            )));
        }

        let now = self.clock.now();
        let updated = if renaming {
            let mut prompt = self
                .prompts
                .remove(selected_title)
                .ok_or_else(|| SlashPromptError::NotFound(selected_title.to_string()))?;
            prompt.title = new_title.to_string();
            prompt.command = command;
            prompt.content = content.to_string();
            prompt.modified = now;
            self.prompts.insert(prompt.clone());
            prompt
        } else {
            let prompt = self
                .prompts
                .get_mut(selected_title)
                .ok_or_else(|| SlashPromptError::NotFound(selected_title.to_string()))?;
            prompt.command = command;
            prompt.content = content.to_string();
            prompt.modified = now;
            prompt.clone()
        };

        if renaming {
            tracing::info!("Renamed prompt '{}' to '{}'", selected_title, new_title);
        }
        tracing::info!("Updated prompt '{}' ({})", updated.title, updated.command);

        self.save()?;
        Ok(updated)
    }

    pub fn delete(&mut self, title: &str) -> Result<()> {
        let removed = self
            .prompts
            .remove(title)
            .ok_or_else(|| SlashPromptError::NotFound(title.to_string()))?;
        tracing::info!("Deleted prompt '{}' ({})", removed.title, removed.command);

        self.save()
    }

    /// Titles in mapping order, derived from the current state on each call
    pub fn list(&self) -> impl Iterator<Item = &str> + '_ {
        self.prompts.keys()
    }

    pub fn get(&self, title: &str) -> Option<&Prompt> {
        self.prompts.get(title)
    }

    pub fn prompts(&self) -> impl Iterator<Item = &Prompt> + '_ {
        self.prompts.values()
    }

    /// Owned copy of every prompt in mapping order
    pub fn snapshot(&self) -> Vec<Prompt> {
        self.prompts.to_vec()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn origin(&self) -> &LoadOrigin {
        &self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::super::clock::MockClock;
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Clock that advances one second per call
    fn ticking_clock() -> Box<MockClock> {
        let mut clock = MockClock::new();
        let mut tick = 0i64;
        clock.expect_now().returning(move || {
            tick += 1;
            epoch() + Duration::seconds(tick)
        });
        Box::new(clock)
    }

    fn open(dir: &TempDir) -> PromptStore {
        PromptStore::load_with_clock(dir.path().join("prompts.json"), "tester", ticking_clock())
            .unwrap()
    }

    #[test]
    fn test_load_missing_file_creates_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sub").join("prompts.json");

        let store = PromptStore::load(&path, "tester").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.origin(), &LoadOrigin::Created);
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    }

    #[test]
    fn test_load_malformed_file_recovers_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompts.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = PromptStore::load(&path, "tester").unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.origin(), LoadOrigin::Recovered { .. }));
        // Left untouched until a mutation
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_load_empty_file_recovers_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompts.json");
        std::fs::write(&path, "").unwrap();

        let store = PromptStore::load(&path, "tester").unwrap();
        assert!(matches!(store.origin(), LoadOrigin::Recovered { .. }));
    }

    #[test]
    fn test_create_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);

        let prompt = store
            .create("Summary", "summarize", "Summarize: {input}")
            .unwrap();
        assert_eq!(prompt.command, "/summarize");
        assert_eq!(prompt.creator, "tester");
        assert_eq!(prompt.created, prompt.modified);

        assert_eq!(store.get("Summary"), Some(&prompt));
        assert_eq!(store.list().collect::<Vec<_>>(), vec!["Summary"]);
    }

    #[test]
    fn test_create_empty_fields_fail_and_leave_store_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("Keep", "/keep", "body").unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        for (title, command, content) in [("", "/a", "x"), ("A", "", "x"), ("A", "/a", "")] {
            let result = store.create(title, command, content);
            assert!(matches!(result, Err(SlashPromptError::Validation(_))));
        }

        assert_eq!(store.len(), 1);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_create_duplicate_command_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("First", "/dup", "one").unwrap();

        // Same command once normalized
        let result = store.create("Second", "dup", "two");
        match result {
            Err(SlashPromptError::DuplicateCommand(cmd)) => assert_eq!(cmd, "/dup"),
            other => panic!("expected duplicate command, got {other:?}"),
        }
        assert_eq!(store.list().collect::<Vec<_>>(), vec!["First"]);
    }

    #[test]
    fn test_commands_are_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("Lower", "/fix", "one").unwrap();
        store.create("Upper", "/Fix", "two").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_existing_title_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("Same", "/one", "one").unwrap();

        let result = store.create("Same", "/two", "two");
        assert!(matches!(result, Err(SlashPromptError::Validation(_))));
        assert_eq!(store.get("Same").unwrap().command, "/one");
    }

    #[test]
    fn test_update_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        let created = store.create("Fix", "/fix", "old").unwrap();

        let updated = store.update("Fix", "Fix", "repair", "new").unwrap();
        assert_eq!(updated.command, "/repair");
        assert_eq!(updated.content, "new");
        assert_eq!(updated.created, created.created);
        assert!(updated.modified > created.modified);
    }

    #[test]
    fn test_update_rename_rewrites_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        let created = store.create("Old", "/cmd", "body").unwrap();
        store.create("Other", "/other", "x").unwrap();

        let renamed = store.update("Old", "New", "/cmd", "body 2").unwrap();

        assert!(store.get("Old").is_none());
        assert_eq!(store.get("New"), Some(&renamed));
        assert_eq!(renamed.title, "New");
        assert_eq!(renamed.creator, created.creator);
        assert_eq!(renamed.created, created.created);
        assert!(renamed.modified > created.modified);
        // Reinserted at the end
        assert_eq!(store.list().collect::<Vec<_>>(), vec!["Other", "New"]);
    }

    #[test]
    fn test_update_keeps_own_command() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("A", "/a", "body").unwrap();
        assert!(store.update("A", "A", "/a", "changed").is_ok());
    }

    #[test]
    fn test_update_duplicate_command_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("A", "/a", "one").unwrap();
        store.create("B", "/b", "two").unwrap();

        let result = store.update("B", "B", "a", "two");
        assert!(matches!(result, Err(SlashPromptError::DuplicateCommand(_))));
        assert_eq!(store.get("B").unwrap().command, "/b");
    }

    #[test]
    fn test_update_unknown_title_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);

        let result = store.update("Ghost", "Ghost", "/g", "body");
        assert!(matches!(result, Err(SlashPromptError::NotFound(_))));
    }

    #[test]
    fn test_update_empty_fields_fail() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("A", "/a", "one").unwrap();

        let result = store.update("A", "A", "/a", "");
        assert!(matches!(result, Err(SlashPromptError::Validation(_))));
        assert_eq!(store.get("A").unwrap().content, "one");
    }

    #[test]
    fn test_update_rename_onto_existing_title_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("A", "/a", "one").unwrap();
        store.create("B", "/b", "two").unwrap();

        let result = store.update("A", "B", "/a", "one");
        assert!(matches!(result, Err(SlashPromptError::Validation(_))));
        assert_eq!(store.get("B").unwrap().command, "/b");
        assert!(store.get("A").is_some());
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("A", "/a", "one").unwrap();

        store.delete("A").unwrap();
        assert!(store.is_empty());

        let reloaded = PromptStore::load(store.path(), "tester").unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_delete_unknown_title_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("A", "/a", "one").unwrap();

        let result = store.delete("Missing");
        assert!(matches!(result, Err(SlashPromptError::NotFound(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_reflects_current_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("A", "/a", "one").unwrap();
        assert_eq!(store.list().count(), 1);

        store.create("B", "/b", "two").unwrap();
        assert_eq!(store.list().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_persist_and_reload_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("Summary", "/sum", "Summarize {input}").unwrap();
        store.create("Translate", "tr", "Translate to Spanish").unwrap();
        store.update("Summary", "Summarize", "/sum", "Summarize: {input}").unwrap();

        let reloaded = PromptStore::load(store.path(), "someone-else").unwrap();
        assert!(matches!(reloaded.origin(), LoadOrigin::Loaded { count: 2 }));
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn test_saved_file_is_pretty_json_object() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create("Explain", "/explain", "Explain simply").unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["Explain"]["command"], "/explain");
        assert_eq!(value["Explain"]["creator"], "tester");
        assert!(contents.contains("\n  \"Explain\""));
        assert!(!temp_dir.path().join("prompts.json.tmp").exists());
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut store =
            PromptStore::load_with_clock(blocker.join("prompts.json"), "tester", ticking_clock())
                .unwrap();
        assert!(matches!(store.origin(), LoadOrigin::Recovered { .. }));

        let result = store.create("A", "/a", "one");
        assert!(matches!(result, Err(SlashPromptError::Io(_))));
        assert!(store.get("A").is_some());
    }
}
