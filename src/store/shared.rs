use super::{Prompt, PromptStore};
use crate::autocomplete::{self, AutocompleteFeed};
use crate::resolver::{self, Resolution};
use crate::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Thread-safe wrapper around [`PromptStore`] for multi-request hosts.
///
/// Writes are serialized through one store-wide lock held across
/// mutate-and-persist. Reads go to an immutable snapshot republished after
/// every write, so they never wait on file I/O. The snapshot is swapped
/// before a write returns, so a caller always sees its own changes.
pub struct SharedStore {
    writer: Mutex<PromptStore>,
    snapshot: RwLock<Arc<Vec<Prompt>>>,
}

impl SharedStore {
    pub fn new(store: PromptStore) -> Self {
        let snapshot = Arc::new(store.snapshot());
        Self {
            writer: Mutex::new(store),
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Current prompts in mapping order
    pub fn snapshot(&self) -> Arc<Vec<Prompt>> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn resolve(&self, text: &str) -> Resolution {
        let prompts = self.snapshot();
        resolver::resolve(text, prompts.iter())
    }

    pub fn feed(&self) -> AutocompleteFeed {
        let prompts = self.snapshot();
        autocomplete::feed(prompts.iter())
    }

    pub fn titles(&self) -> Vec<String> {
        self.snapshot().iter().map(|p| p.title.clone()).collect()
    }

    pub fn get(&self, title: &str) -> Option<Prompt> {
        self.snapshot().iter().find(|p| p.title == title).cloned()
    }

    pub fn create(&self, title: &str, command: &str, content: &str) -> Result<Prompt> {
        self.write(|store| store.create(title, command, content))
    }

    pub fn update(
        &self,
        selected_title: &str,
        new_title: &str,
        command: &str,
        content: &str,
    ) -> Result<Prompt> {
        self.write(|store| store.update(selected_title, new_title, command, content))
    }

    pub fn delete(&self, title: &str) -> Result<()> {
        self.write(|store| store.delete(title))
    }

    fn write<T>(&self, op: impl FnOnce(&mut PromptStore) -> Result<T>) -> Result<T> {
        let mut store = self.lock_writer();
        let result = op(&mut store);
        // Publish even on error: a failed persist still leaves the mutation in memory
        self.publish(&store);
        result
    }

    fn publish(&self, store: &PromptStore) {
        let next = Arc::new(store.snapshot());
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    fn lock_writer(&self) -> MutexGuard<'_, PromptStore> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
