//! Persistent workspace store: history and favorites
//!
//! Two capped lists of saved editor snapshots, most recent first. History
//! fills automatically after successful renders and evicts its oldest entry
//! past the cap; favorites are explicit promotions and are never evicted
//! automatically. Saving content already in history refreshes the existing
//! entry instead of duplicating it; favoriting already-favorited content is
//! rejected. Every mutation writes through to disk so state survives a
//! crash.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classify::ContentKind;
use crate::util::{excerpt, now_epoch_millis, time_ago};

/// Maximum history entries; oldest is evicted beyond this
pub const HISTORY_CAP: usize = 20;
/// Maximum favorites; additions are rejected beyond this
pub const FAVORITES_CAP: usize = 10;

/// Which of the two lists an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    History,
    Favorites,
}

impl ListKind {
    pub fn label(self) -> &'static str {
        match self {
            ListKind::History => "History",
            ListKind::Favorites => "Favorites",
        }
    }

    fn other(self) -> ListKind {
        match self {
            ListKind::History => ListKind::Favorites,
            ListKind::Favorites => ListKind::History,
        }
    }
}

/// List-display excerpt length (characters)
const PREVIEW_LEN: usize = 100;

/// A saved editor snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedEntry {
    /// Unique id, monotonically increasing across both lists
    pub id: u64,
    /// Full editor content at save time
    pub content: String,
    /// User-assigned title, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Detected content kind at save time
    pub kind: ContentKind,
    /// First-line excerpt for list display
    pub preview: String,
    /// When this entry was first created (Unix epoch milliseconds)
    pub created_at: u64,
    /// Refreshed whenever identical content is saved again
    pub updated_at: u64,
}

impl SavedEntry {
    /// Title for list display: the user title, or the content excerpt
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(t) if !t.trim().is_empty() => t.clone(),
            _ => self.preview.clone(),
        }
    }

    /// Human-readable time since the last save
    pub fn time_ago(&self) -> String {
        time_ago(self.updated_at / 1000)
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// What saving to history did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New entry created
    Added,
    /// Identical content already existed; it moved to the front with a
    /// refreshed timestamp
    Refreshed,
    /// Nothing to save (empty content)
    Skipped,
}

/// On-disk shape of one list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ListFile {
    #[serde(default)]
    version: u32,
    entries: Vec<SavedEntry>,
}

impl ListFile {
    const CURRENT_VERSION: u32 = 1;

    fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(list) => list,
                Err(e) => {
                    // Corrupt store data is not fatal; start empty
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create store directory: {}", e))?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize store: {}", e))?;
        std::fs::write(path, contents)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}

/// History and favorites with write-through persistence
#[derive(Debug, Clone, Default)]
pub struct WorkspaceStore {
    history: Vec<SavedEntry>,
    favorites: Vec<SavedEntry>,
    /// Highest id ever issued, so ids stay unique even within one
    /// millisecond
    last_id: u64,
    /// Persistence root; `None` keeps the store memory-only (tests)
    dir: Option<PathBuf>,
}

impl WorkspaceStore {
    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load both lists from the standard location, or start empty
    pub fn load() -> Self {
        match crate::config_paths::store_dir() {
            Some(dir) => Self::load_from(dir),
            None => {
                tracing::debug!("No config directory available, store is memory-only");
                Self::in_memory()
            }
        }
    }

    /// Load both lists from a specific directory
    pub fn load_from(dir: PathBuf) -> Self {
        let history = ListFile::load(&dir.join(crate::config_paths::HISTORY_FILE));
        let favorites = ListFile::load(&dir.join(crate::config_paths::FAVORITES_FILE));
        let last_id = history
            .entries
            .iter()
            .chain(favorites.entries.iter())
            .map(|e| e.id)
            .max()
            .unwrap_or(0);
        Self {
            history: history.entries,
            favorites: favorites.entries,
            last_id,
            dir: Some(dir),
        }
    }

    pub fn history(&self) -> &[SavedEntry] {
        &self.history
    }

    pub fn favorites(&self) -> &[SavedEntry] {
        &self.favorites
    }

    pub fn list(&self, kind: ListKind) -> &[SavedEntry] {
        match kind {
            ListKind::History => &self.history,
            ListKind::Favorites => &self.favorites,
        }
    }

    pub fn entry(&self, id: u64, list: ListKind) -> Option<&SavedEntry> {
        self.list(list).iter().find(|e| e.id == id)
    }

    /// Save content to history. Whitespace-only content is skipped;
    /// identical content refreshes the existing entry instead of
    /// duplicating it.
    pub fn save_to_history(&mut self, content: &str, kind: ContentKind) -> SaveOutcome {
        if content.trim().is_empty() {
            return SaveOutcome::Skipped;
        }
        if let Some(idx) = self.history.iter().position(|e| e.content == content) {
            let mut entry = self.history.remove(idx);
            entry.updated_at = now_epoch_millis();
            entry.kind = kind;
            self.history.insert(0, entry);
            self.persist(ListKind::History);
            return SaveOutcome::Refreshed;
        }
        let now = now_epoch_millis();
        let entry = SavedEntry {
            id: self.next_id(),
            content: content.to_string(),
            title: None,
            kind,
            preview: excerpt(content, PREVIEW_LEN),
            created_at: now,
            updated_at: now,
        };
        self.history.insert(0, entry);
        if self.history.len() > HISTORY_CAP {
            self.history.truncate(HISTORY_CAP);
        }
        self.persist(ListKind::History);
        SaveOutcome::Added
    }

    /// Promote a history entry to favorites.
    ///
    /// Content already favorited and a full favorites list both reject the
    /// addition with a user-visible message. A title given here propagates
    /// back to the history entry.
    pub fn add_favorite(&mut self, history_id: u64, title: Option<String>) -> Result<u64, String> {
        let source = self
            .history
            .iter()
            .find(|e| e.id == history_id)
            .ok_or_else(|| "History entry not found".to_string())?
            .clone();

        if self.favorites.iter().any(|e| e.content == source.content) {
            return Err("Already in favorites".to_string());
        }
        if self.favorites.len() >= FAVORITES_CAP {
            return Err(format!("Favorites is full ({} max)", FAVORITES_CAP));
        }

        let now = now_epoch_millis();
        let entry = SavedEntry {
            id: self.next_id(),
            title: title.clone().or(source.title),
            created_at: now,
            updated_at: now,
            ..source
        };
        let id = entry.id;
        self.favorites.insert(0, entry);
        self.persist(ListKind::Favorites);

        // Title sync back to the history twin
        if let Some(t) = title {
            if let Some(entry) = self.history.iter_mut().find(|e| e.id == history_id) {
                if entry.title.as_ref() != Some(&t) {
                    entry.title = Some(t);
                    self.persist(ListKind::History);
                }
            }
        }
        Ok(id)
    }

    /// Rename an entry. The title also propagates to the entry with
    /// identical content in the other list, so the two views of the same
    /// snapshot never disagree.
    pub fn rename(&mut self, id: u64, list: ListKind, title: &str) -> Result<(), String> {
        let content = {
            let entry = self
                .list_mut(list)
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| format!("{} entry not found", list.label()))?;
            entry.title = Some(title.to_string());
            entry.content.clone()
        };

        let other = list.other();
        let mut other_changed = false;
        for entry in self.list_mut(other) {
            if entry.content == content {
                entry.title = Some(title.to_string());
                other_changed = true;
            }
        }

        self.persist(list);
        if other_changed {
            self.persist(other);
        }
        Ok(())
    }

    /// Delete one entry; unknown ids are a no-op
    pub fn delete(&mut self, id: u64, list: ListKind) {
        let entries = self.list_mut(list);
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() != before {
            self.persist(list);
        }
    }

    pub fn clear(&mut self, list: ListKind) {
        self.list_mut(list).clear();
        self.persist(list);
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<SavedEntry> {
        match kind {
            ListKind::History => &mut self.history,
            ListKind::Favorites => &mut self.favorites,
        }
    }

    /// Ids are wall-clock millis bumped past the last issued id, so they
    /// stay unique and roughly sortable
    fn next_id(&mut self) -> u64 {
        let id = now_epoch_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn persist(&self, list: ListKind) {
        let Some(dir) = &self.dir else { return };
        let (entries, file) = match list {
            ListKind::History => (&self.history, crate::config_paths::HISTORY_FILE),
            ListKind::Favorites => (&self.favorites, crate::config_paths::FAVORITES_FILE),
        };
        let file_data = ListFile {
            version: ListFile::CURRENT_VERSION,
            entries: entries.clone(),
        };
        if let Err(e) = file_data.save(&dir.join(file)) {
            tracing::warn!("Failed to persist {}: {}", list.label(), e);
        }
    }
}
