//! Persisted coverage: `page key → element identity → event type → triggered`.
use crate::config::CoverageConfig;
use crate::error::CoverageError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Origin-scoped string key/value storage, `localStorage` style.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CoverageError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CoverageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON object per origin under a directory. Every read goes to disk so
/// writes from another process are seen on the next read.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn open(dir: &Path, origin: &str) -> Result<Self, CoverageError> {
        std::fs::create_dir_all(dir).map_err(|e| CoverageError::io(dir, e))?;
        Ok(Self {
            path: dir.join(format!("{}.json", sanitize_origin(origin))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                log::warn!(target: "uicov.store", "{}: {e}; treating storage as empty", self.path.display());
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            log::warn!(target: "uicov.store", "{}: {e}; treating storage as empty", self.path.display());
            BTreeMap::new()
        })
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CoverageError> {
        let mut items = self.read_all();
        items.insert(key.to_string(), value.to_string());
        let text = serde_json::to_string_pretty(&items)?;
        // Write-then-rename so a crash never leaves a truncated file behind.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text).map_err(|e| CoverageError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| CoverageError::io(&self.path, e))
    }
}

fn sanitize_origin(origin: &str) -> String {
    let cleaned: String = origin
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

pub type EventStates = BTreeMap<String, bool>;
pub type PageCoverage = BTreeMap<String, EventStates>;

/// The whole store. Ordered maps keep serialization stable, so an unchanged
/// store re-serializes to the same bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coverage {
    pages: BTreeMap<String, PageCoverage>,
}

impl Coverage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, CoverageError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, CoverageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CoverageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> impl Iterator<Item = (&str, &PageCoverage)> {
        self.pages.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn page(&self, page: &str) -> Option<&PageCoverage> {
        self.pages.get(page)
    }

    pub fn element(&self, page: &str, element: &str) -> Option<&EventStates> {
        self.pages.get(page)?.get(element)
    }

    pub fn state(&self, page: &str, element: &str, event_type: &str) -> Option<bool> {
        self.element(page, element)?.get(event_type).copied()
    }

    pub fn ensure_page(&mut self, page: &str) {
        if !self.pages.contains_key(page) {
            self.pages.insert(page.to_string(), PageCoverage::new());
        }
    }

    /// Make sure `(page, element, event)` exists, untriggered if new.
    /// Returns whether an entry was created.
    pub fn ensure_event(&mut self, page: &str, element: &str, event_type: &str) -> bool {
        let states = self
            .pages
            .entry(page.to_string())
            .or_default()
            .entry(element.to_string())
            .or_default();
        if states.contains_key(event_type) {
            return false;
        }
        states.insert(event_type.to_string(), false);
        true
    }

    /// Flip `(page, element, event)` to triggered, creating it if needed.
    /// Returns whether the stored value changed.
    pub fn mark_triggered(&mut self, page: &str, element: &str, event_type: &str) -> bool {
        let state = self
            .pages
            .entry(page.to_string())
            .or_default()
            .entry(element.to_string())
            .or_default()
            .entry(event_type.to_string())
            .or_insert(false);
        let changed = !*state;
        *state = true;
        changed
    }

    /// Union with `other`. Entries only ever gain keys, and `true` wins over `false`.
    pub fn merge(&mut self, other: &Coverage) {
        for (page, elements) in &other.pages {
            let ours = self.pages.entry(page.clone()).or_default();
            for (element, states) in elements {
                let our_states = ours.entry(element.clone()).or_default();
                for (event_type, triggered) in states {
                    let slot = our_states.entry(event_type.clone()).or_insert(false);
                    *slot |= *triggered;
                }
            }
        }
    }
}

/// The coverage store and the colorization flag on top of a [`Storage`].
#[derive(Debug)]
pub struct CoverageStore<S: Storage> {
    storage: S,
    slot: String,
    colors_slot: String,
}

impl<S: Storage> CoverageStore<S> {
    pub fn new(storage: S, config: &CoverageConfig) -> Self {
        Self {
            storage,
            slot: config.storage_slot.clone(),
            colors_slot: config.colors_slot.clone(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Current store. Missing or unparsable data reads as empty.
    pub fn load(&self) -> Coverage {
        let Some(text) = self.storage.get_item(&self.slot) else {
            return Coverage::new();
        };
        Coverage::from_json(&text).unwrap_or_else(|e| {
            log::warn!(target: "uicov.store", "slot {:?} is unreadable ({e}); starting empty", self.slot);
            Coverage::new()
        })
    }

    /// Read API for report and export tooling.
    pub fn snapshot(&self) -> Coverage {
        self.load()
    }

    pub fn save(&mut self, coverage: &Coverage) -> Result<(), CoverageError> {
        let text = coverage.to_json()?;
        self.storage.set_item(&self.slot, &text)
    }

    /// Merge `local` into a fresh read and write the union back, so entries
    /// persisted by someone else since `local` was loaded are kept.
    pub fn commit(&mut self, local: &Coverage) -> Result<Coverage, CoverageError> {
        let mut fresh = self.load();
        fresh.merge(local);
        self.save(&fresh)?;
        Ok(fresh)
    }

    /// Fresh read, flip one entry to triggered, write back immediately.
    /// Also reports whether the entry was not triggered before.
    pub fn patch_triggered(
        &mut self,
        page: &str,
        element: &str,
        event_type: &str,
    ) -> Result<(Coverage, bool), CoverageError> {
        let mut fresh = self.load();
        let changed = fresh.mark_triggered(page, element, event_type);
        self.save(&fresh)?;
        Ok((fresh, changed))
    }

    pub fn colors_enabled(&self, default: bool) -> bool {
        match self.storage.get_item(&self.colors_slot).as_deref() {
            Some("true") => true,
            Some("false") => false,
            _ => default,
        }
    }

    pub fn set_colors_enabled(&mut self, enabled: bool) -> Result<(), CoverageError> {
        let value = if enabled { "true" } else { "false" };
        self.storage.set_item(&self.colors_slot, value)
    }

    /// Pretty JSON artifact for downloads/exports.
    pub fn export(&self) -> Result<String, CoverageError> {
        self.load().to_json_pretty()
    }
}
