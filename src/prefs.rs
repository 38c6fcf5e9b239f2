//! Persisted user preferences.
//!
//! A deliberately small key-value surface behind the [`PreferenceStore`]
//! trait, so the app receives its persistence as an injected dependency
//! and tests can swap in the in-memory implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{HnSearchError, Result};

/// Key under which the last-used search term is stored.
pub const SEARCH_TERM_KEY: &str = "search";

/// Search term used when nothing has been persisted yet.
pub const DEFAULT_SEARCH_TERM: &str = "react";

pub trait PreferenceStore {
    /// Read the stored value for `key`, falling back to `default` when the
    /// store or the key does not exist.
    fn load(&self, key: &str, default: &str) -> String;

    /// Persist `value` under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// JSON-file-backed store, one flat string map per file.
///
/// Reads are forgiving: a missing or unreadable file just means defaults.
/// Writes rewrite the whole file and create the parent directory on demand.
pub struct FilePrefs {
    path: PathBuf,
}

impl FilePrefs {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the conventional per-user location,
    /// `<config_dir>/hnsearch/prefs.json`.
    pub fn default_location() -> Self {
        let base = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join("hnsearch").join("prefs.json"))
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    fn write_err(&self, e: std::io::Error) -> HnSearchError {
        HnSearchError::PrefsWrite(self.path.display().to_string(), e)
    }
}

impl PreferenceStore for FilePrefs {
    fn load(&self, key: &str, default: &str) -> String {
        self.read_map()
            .remove(key)
            .unwrap_or_else(|| default.to_string())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;
        }
        let body = serde_json::to_string_pretty(&map)
            .map_err(|e| self.write_err(std::io::Error::other(e)))?;
        fs::write(&self.path, body).map_err(|e| self.write_err(e))?;
        tracing::debug!(key, path = %self.path.display(), "preference saved");
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPrefs {
    fn load(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_prefs_dir() -> PathBuf {
        let suffix = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("hnsearch_prefs_test_{suffix}"))
    }

    #[test]
    fn memory_store_yields_default_when_empty() {
        let prefs = MemoryPrefs::default();
        assert_eq!(prefs.load(SEARCH_TERM_KEY, DEFAULT_SEARCH_TERM), "react");
    }

    #[test]
    fn memory_store_round_trips_a_value() {
        let mut prefs = MemoryPrefs::default();
        prefs.save(SEARCH_TERM_KEY, "rust").expect("save");
        assert_eq!(prefs.load(SEARCH_TERM_KEY, DEFAULT_SEARCH_TERM), "rust");
    }

    #[test]
    fn file_store_yields_default_for_missing_file() {
        let prefs = FilePrefs::new(temp_prefs_dir().join("prefs.json"));
        assert_eq!(prefs.load(SEARCH_TERM_KEY, "fallback"), "fallback");
    }

    #[test]
    fn file_store_round_trips_and_creates_parent_dirs() {
        let root = temp_prefs_dir();
        let path = root.join("nested").join("prefs.json");
        let mut prefs = FilePrefs::new(path.clone());

        prefs.save(SEARCH_TERM_KEY, "rust").expect("save");
        assert!(path.exists(), "prefs file should exist: {}", path.display());

        // A fresh store over the same path sees the persisted value, not
        // the default.
        let reopened = FilePrefs::new(path);
        assert_eq!(reopened.load(SEARCH_TERM_KEY, DEFAULT_SEARCH_TERM), "rust");

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn file_store_keeps_unrelated_keys_on_save() {
        let root = temp_prefs_dir();
        let mut prefs = FilePrefs::new(root.join("prefs.json"));

        prefs.save("other", "value").expect("save");
        prefs.save(SEARCH_TERM_KEY, "zig").expect("save");

        assert_eq!(prefs.load("other", ""), "value");
        assert_eq!(prefs.load(SEARCH_TERM_KEY, ""), "zig");

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn file_store_treats_garbage_content_as_empty() {
        let root = temp_prefs_dir();
        fs::create_dir_all(&root).expect("mkdir");
        let path = root.join("prefs.json");
        fs::write(&path, "not json at all").expect("write");

        let prefs = FilePrefs::new(path);
        assert_eq!(prefs.load(SEARCH_TERM_KEY, DEFAULT_SEARCH_TERM), "react");

        fs::remove_dir_all(root).expect("cleanup");
    }
}
