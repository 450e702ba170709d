//! Capped, stably-ranked highscore table
//!
//! The store keeps the top `max_entries` results ordered by descending
//! score. Ranking is stable: on equal scores the earlier-inserted entry
//! keeps the higher place. Persistence is a pluggable backend; the store
//! loads once at construction and writes through after every insert.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Namespace key under which the table is persisted
pub const HIGHSCORES_STORAGE_KEY: &str = "hfg-memory__highscores";

/// One past result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreEntry {
    pub name: String,
    pub score: u32,
}

impl HighscoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        HighscoreEntry {
            name: name.into(),
            score,
        }
    }
}

/// Durable storage for the highscore table
pub trait HighscoreBackend {
    /// Read the persisted table; an absent record loads as empty
    fn load(&self) -> Result<Vec<HighscoreEntry>>;

    /// Replace the persisted table
    fn save(&mut self, entries: &[HighscoreEntry]) -> Result<()>;
}

/// Ephemeral backend for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Vec<HighscoreEntry>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighscoreBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<HighscoreEntry>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[HighscoreEntry]) -> Result<()> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

/// JSON file backend, keyed under [`HIGHSCORES_STORAGE_KEY`]
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Store the table as `<dir>/hfg-memory__highscores.json`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        JsonFileBackend {
            path: dir
                .as_ref()
                .join(format!("{HIGHSCORES_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighscoreBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<HighscoreEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&mut self, entries: &[HighscoreEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

/// Ranked highscore table, capped at `max_entries`
pub struct HighscoreStore {
    entries: Vec<HighscoreEntry>,
    max_entries: usize,
    backend: Box<dyn HighscoreBackend>,
}

impl HighscoreStore {
    pub const DEFAULT_MAX_ENTRIES: usize = 10;

    pub fn new(backend: Box<dyn HighscoreBackend>) -> Result<Self> {
        Self::with_max_entries(backend, Self::DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(backend: Box<dyn HighscoreBackend>, max_entries: usize) -> Result<Self> {
        let mut entries = backend.load()?;
        entries.truncate(max_entries);
        Ok(HighscoreStore {
            entries,
            max_entries,
            backend,
        })
    }

    /// Insert a result, re-rank, truncate, and persist
    pub fn insert(&mut self, entry: HighscoreEntry) -> Result<()> {
        self.entries.push(entry);
        // Stable sort: tied scores keep their insertion order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.max_entries);
        self.backend.save(&self.entries)
    }

    /// The current ranked table, best first
    pub fn list(&self) -> &[HighscoreEntry] {
        &self.entries
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(max_entries: usize) -> HighscoreStore {
        HighscoreStore::with_max_entries(Box::new(MemoryBackend::new()), max_entries).unwrap()
    }

    #[test]
    fn test_descending_order_and_truncation() {
        let mut store = store(3);
        for (name, score) in [("A", 40), ("B", 30), ("C", 20), ("D", 10)] {
            store.insert(HighscoreEntry::new(name, score)).unwrap();
        }

        let names: Vec<_> = store.list().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(store.list().len() <= store.max_entries());
    }

    #[test]
    fn test_tied_scores_keep_insertion_order() {
        let mut store = store(3);
        store.insert(HighscoreEntry::new("A", 10)).unwrap();
        store.insert(HighscoreEntry::new("B", 20)).unwrap();
        store.insert(HighscoreEntry::new("C", 5)).unwrap();
        store.insert(HighscoreEntry::new("D", 20)).unwrap();

        assert_eq!(
            store.list(),
            &[
                HighscoreEntry::new("B", 20),
                HighscoreEntry::new("D", 20),
                HighscoreEntry::new("A", 10),
            ]
        );
    }

    #[test]
    fn test_repeated_ties_rank_earliest_first() {
        let mut store = store(5);
        for name in ["first", "second", "third"] {
            store.insert(HighscoreEntry::new(name, 7)).unwrap();
        }
        let names: Vec<_> = store.list().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_load_respects_cap() {
        let mut backend = MemoryBackend::new();
        backend
            .save(&[
                HighscoreEntry::new("A", 3),
                HighscoreEntry::new("B", 2),
                HighscoreEntry::new("C", 1),
            ])
            .unwrap();

        let store = HighscoreStore::with_max_entries(Box::new(backend), 2).unwrap();
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_json_backend_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "memory-match-test-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let mut backend = JsonFileBackend::new(&dir);

        // Missing file loads as an empty table
        assert!(backend.load().unwrap().is_empty());

        let entries = vec![
            HighscoreEntry::new("Alice", 20),
            HighscoreEntry::new("Bob", 15),
        ];
        backend.save(&entries).unwrap();
        assert_eq!(backend.load().unwrap(), entries);

        fs::remove_dir_all(&dir).unwrap();
    }
}
