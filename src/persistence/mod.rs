//! Leaderboard persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic replace (write tmp, sync, rename over the save)
//! - Missing or corrupt files load as an empty board

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::highscores::{Leaderboard, LeaderboardEntry};

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("leaderboard I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("leaderboard encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage collaborator for ranked entries
pub trait LeaderboardStore {
    /// Re-read the store. Never fails: problems yield an empty board.
    fn load(&mut self) -> Leaderboard;

    /// The board as of the last load or append
    fn leaderboard(&self) -> &Leaderboard;

    /// Rank `entry`, keep the top entries and persist the whole set.
    /// Returns the rank achieved, if any.
    fn append_and_persist(&mut self, entry: LeaderboardEntry)
    -> Result<Option<usize>, PersistError>;

    /// Drop every entry and persist the empty board
    fn clear_and_persist(&mut self) -> Result<(), PersistError>;
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    scores: &'a [LeaderboardEntry],
}

#[derive(Deserialize)]
struct EnvelopeIn {
    #[serde(default)]
    version: Option<u32>,
    scores: Vec<LeaderboardEntry>,
}

/// Leaderboard kept in a JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    board: Leaderboard,
}

impl JsonFileStore {
    /// Open (and load) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            board: Leaderboard::new(),
        };
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Leaderboard>, String> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.to_string()),
        };
        let envelope: EnvelopeIn = serde_json::from_str(&json).map_err(|e| e.to_string())?;
        if let Some(version) = envelope.version {
            if version > FORMAT_VERSION {
                return Err(format!("unsupported leaderboard version {version}"));
            }
        }
        Ok(Some(Leaderboard::from_entries(envelope.scores)))
    }

    fn write(&self) -> Result<(), PersistError> {
        let io_err = |source: io::Error| PersistError::Io {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(&EnvelopeOut {
            version: FORMAT_VERSION,
            scores: self.board.entries(),
        })?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp).map_err(io_err)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(json.as_bytes()).map_err(io_err)?;
            let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
            file.sync_all().map_err(io_err)?;
        }
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            io_err(e)
        })
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&mut self) -> Leaderboard {
        self.board = match self.read() {
            Ok(Some(board)) => {
                log::info!(
                    "Loaded {} high scores from {}",
                    board.len(),
                    self.path.display()
                );
                board
            }
            Ok(None) => {
                log::info!("No high scores at {}, starting fresh", self.path.display());
                Leaderboard::new()
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable leaderboard {}: {e}",
                    self.path.display()
                );
                Leaderboard::new()
            }
        };
        self.board.clone()
    }

    fn leaderboard(&self) -> &Leaderboard {
        &self.board
    }

    fn append_and_persist(
        &mut self,
        entry: LeaderboardEntry,
    ) -> Result<Option<usize>, PersistError> {
        let rank = self.board.insert(entry);
        self.write()?;
        log::info!("High scores saved ({} entries)", self.board.len());
        Ok(rank)
    }

    fn clear_and_persist(&mut self) -> Result<(), PersistError> {
        self.board.clear();
        self.write()
    }
}

/// In-memory store for tests and hosts without a filesystem
#[derive(Debug, Default)]
pub struct MemoryStore {
    board: Leaderboard,
    appends: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `append_and_persist` calls so far
    pub fn appends(&self) -> usize {
        self.appends
    }
}

impl LeaderboardStore for MemoryStore {
    fn load(&mut self) -> Leaderboard {
        self.board.clone()
    }

    fn leaderboard(&self) -> &Leaderboard {
        &self.board
    }

    fn append_and_persist(
        &mut self,
        entry: LeaderboardEntry,
    ) -> Result<Option<usize>, PersistError> {
        self.appends += 1;
        Ok(self.board.insert(entry))
    }

    fn clear_and_persist(&mut self) -> Result<(), PersistError> {
        self.board.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry::new(name, score, "PVP", "2024-01-01 12:00:00")
    }

    fn test_store() -> (JsonFileStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("leaderboard.json"));
        (store, dir)
    }

    #[test]
    fn missing_file_loads_empty() {
        let (store, _dir) = test_store();
        assert!(store.leaderboard().is_empty());
    }

    #[test]
    fn append_round_trips_through_disk() {
        let (mut store, _dir) = test_store();
        assert_eq!(store.append_and_persist(entry("a", 5)).unwrap(), Some(1));
        assert_eq!(store.append_and_persist(entry("b", 10)).unwrap(), Some(1));
        assert_eq!(store.append_and_persist(entry("c", 10)).unwrap(), Some(2));

        let reopened = JsonFileStore::open(store.path());
        assert_eq!(reopened.leaderboard(), store.leaderboard());
        let names: Vec<&str> = reopened
            .leaderboard()
            .entries()
            .iter()
            .map(|e| e.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn persisted_set_is_truncated() {
        let (mut store, _dir) = test_store();
        for i in 0..15 {
            store.append_and_persist(entry(&format!("p{i}"), i)).unwrap();
        }
        let reopened = JsonFileStore::open(store.path());
        assert_eq!(reopened.leaderboard().len(), 10);
        assert_eq!(reopened.leaderboard().high_score(None), 14);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::open(&path);
        assert!(store.leaderboard().is_empty());

        // Still writable afterwards
        store.append_and_persist(entry("a", 3)).unwrap();
        assert_eq!(JsonFileStore::open(&path).leaderboard().len(), 1);
    }

    #[test]
    fn legacy_document_is_accepted_and_resorted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");
        fs::write(
            &path,
            r#"{"scores":[
                {"player_name":"Player 1","score":3,"game_mode":"VS","date":"2024-01-01 10:00:00"},
                {"player_name":"Player 2","score":10,"game_mode":"AI","date":"2024-01-02 10:00:00"}
            ]}"#,
        )
        .unwrap();
        let store = JsonFileStore::open(&path);
        let top = store.leaderboard().get_top(1);
        assert_eq!(top[0].player_name, "Player 2");
    }

    #[test]
    fn future_version_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");
        fs::write(&path, r#"{"version":99,"scores":[]}"#).unwrap();
        assert!(JsonFileStore::open(&path).leaderboard().is_empty());
    }

    #[test]
    fn clear_persists_empty_board() {
        let (mut store, _dir) = test_store();
        store.append_and_persist(entry("a", 5)).unwrap();
        store.clear_and_persist().unwrap();
        assert!(JsonFileStore::open(store.path()).leaderboard().is_empty());
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        let mut store = JsonFileStore::open(&path);
        let err = store.append_and_persist(entry("a", 1)).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
        // In-memory ranking still reflects the result
        assert_eq!(store.leaderboard().len(), 1);
    }

    #[test]
    fn memory_store_counts_appends() {
        let mut store = MemoryStore::new();
        store.append_and_persist(entry("a", 1)).unwrap();
        store.append_and_persist(entry("b", 2)).unwrap();
        assert_eq!(store.appends(), 2);
        assert_eq!(store.load().get_top(1)[0].player_name, "b");
    }
}
