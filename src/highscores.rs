//! High score leaderboard
//!
//! Tracks the top 10 match results, highest score first. Entries with equal
//! scores keep the order in which they were recorded.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Format used for entry timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single leaderboard entry (immutable once recorded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    /// Winner's final score
    pub score: u32,
    /// Mode label, e.g. "PVP" or "AI-HARD"
    pub game_mode: String,
    /// Local time the match ended
    #[serde(alias = "date")]
    pub timestamp: String,
}

impl LeaderboardEntry {
    pub fn new(
        player_name: impl Into<String>,
        score: u32,
        game_mode: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            game_mode: game_mode.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Entry stamped with the current local time
    pub fn stamped(player_name: &str, score: u32, game_mode: &str) -> Self {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::new(player_name, score, game_mode, timestamp)
    }
}

/// Ranked leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from entries in recorded order, re-ranking and truncating
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        // Stable sort keeps insertion order among ties
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties rank below existing entries, so must beat the lowest outright
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record an entry. Returns the rank achieved (1-indexed) or None if it
    /// fell off the bottom.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // After every entry with an equal or higher score
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    /// Best `n` entries across all modes
    pub fn get_top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Best `n` entries recorded in `game_mode`
    pub fn get_top_for_mode(&self, n: usize, game_mode: &str) -> Vec<&LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| e.game_mode == game_mode)
            .take(n)
            .collect()
    }

    /// 1-indexed rank of a player's best entry, optionally within one mode
    pub fn rank_of(&self, player_name: &str, game_mode: Option<&str>) -> Option<usize> {
        self.entries
            .iter()
            .filter(|e| game_mode.is_none_or(|m| e.game_mode == m))
            .position(|e| e.player_name == player_name)
            .map(|i| i + 1)
    }

    /// Highest recorded score, optionally within one mode (0 when none)
    pub fn high_score(&self, game_mode: Option<&str>) -> u32 {
        self.entries
            .iter()
            .find(|e| game_mode.is_none_or(|m| e.game_mode == m))
            .map(|e| e.score)
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
