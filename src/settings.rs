//! Game settings and preferences
//!
//! Stored as JSON next to the leaderboard. Every field is optional in the
//! file; anything missing, unknown or out of range falls back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FPS, WINNING_SCORE};
use crate::sim::Difficulty;

/// Highest tick rate a host may request
pub const MAX_TICK_RATE_HZ: u32 = 240;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// First side to reach this wins
    pub winning_score: u32,
    /// AI difficulty used when none is picked at the menu
    pub difficulty: Difficulty,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Where the leaderboard lives
    pub leaderboard_path: PathBuf,
    pub left_player_name: String,
    pub right_player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            winning_score: WINNING_SCORE,
            difficulty: Difficulty::Medium,
            tick_rate_hz: FPS,
            leaderboard_path: PathBuf::from("leaderboard.json"),
            left_player_name: "Player 1".to_string(),
            right_player_name: "Player 2".to_string(),
        }
    }
}

impl Settings {
    /// Copy with out-of-range values pulled back into range
    pub fn validated(&self) -> Self {
        let defaults = Self::default();
        let mut settings = self.clone();

        if settings.winning_score == 0 {
            log::warn!("winning_score must be at least 1, using {WINNING_SCORE}");
            settings.winning_score = WINNING_SCORE;
        }
        settings.tick_rate_hz = settings.tick_rate_hz.clamp(1, MAX_TICK_RATE_HZ);
        if settings.left_player_name.trim().is_empty() {
            settings.left_player_name = defaults.left_player_name;
        }
        if settings.right_player_name.trim().is_empty() {
            settings.right_player_name = defaults.right_player_name;
        }
        settings
    }

    /// Seconds per simulation tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz.clamp(1, MAX_TICK_RATE_HZ) as f32
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read settings {}: {e}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.validated()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
