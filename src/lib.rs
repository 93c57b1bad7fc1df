//! Classic Pong - a fixed-tick two-player / vs-AI paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, AI, match state machine)
//! - `highscores`: Ranked leaderboard
//! - `persistence`: Durable leaderboard storage
//! - `platform`: Input/render collaborator traits and the session loop
//! - `settings`: User-editable configuration

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::{Leaderboard, LeaderboardEntry};
pub use persistence::{JsonFileStore, LeaderboardStore, MemoryStore, PersistError};
pub use settings::Settings;

/// Game configuration constants
///
/// Units are pixels and pixels-per-tick; the origin is the top-left corner
/// and `y` grows downward.
pub mod consts {
    /// Target tick rate of the simulation
    pub const FPS: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 90.0;
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 50.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_SPEED: f32 = 7.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const BALL_SPEED_UP: f32 = 1.1;
    /// Per-axis speed ceiling; kept below PADDLE_WIDTH so the ball cannot
    /// step through a paddle in a single tick
    pub const BALL_MAX_SPEED: f32 = 2.0 * BALL_SPEED;
    /// Smallest vertical speed of a fresh serve
    pub const BALL_MIN_SERVE_VY: f32 = 1.0;
    /// Maximum deflection from horizontal on a paddle hit
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 60.0;

    /// AI tolerance band around its aim point
    pub const AI_DEAD_ZONE: f32 = 10.0;
    /// Half-width of the deliberately wrong aim window
    pub const AI_NOISE_SPREAD: f32 = 50.0;

    /// First side to reach this wins
    pub const WINNING_SCORE: u32 = 10;
}

/// RGB colours handed to the renderer
pub mod colors {
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const BLUE: [u8; 3] = [0, 0, 255];
    pub const RED: [u8; 3] = [255, 0, 0];
}
