//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable randomness only
//! - No rendering, input devices or file I/O

pub mod ai;
pub mod ball;
pub mod collision;
pub mod paddle;
pub mod rng;
pub mod state;
pub mod tick;

pub use ai::{AiController, AiTuning, Difficulty};
pub use ball::Ball;
pub use collision::Rect;
pub use paddle::{MoveDir, Paddle, Side};
pub use rng::{GameRng, RandomSource, SequenceRng};
pub use state::{GameEvent, GameMode, GamePhase, Match};
pub use tick::{TickInput, tick};
