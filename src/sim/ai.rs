//! Computer opponent
//!
//! The controller only "looks" at the ball every `reaction_delay_ticks`
//! ticks. In between it keeps steering toward the aim point it chose last
//! time. When it does look, it either extrapolates the ball's straight-line
//! path to its paddle plane or, with probability `prediction_noise`, aims
//! somewhere near the ball on purpose. The extrapolation ignores wall
//! bounces between now and arrival.
//!
//! The controller never touches the paddle. It returns a `MoveDir` that is
//! applied exactly like a human key press.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::ball::Ball;
use super::paddle::{MoveDir, Paddle, Side};
use super::rng::RandomSource;
use crate::consts::*;

/// AI skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Parameters derived from a difficulty preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiTuning {
    /// Ticks between aim re-evaluations
    pub reaction_delay_ticks: u32,
    /// Probability that a re-evaluation aims deliberately wrong
    pub prediction_noise: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Like `from_name`, but unknown names fall back to `Medium`
    pub fn from_name_or_default(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            log::warn!("Unknown AI difficulty {s:?}, using MEDIUM");
            Difficulty::Medium
        })
    }

    pub fn tuning(&self) -> AiTuning {
        let (reaction_delay_ticks, prediction_noise) = match self {
            Difficulty::Easy => (30, 0.4),
            Difficulty::Medium => (15, 0.2),
            Difficulty::Hard => (5, 0.05),
        };
        AiTuning {
            reaction_delay_ticks,
            prediction_noise,
        }
    }

    /// Probability that a re-evaluation aims at the true intercept
    pub fn accuracy(&self) -> f32 {
        1.0 - self.tuning().prediction_noise
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Difficulty::from_name_or_default(&name))
    }
}

/// Reaction-delayed, noise-bounded paddle controller
#[derive(Debug, Clone)]
pub struct AiController {
    side: Side,
    difficulty: Difficulty,
    reaction_delay_ticks: u32,
    prediction_noise: f32,
    ticks_since_decision: u32,
    target_y: f32,
}

impl AiController {
    pub fn new(side: Side, difficulty: Difficulty) -> Self {
        let tuning = difficulty.tuning();
        Self {
            side,
            difficulty,
            reaction_delay_ticks: tuning.reaction_delay_ticks,
            prediction_noise: tuning.prediction_noise,
            ticks_since_decision: 0,
            target_y: WINDOW_HEIGHT / 2.0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn reaction_delay_ticks(&self) -> u32 {
        self.reaction_delay_ticks
    }

    pub fn prediction_noise(&self) -> f32 {
        self.prediction_noise
    }

    pub fn ticks_since_decision(&self) -> u32 {
        self.ticks_since_decision
    }

    pub fn target_y(&self) -> f32 {
        self.target_y
    }

    /// Replace delay and noise together and restart the decision counter
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        let tuning = difficulty.tuning();
        *self = Self {
            difficulty,
            reaction_delay_ticks: tuning.reaction_delay_ticks,
            prediction_noise: tuning.prediction_noise,
            ticks_since_decision: 0,
            ..self.clone()
        };
        log::debug!("AI ({:?}) difficulty set to {difficulty}", self.side);
    }

    /// Fail-soft variant: unknown names select `Medium`
    pub fn set_difficulty_by_name(&mut self, name: &str) -> Difficulty {
        let difficulty = Difficulty::from_name_or_default(name);
        self.set_difficulty(difficulty);
        difficulty
    }

    /// Forget the current aim (new match or serve)
    pub fn reset(&mut self) {
        self.ticks_since_decision = 0;
        self.target_y = WINDOW_HEIGHT / 2.0;
    }

    /// Decide this tick's move for `paddle`
    pub fn compute_move(
        &mut self,
        paddle: &Paddle,
        ball: &Ball,
        rng: &mut impl RandomSource,
    ) -> MoveDir {
        self.ticks_since_decision += 1;
        if self.ticks_since_decision >= self.reaction_delay_ticks {
            self.ticks_since_decision = 0;
            self.retarget(paddle, ball, rng);
        }
        self.move_to_target(paddle)
    }

    fn retarget(&mut self, paddle: &Paddle, ball: &Ball, rng: &mut impl RandomSource) {
        let ball_y = ball.center().y;

        if rng.chance(self.prediction_noise) {
            self.target_y = ball_y + rng.uniform(-AI_NOISE_SPREAD, AI_NOISE_SPREAD);
            return;
        }

        // Moving away: nothing new to act on
        if ball.vel.x * self.side.inbound_sign() <= 0.0 {
            return;
        }

        if let Some(predicted) = self.predict_intercept(paddle, ball) {
            self.target_y = predicted;
        }
    }

    /// Straight-line estimate of the ball centre's `y` when it reaches this
    /// paddle's face, clamped to where the paddle centre can actually go
    pub fn predict_intercept(&self, paddle: &Paddle, ball: &Ball) -> Option<f32> {
        let plane = match self.side {
            Side::Left => paddle.x() + paddle.width,
            Side::Right => paddle.x() - ball.size,
        };
        if ball.vel.x == 0.0 {
            return None;
        }
        let time_to_paddle = (plane - ball.pos.x) / ball.vel.x;
        let predicted = ball.center().y + ball.vel.y * time_to_paddle;
        if !predicted.is_finite() {
            return None;
        }
        let half = paddle.height / 2.0;
        Some(predicted.clamp(half, WINDOW_HEIGHT - half))
    }

    fn move_to_target(&self, paddle: &Paddle) -> MoveDir {
        let center = paddle.center_y();
        if center < self.target_y - AI_DEAD_ZONE {
            MoveDir::Down
        } else if center > self.target_y + AI_DEAD_ZONE {
            MoveDir::Up
        } else {
            MoveDir::Hold
        }
    }
}
