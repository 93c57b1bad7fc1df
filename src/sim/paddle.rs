//! Paddles and the discrete movement commands that drive them

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Fixed x coordinate of this side's paddle
    pub fn paddle_x(self) -> f32 {
        match self {
            Side::Left => PADDLE_MARGIN,
            Side::Right => WINDOW_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
        }
    }

    /// Sign of the horizontal velocity carrying the ball toward this side
    pub fn inbound_sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Tri-state movement decision, shared by human input and the AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveDir {
    /// Toward decreasing `y`
    Up,
    /// Toward increasing `y`
    Down,
    #[default]
    Hold,
}

impl MoveDir {
    /// Build from a pair of held keys; both or neither held means hold
    pub fn from_keys(up: bool, down: bool) -> Self {
        match (up, down) {
            (true, false) => MoveDir::Up,
            (false, true) => MoveDir::Down,
            _ => MoveDir::Hold,
        }
    }

    #[inline]
    pub fn axis(self) -> f32 {
        match self {
            MoveDir::Up => -1.0,
            MoveDir::Down => 1.0,
            MoveDir::Hold => 0.0,
        }
    }
}

/// A paddle. `x` is fixed at construction; only `y` moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Paddle {
    /// Paddle for `side`, vertically centred
    pub fn new(side: Side) -> Self {
        Self::at(side.paddle_x(), (WINDOW_HEIGHT - PADDLE_HEIGHT) / 2.0)
    }

    /// Paddle at an explicit position (clamped onto the field)
    pub fn at(x: f32, y: f32) -> Self {
        let mut paddle = Self {
            x,
            y: 0.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        };
        paddle.y = paddle.clamp_y(y);
        paddle
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        (WINDOW_HEIGHT - self.height).max(0.0)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn clamp_y(&self, y: f32) -> f32 {
        if y.is_finite() {
            y.clamp(0.0, self.max_y())
        } else {
            log::warn!("Non-finite paddle y {y}, re-centring");
            self.max_y() / 2.0
        }
    }

    /// Move one step; motion past a wall stops at the wall
    pub fn step(&mut self, dir: MoveDir) {
        let current = self.clamp_y(self.y);
        self.y = self.clamp_y(current + dir.axis() * self.speed);
    }

    pub fn move_up(&mut self) {
        self.step(MoveDir::Up);
    }

    pub fn move_down(&mut self) {
        self.step(MoveDir::Down);
    }

    /// Back to the vertical centre
    pub fn recenter(&mut self) {
        self.y = self.max_y() / 2.0;
    }
}
