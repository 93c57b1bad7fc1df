//! Ball motion, wall bounces and paddle deflection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, ramp_component};
use super::paddle::{Paddle, Side};
use super::rng::RandomSource;
use crate::consts::*;

/// The ball. `pos` is the top-left corner of its box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    /// A ball at the centre of the field, served toward a random side
    pub fn new(rng: &mut impl RandomSource) -> Self {
        let mut ball = Self::with_velocity(Vec2::ZERO, Vec2::ZERO);
        ball.reset(rng);
        ball
    }

    /// A ball at an explicit position and velocity
    pub fn with_velocity(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: BALL_SIZE,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    fn max_y(&self) -> f32 {
        WINDOW_HEIGHT - self.size
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }

    /// Advance one tick. Returns true if the ball bounced off the top or
    /// bottom wall.
    pub fn step(&mut self) -> bool {
        self.pos += self.vel;

        let max_y = self.max_y();
        let bounced = if self.pos.y <= 0.0 {
            self.vel.y = self.vel.y.abs();
            true
        } else if self.pos.y >= max_y {
            self.vel.y = -self.vel.y.abs();
            true
        } else {
            false
        };

        // A large single-tick step can carry the ball past a wall
        self.pos.y = self.pos.y.clamp(0.0, max_y);
        bounced
    }

    /// Deflect off `paddle` if the boxes overlap and the ball is travelling
    /// toward `side`. Returns whether a bounce happened.
    ///
    /// The outgoing vertical speed depends on where the ball struck: the
    /// paddle centre sends it back flat, the edges at up to 60 degrees.
    /// Both components then ramp by `BALL_SPEED_UP`, capped at
    /// `BALL_MAX_SPEED`.
    pub fn check_paddle_collision(&mut self, paddle: &Paddle, side: Side) -> bool {
        if self.vel.x * side.inbound_sign() <= 0.0 {
            return false;
        }
        if !self.rect().overlaps(&paddle.rect()) {
            return false;
        }

        self.vel.x = -self.vel.x;

        let half = paddle.height / 2.0;
        let relative = paddle.center_y() - self.center().y;
        let normalized = (relative / half).clamp(-1.0, 1.0);
        let angle = (normalized * MAX_BOUNCE_ANGLE_DEG).to_radians();
        self.vel.y = -BALL_SPEED * angle.sin();

        self.vel.x = ramp_component(self.vel.x, BALL_SPEED_UP, BALL_MAX_SPEED);
        self.vel.y = ramp_component(self.vel.y, BALL_SPEED_UP, BALL_MAX_SPEED);
        true
    }

    /// Re-centre and serve toward a random side with a non-zero vertical
    /// component
    pub fn reset(&mut self, rng: &mut impl RandomSource) {
        self.pos =
            Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0) - Vec2::splat(self.size / 2.0);

        let vx = BALL_SPEED * rng.choice(&[-1.0_f32, 1.0]);
        let vy_mag = rng.uniform(BALL_MIN_SERVE_VY, BALL_SPEED);
        let vy = vy_mag * rng.choice(&[-1.0_f32, 1.0]);
        self.vel = Vec2::new(vx, vy);
    }

    /// True once the ball has left the field past either paddle
    pub fn is_out_of_bounds(&self) -> bool {
        self.exit_side().is_some()
    }

    /// The side whose goal line the ball crossed, if any
    pub fn exit_side(&self) -> Option<Side> {
        if self.pos.x < 0.0 {
            Some(Side::Left)
        } else if self.pos.x > WINDOW_WIDTH - self.size {
            Some(Side::Right)
        } else {
            None
        }
    }
}
