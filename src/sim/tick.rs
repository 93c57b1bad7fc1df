//! Fixed timestep simulation tick
//!
//! Core game loop step: applies host input to the phase machine and, while
//! playing, advances paddles and ball by exactly one tick.

use super::paddle::{MoveDir, Side};
use super::rng::RandomSource;
use super::state::{GameEvent, GameMode, GamePhase, Match};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left paddle keys (ignored when the side is AI-driven)
    pub left: MoveDir,
    /// Right paddle keys (ignored when the side is AI-driven)
    pub right: MoveDir,
    /// Pause toggle
    pub pause: bool,
    /// Confirm / restart after game over
    pub confirm: bool,
    /// Mode picked at the menu
    pub menu_selection: Option<GameMode>,
    /// Abandon the match and return to the menu
    pub back_to_menu: bool,
}

/// Advance the match by one tick, returning what happened
pub fn tick<R: RandomSource>(state: &mut Match<R>, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.back_to_menu && state.phase != GamePhase::Menu {
        state.return_to_menu();
        return events;
    }

    match state.phase {
        GamePhase::Menu => {
            if let Some(mode) = input.menu_selection {
                if state.start(mode) {
                    events.push(GameEvent::Started { mode });
                }
            }
            return events;
        }
        GamePhase::GameOver => {
            if input.confirm && state.restart() {
                events.push(GameEvent::Started { mode: state.mode });
            }
            return events;
        }
        GamePhase::Playing | GamePhase::Paused => {
            if input.pause && state.toggle_pause() {
                events.push(if state.phase == GamePhase::Paused {
                    GameEvent::Paused
                } else {
                    GameEvent::Resumed
                });
            }
        }
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    if !state.ball.is_finite() {
        log::warn!("Non-finite ball state {:?}, re-serving", state.ball);
        state.ball.reset(&mut state.rng);
    }

    // Paddles first, from keys or the attached AI
    let left_dir = match state.left_ai.as_mut() {
        Some(ai) => ai.compute_move(&state.left, &state.ball, &mut state.rng),
        None => input.left,
    };
    let right_dir = match state.right_ai.as_mut() {
        Some(ai) => ai.compute_move(&state.right, &state.ball, &mut state.rng),
        None => input.right,
    };
    state.left.step(left_dir);
    state.right.step(right_dir);

    if state.ball.step() {
        events.push(GameEvent::WallBounce);
    }

    if state.ball.check_paddle_collision(&state.left, Side::Left) {
        events.push(GameEvent::PaddleHit { side: Side::Left });
    }
    if state.ball.check_paddle_collision(&state.right, Side::Right) {
        events.push(GameEvent::PaddleHit { side: Side::Right });
    }

    // The ball left through `exit`'s goal: the other side scores
    if let Some(exit) = state.ball.exit_side() {
        state.award_point(exit.opponent(), &mut events);
    }

    events
}
