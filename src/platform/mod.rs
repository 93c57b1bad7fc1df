//! Platform abstraction layer
//!
//! The simulation never touches devices. Hosts plug in:
//! - An `InputSource` that turns device state into a `TickInput`
//! - A `RenderContext` that draws a `FrameSnapshot`
//! - A `LeaderboardStore` for finished matches
//!
//! `Session` ties them to a `Match` and drives it at a fixed tick rate.

pub mod session;
pub mod snapshot;
pub mod time;

pub use session::Session;
pub use snapshot::{FrameSnapshot, Sprite};
pub use time::FixedStep;

use std::collections::VecDeque;

use crate::sim::{Difficulty, GameMode, GamePhase, Match, RandomSource, TickInput};

/// Source of per-tick input commands
pub trait InputSource {
    /// Sample input for the next tick. `game` is the state the tick will
    /// apply to.
    fn poll<R: RandomSource>(&mut self, game: &Match<R>) -> TickInput;

    /// The host asked to shut down
    fn quit_requested(&self) -> bool {
        false
    }
}

/// Sink for rendered frames
pub trait RenderContext {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Replays a fixed list of inputs, then idles. Quits once the script runs
/// out when built with `quit_when_done`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
            quit_when_done: false,
        }
    }

    pub fn quit_when_done(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll<R: RandomSource>(&mut self, _game: &Match<R>) -> TickInput {
        self.script.pop_front().unwrap_or_default()
    }

    fn quit_requested(&self) -> bool {
        self.quit_when_done && self.script.is_empty()
    }
}

/// Attract-mode driver: picks the demo from the menu and restarts it after
/// every finished match
#[derive(Debug, Clone, Copy)]
pub struct AttractInput {
    difficulty: Difficulty,
}

impl AttractInput {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }
}

impl InputSource for AttractInput {
    fn poll<R: RandomSource>(&mut self, game: &Match<R>) -> TickInput {
        match game.phase() {
            GamePhase::Menu => TickInput {
                menu_selection: Some(GameMode::Demo(self.difficulty)),
                ..Default::default()
            },
            GamePhase::GameOver => TickInput {
                confirm: true,
                ..Default::default()
            },
            GamePhase::Playing | GamePhase::Paused => TickInput::default(),
        }
    }
}

/// Headless renderer: logs score and banner changes
#[derive(Debug, Default)]
pub struct LogRenderer {
    last: Option<(u32, u32, Option<String>)>,
    frames: u64,
}

impl LogRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderContext for LogRenderer {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        let current = (frame.score_left, frame.score_right, frame.banner.clone());
        if self.last.as_ref() == Some(&current) {
            return;
        }
        match &frame.banner {
            Some(banner) => log::info!(
                "[{}] {} - {} | {banner}",
                frame.phase.as_str(),
                frame.score_left,
                frame.score_right
            ),
            None => log::info!(
                "[{}] {} - {}",
                frame.phase.as_str(),
                frame.score_left,
                frame.score_right
            ),
        }
        self.last = Some(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_scripted_input_drains_then_idles() {
        let game = Match::seeded(&Settings::default(), 1);
        let mut input = ScriptedInput::new([TickInput {
            pause: true,
            ..Default::default()
        }])
        .quit_when_done();

        assert!(!input.quit_requested());
        assert!(input.poll(&game).pause);
        assert!(input.quit_requested());
        assert!(!input.poll(&game).pause);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_attract_input_follows_phase() {
        let mut game = Match::seeded(&Settings::default(), 1);
        let mut input = AttractInput::new(Difficulty::Hard);

        let first = input.poll(&game);
        assert_eq!(first.menu_selection, Some(GameMode::Demo(Difficulty::Hard)));
        assert!(!input.quit_requested());

        game.start(GameMode::Demo(Difficulty::Hard));
        let during = input.poll(&game);
        assert!(during.menu_selection.is_none() && !during.confirm);
    }

    #[test]
    fn test_log_renderer_counts_frames() {
        let game = Match::seeded(&Settings::default(), 1);
        let mut renderer = LogRenderer::default();
        let frame = FrameSnapshot::capture(&game);
        renderer.present(&frame);
        renderer.present(&frame);
        assert_eq!(renderer.frames(), 2);
    }
}
