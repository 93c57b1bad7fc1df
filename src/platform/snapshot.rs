//! Render-ready projection of a match

use serde::{Deserialize, Serialize};

use crate::colors;
use crate::sim::{GameMode, GamePhase, Match, RandomSource, Rect, Side};

/// Prompt shown while waiting for a mode selection
pub const MENU_PROMPT: &str = "1. VS Player   2. VS AI   3. Demo";

/// A filled rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub rect: Rect,
    pub color: [u8; 3],
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub left_paddle: Sprite,
    pub right_paddle: Sprite,
    pub ball: Sprite,
    pub score_left: u32,
    pub score_right: u32,
    /// Centre-screen text, if any
    pub banner: Option<String>,
    pub winner: Option<Side>,
    pub time_ticks: u64,
}

impl FrameSnapshot {
    pub fn capture<R: RandomSource>(game: &Match<R>) -> Self {
        let banner = match game.phase() {
            GamePhase::Menu => Some(MENU_PROMPT.to_string()),
            GamePhase::Playing => None,
            GamePhase::Paused => Some("PAUSED".to_string()),
            GamePhase::GameOver => game
                .winner()
                .map(|side| format!("{} Wins!", game.player_name(side))),
        };

        Self {
            phase: game.phase(),
            mode: game.mode(),
            left_paddle: Sprite {
                rect: game.paddle(Side::Left).rect(),
                color: colors::BLUE,
            },
            right_paddle: Sprite {
                rect: game.paddle(Side::Right).rect(),
                color: colors::RED,
            },
            ball: Sprite {
                rect: game.ball().rect(),
                color: colors::WHITE,
            },
            score_left: game.score_left(),
            score_right: game.score_right(),
            banner,
            winner: game.winner(),
            time_ticks: game.time_ticks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::{tick, Difficulty, TickInput};

    #[test]
    fn test_menu_frame() {
        let game = Match::seeded(&Settings::default(), 3);
        let frame = FrameSnapshot::capture(&game);
        assert_eq!(frame.phase, GamePhase::Menu);
        assert_eq!(frame.banner.as_deref(), Some(MENU_PROMPT));
        assert_eq!(frame.left_paddle.color, colors::BLUE);
        assert_eq!(frame.right_paddle.color, colors::RED);
        assert_eq!(frame.left_paddle.rect.min.x, PADDLE_MARGIN);
        assert_eq!(frame.ball.rect.size.x, BALL_SIZE);
    }

    #[test]
    fn test_paused_banner() {
        let mut game = Match::seeded(&Settings::default(), 3);
        game.start(GameMode::TwoPlayer);
        assert_eq!(FrameSnapshot::capture(&game).banner, None);
        game.toggle_pause();
        assert_eq!(
            FrameSnapshot::capture(&game).banner.as_deref(),
            Some("PAUSED")
        );
    }

    #[test]
    fn test_winner_banner_names_cpu() {
        let settings = Settings {
            winning_score: 1,
            ..Settings::default()
        };
        let mut game = Match::seeded(&settings, 3);
        game.start(GameMode::VersusAi(Difficulty::Easy));
        *game.ball_mut() = crate::sim::Ball::with_velocity(
            glam::Vec2::new(2.0, 300.0),
            glam::Vec2::new(-7.0, 0.0),
        );
        tick(&mut game, &TickInput::default());

        let frame = FrameSnapshot::capture(&game);
        assert_eq!(frame.phase, GamePhase::GameOver);
        assert_eq!(frame.winner, Some(Side::Right));
        assert_eq!(frame.banner.as_deref(), Some("CPU Wins!"));
        assert_eq!((frame.score_left, frame.score_right), (0, 1));
    }
}
