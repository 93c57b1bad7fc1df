//! Match state and the phase transitions hosts can trigger
//!
//! `Match` owns the ball and both paddles. AI controllers ride along with
//! the side they drive but only ever hand back a `MoveDir`.

use serde::{Deserialize, Serialize};

use super::ai::{AiController, Difficulty};
use super::ball::Ball;
use super::paddle::{Paddle, Side};
use super::rng::{GameRng, RandomSource};
use crate::highscores::LeaderboardEntry;
use crate::settings::Settings;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a mode selection
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// A side reached the winning score
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "MENU",
            GamePhase::Playing => "PLAYING",
            GamePhase::Paused => "PAUSED",
            GamePhase::GameOver => "GAME_OVER",
        }
    }
}

/// Who controls which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Both paddles from input
    TwoPlayer,
    /// Left from input, right from the AI
    VersusAi(Difficulty),
    /// Attract mode: both paddles AI-driven, never recorded
    Demo(Difficulty),
}

impl GameMode {
    /// Label stored with leaderboard entries
    pub fn label(&self) -> String {
        match self {
            GameMode::TwoPlayer => "PVP".to_string(),
            GameMode::VersusAi(d) => format!("AI-{d}"),
            GameMode::Demo(_) => "DEMO".to_string(),
        }
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            GameMode::TwoPlayer => None,
            GameMode::VersusAi(d) | GameMode::Demo(d) => Some(*d),
        }
    }

    fn with_difficulty(self, difficulty: Difficulty) -> Self {
        match self {
            GameMode::TwoPlayer => GameMode::TwoPlayer,
            GameMode::VersusAi(_) => GameMode::VersusAi(difficulty),
            GameMode::Demo(_) => GameMode::Demo(difficulty),
        }
    }

    pub fn is_ai_controlled(&self, side: Side) -> bool {
        match self {
            GameMode::TwoPlayer => false,
            GameMode::VersusAi(_) => side == Side::Right,
            GameMode::Demo(_) => true,
        }
    }

    pub fn records_scores(&self) -> bool {
        !matches!(self, GameMode::Demo(_))
    }
}

/// Something that happened during a tick (for sound, logging, persistence)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started { mode: GameMode },
    Paused,
    Resumed,
    WallBounce,
    PaddleHit { side: Side },
    Scored { scorer: Side, score_left: u32, score_right: u32 },
    MatchWon { winner: Side, entry: LeaderboardEntry },
}

/// A single match: ball, paddles, scores and phase
#[derive(Debug, Clone)]
pub struct Match<R: RandomSource = GameRng> {
    pub(crate) phase: GamePhase,
    pub(crate) mode: GameMode,
    pub(crate) score_left: u32,
    pub(crate) score_right: u32,
    pub(crate) winning_score: u32,
    pub(crate) winner: Option<Side>,
    pub(crate) ball: Ball,
    pub(crate) left: Paddle,
    pub(crate) right: Paddle,
    pub(crate) left_ai: Option<AiController>,
    pub(crate) right_ai: Option<AiController>,
    pub(crate) rng: R,
    pub(crate) names: [String; 2],
    /// Ticks simulated while playing
    pub(crate) time_ticks: u64,
}

impl Match<GameRng> {
    /// Create a match seeded for reproducibility
    pub fn seeded(settings: &Settings, seed: u64) -> Self {
        Self::new(settings, GameRng::new(seed))
    }
}

impl<R: RandomSource> Match<R> {
    pub fn new(settings: &Settings, mut rng: R) -> Self {
        let settings = settings.validated();
        let ball = Ball::new(&mut rng);
        Self {
            phase: GamePhase::Menu,
            mode: GameMode::VersusAi(settings.difficulty),
            score_left: 0,
            score_right: 0,
            winning_score: settings.winning_score,
            winner: None,
            ball,
            left: Paddle::new(Side::Left),
            right: Paddle::new(Side::Right),
            left_ai: None,
            right_ai: None,
            rng,
            names: [settings.left_player_name, settings.right_player_name],
            time_ticks: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.score_left,
            Side::Right => self.score_right,
        }
    }

    pub fn score_left(&self) -> u32 {
        self.score_left
    }

    pub fn score_right(&self) -> u32 {
        self.score_right
    }

    pub fn winning_score(&self) -> u32 {
        self.winning_score
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Direct ball access for hosts and tests that stage a position
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn ai(&self, side: Side) -> Option<&AiController> {
        match side {
            Side::Left => self.left_ai.as_ref(),
            Side::Right => self.right_ai.as_ref(),
        }
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Display name for a side; AI-driven sides are "CPU"
    pub fn player_name(&self, side: Side) -> &str {
        if self.mode.is_ai_controlled(side) {
            return "CPU";
        }
        match side {
            Side::Left => self.names[0].as_str(),
            Side::Right => self.names[1].as_str(),
        }
    }

    /// Begin a fresh match in `mode`. Only valid from the menu or after a
    /// finished match.
    pub fn start(&mut self, mode: GameMode) -> bool {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
            log::debug!("Ignoring start while {}", self.phase.as_str());
            return false;
        }
        self.mode = mode;
        self.left_ai = mode
            .is_ai_controlled(Side::Left)
            .then(|| AiController::new(Side::Left, mode.difficulty().unwrap_or_default()));
        self.right_ai = mode
            .is_ai_controlled(Side::Right)
            .then(|| AiController::new(Side::Right, mode.difficulty().unwrap_or_default()));
        self.reset_field();
        self.phase = GamePhase::Playing;
        log::info!("Match started: {} (first to {})", mode.label(), self.winning_score);
        true
    }

    /// Replay the finished match with the same mode
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        for ai in self.left_ai.iter_mut().chain(self.right_ai.iter_mut()) {
            ai.reset();
        }
        self.reset_field();
        self.phase = GamePhase::Playing;
        log::info!("Match restarted: {}", self.mode.label());
        true
    }

    /// Abandon whatever is going on and show the mode menu
    pub fn return_to_menu(&mut self) {
        self.left_ai = None;
        self.right_ai = None;
        self.reset_field();
        self.phase = GamePhase::Menu;
    }

    /// PLAYING <-> PAUSED; a no-op in any other phase
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                log::info!("Paused");
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                log::info!("Resumed");
                true
            }
            GamePhase::Menu | GamePhase::GameOver => false,
        }
    }

    /// Re-parameterize every attached AI (and the mode) in one step
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.mode = self.mode.with_difficulty(difficulty);
        for ai in self.left_ai.iter_mut().chain(self.right_ai.iter_mut()) {
            ai.set_difficulty(difficulty);
        }
    }

    /// Fail-soft variant: unknown names select `Medium`
    pub fn set_difficulty_by_name(&mut self, name: &str) -> Difficulty {
        let difficulty = Difficulty::from_name_or_default(name);
        self.set_difficulty(difficulty);
        difficulty
    }

    fn reset_field(&mut self) {
        self.score_left = 0;
        self.score_right = 0;
        self.winner = None;
        self.time_ticks = 0;
        self.left.recenter();
        self.right.recenter();
        self.ball.reset(&mut self.rng);
    }

    /// Credit a point to `scorer`, re-serve, and finish the match if the
    /// winning score is reached
    pub(crate) fn award_point(&mut self, scorer: Side, events: &mut Vec<GameEvent>) {
        match scorer {
            Side::Left => self.score_left += 1,
            Side::Right => self.score_right += 1,
        }
        log::debug!(
            "{:?} scores ({} - {})",
            scorer,
            self.score_left,
            self.score_right
        );
        events.push(GameEvent::Scored {
            scorer,
            score_left: self.score_left,
            score_right: self.score_right,
        });
        self.ball.reset(&mut self.rng);

        if self.score(scorer) >= self.winning_score {
            self.finish(scorer, events);
        }
    }

    fn finish(&mut self, winner: Side, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::GameOver;
        self.winner = Some(winner);
        let entry = LeaderboardEntry::stamped(
            self.player_name(winner),
            self.score(winner),
            &self.mode.label(),
        );
        log::info!(
            "Game over: {} wins {} - {}",
            entry.player_name,
            self.score_left,
            self.score_right
        );
        events.push(GameEvent::MatchWon { winner, entry });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn new_match() -> Match {
        Match::seeded(&Settings::default(), 12345)
    }

    #[test]
    fn test_starts_in_menu() {
        let m = new_match();
        assert_eq!(m.phase(), GamePhase::Menu);
        assert_eq!(m.winning_score(), WINNING_SCORE);
        assert_eq!(m.winner(), None);
    }

    #[test]
    fn test_pause_is_noop_outside_play() {
        let mut m = new_match();
        assert!(!m.toggle_pause());
        assert_eq!(m.phase(), GamePhase::Menu);

        m.start(GameMode::TwoPlayer);
        assert!(m.toggle_pause());
        assert_eq!(m.phase(), GamePhase::Paused);
        assert!(m.toggle_pause());
        assert_eq!(m.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_start_installs_controllers() {
        let mut m = new_match();
        m.start(GameMode::TwoPlayer);
        assert!(m.ai(Side::Left).is_none() && m.ai(Side::Right).is_none());

        m.return_to_menu();
        m.start(GameMode::VersusAi(Difficulty::Hard));
        assert!(m.ai(Side::Left).is_none());
        assert_eq!(m.ai(Side::Right).map(|ai| ai.difficulty()), Some(Difficulty::Hard));

        m.return_to_menu();
        m.start(GameMode::Demo(Difficulty::Easy));
        assert!(m.ai(Side::Left).is_some() && m.ai(Side::Right).is_some());
    }

    #[test]
    fn test_start_ignored_mid_match() {
        let mut m = new_match();
        m.start(GameMode::TwoPlayer);
        m.score_left = 3;
        assert!(!m.start(GameMode::TwoPlayer));
        assert_eq!(m.score_left(), 3);
    }

    #[test]
    fn test_win_finishes_once() {
        let mut m = new_match();
        m.start(GameMode::TwoPlayer);
        let mut events = Vec::new();
        for _ in 0..WINNING_SCORE {
            m.award_point(Side::Right, &mut events);
        }
        assert_eq!(m.phase(), GamePhase::GameOver);
        assert_eq!(m.winner(), Some(Side::Right));
        let wins: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::MatchWon { entry, .. } => Some(entry),
                _ => None,
            })
            .collect();
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].player_name, "Player 2");
        assert_eq!(wins[0].score, WINNING_SCORE);
        assert_eq!(wins[0].game_mode, "PVP");
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut m = new_match();
        assert!(!m.restart());
        m.start(GameMode::VersusAi(Difficulty::Medium));
        assert!(!m.restart());

        let mut events = Vec::new();
        for _ in 0..WINNING_SCORE {
            m.award_point(Side::Left, &mut events);
        }
        assert!(m.restart());
        assert_eq!(m.phase(), GamePhase::Playing);
        assert_eq!((m.score_left(), m.score_right()), (0, 0));
        assert_eq!(m.winner(), None);
        assert_eq!(m.mode(), GameMode::VersusAi(Difficulty::Medium));
    }

    #[test]
    fn test_set_difficulty_updates_mode_and_ai() {
        let mut m = new_match();
        m.start(GameMode::VersusAi(Difficulty::Easy));
        m.set_difficulty(Difficulty::Hard);
        assert_eq!(m.mode(), GameMode::VersusAi(Difficulty::Hard));
        assert_eq!(m.ai(Side::Right).map(|ai| ai.reaction_delay_ticks()), Some(5));

        assert_eq!(m.set_difficulty_by_name("bogus"), Difficulty::Medium);
        assert_eq!(m.mode().label(), "AI-MEDIUM");
    }

    #[test]
    fn test_ai_side_named_cpu() {
        let mut m = new_match();
        m.start(GameMode::VersusAi(Difficulty::Medium));
        assert_eq!(m.player_name(Side::Left), "Player 1");
        assert_eq!(m.player_name(Side::Right), "CPU");
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(GameMode::TwoPlayer.label(), "PVP");
        assert_eq!(GameMode::VersusAi(Difficulty::Hard).label(), "AI-HARD");
        assert_eq!(GameMode::Demo(Difficulty::Easy).label(), "DEMO");
        assert!(!GameMode::Demo(Difficulty::Easy).records_scores());
    }
}
