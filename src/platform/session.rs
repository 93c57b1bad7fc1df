//! Host loop: input -> tick -> persist -> present

use super::snapshot::FrameSnapshot;
use super::time::FixedStep;
use super::{InputSource, RenderContext};
use crate::persistence::LeaderboardStore;
use crate::sim::{tick, GameEvent, GameRng, Match, RandomSource};

/// A running game wired to its collaborators
pub struct Session<I, D, S, R: RandomSource = GameRng> {
    game: Match<R>,
    input: I,
    renderer: D,
    store: S,
    clock: FixedStep,
    ticks: u64,
}

impl<I, D, S, R> Session<I, D, S, R>
where
    I: InputSource,
    D: RenderContext,
    S: LeaderboardStore,
    R: RandomSource,
{
    pub fn new(game: Match<R>, input: I, renderer: D, store: S, tick_rate_hz: u32) -> Self {
        Self {
            game,
            input,
            renderer,
            store,
            clock: FixedStep::new(tick_rate_hz),
            ticks: 0,
        }
    }

    pub fn game(&self) -> &Match<R> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Match<R> {
        &mut self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &D {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Ticks run since the session began
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run exactly one tick and present the result
    pub fn run_tick(&mut self) -> Vec<GameEvent> {
        let events = self.step();
        self.present();
        events
    }

    /// Run however many ticks `elapsed` seconds are worth, then present once
    pub fn run_frame(&mut self, elapsed: f32) -> Vec<GameEvent> {
        let substeps = self.clock.advance(elapsed);
        let mut events = Vec::new();
        for _ in 0..substeps {
            events.extend(self.step());
        }
        self.present();
        events
    }

    /// Tick until the input source asks to quit or `max_ticks` have run.
    /// Returns the number of ticks run.
    pub fn run(&mut self, max_ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < max_ticks && !self.input.quit_requested() {
            self.run_tick();
            ran += 1;
        }
        log::info!("Session stopped after {ran} ticks");
        ran
    }

    fn step(&mut self) -> Vec<GameEvent> {
        let input = self.input.poll(&self.game);
        let events = tick(&mut self.game, &input);
        self.ticks += 1;
        self.record(&events);
        events
    }

    fn present(&mut self) {
        let frame = FrameSnapshot::capture(&self.game);
        self.renderer.present(&frame);
    }

    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            let GameEvent::MatchWon { entry, .. } = event else {
                continue;
            };
            if !self.game.mode().records_scores() {
                log::debug!("Not recording {} result", self.game.mode().label());
                continue;
            }
            match self.store.append_and_persist(entry.clone()) {
                Ok(Some(rank)) => log::info!("{} placed #{rank}", entry.player_name),
                Ok(None) => log::info!("{} did not make the leaderboard", entry.player_name),
                // Keep playing; the result is still ranked in memory
                Err(e) => log::error!("Failed to save high scores: {e}"),
            }
        }
    }
}
