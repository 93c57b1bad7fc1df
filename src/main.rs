//! Classic Pong - headless native entry point
//!
//! Runs an AI-vs-AI attract match through the full session loop, then prints
//! the leaderboard.
//!
//! Environment:
//! - `PONG_SETTINGS`: settings file (default `settings.json`)
//! - `PONG_SEED`: RNG seed (default: current time)
//! - `PONG_DEMO_SECONDS`: simulated seconds to run (default 60)
//! - `RUST_LOG`: log filter (default `info`)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::env;
    use std::path::PathBuf;

    use classic_pong::platform::{AttractInput, LogRenderer, Session};
    use classic_pong::sim::Match;
    use classic_pong::{JsonFileStore, LeaderboardStore, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Classic Pong (native) starting...");

    let settings_path = env::var_os("PONG_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let settings = Settings::load_from(&settings_path);

    let seed = env::var("PONG_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().unsigned_abs());
    let seconds = env::var("PONG_DEMO_SECONDS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60);
    log::info!("Game initialized with seed: {seed}");

    let game = Match::seeded(&settings, seed);
    let store = JsonFileStore::open(&settings.leaderboard_path);
    let mut session = Session::new(
        game,
        AttractInput::new(settings.difficulty),
        LogRenderer::default(),
        store,
        settings.tick_rate_hz,
    );
    session.run(seconds * u64::from(settings.tick_rate_hz));

    let board = session.store().leaderboard();
    if board.is_empty() {
        println!("No high scores yet");
        return;
    }
    println!("High scores:");
    for (i, entry) in board.get_top(10).iter().enumerate() {
        println!(
            "{:>2}. {:<12} {:>3}  {:<10} {}",
            i + 1,
            entry.player_name,
            entry.score,
            entry.game_mode,
            entry.timestamp
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on wasm
}
