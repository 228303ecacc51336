//! Asteroid Shooter headless entry point
//!
//! Runs the simulation with an autopilot pilot at a fixed 60 Hz step, builds
//! the draw list every frame like a graphics backend would, and records the
//! final score on the leaderboard.
//!
//! Usage: `asteroid-shooter [seed] [max_frames]`

use std::path::Path;

use glam::Vec2;

use asteroid_shooter::highscores::{self, HighScores, RunRecord};
use asteroid_shooter::renderer::DrawList;
use asteroid_shooter::sim::{FrameInput, Game, GameEvent};
use asteroid_shooter::{Settings, Tuning};

const SETTINGS_PATH: &str = "settings.json";
const TUNING_PATH: &str = "tuning.json";
const HIGHSCORES_PATH: &str = "highscores.json";

const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 5;
const FRAME_DT: f32 = 1.0 / 60.0;
const WINDOW_SIZE: (u32, u32) = (800, 800);

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let max_frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let settings = Settings::load_or_default(Path::new(SETTINGS_PATH));
    let tuning = Tuning::load_or_default(Path::new(TUNING_PATH));
    let mut scores = HighScores::load_or_default(Path::new(HIGHSCORES_PATH));

    log::info!("Asteroid Shooter starting with seed: {}", seed);

    let mut game = Game::new(seed, tuning);
    game.apply_settings(&settings);
    if let Some(top) = scores.best() {
        game.set_highest_score(top);
    }

    let mut draw_calls = 0usize;
    let mut sounds = 0usize;
    let mut stats = game.stats();

    while !game.is_game_over() && game.frame() < max_frames {
        let input = autopilot(&game);
        stats = game.tick(&input, FRAME_DT);

        let list = DrawList::build(&game, settings.show_hitboxes);
        draw_calls += list.draw_calls();
        sounds += game.audio_mut().drain_commands().len();

        for event in game.drain_events() {
            if let GameEvent::HighScoreBeaten { score } = event {
                log::info!("New highest score: {}", score);
            }
        }

        if settings.show_stats && stats.frame % 60 == 0 {
            log::info!("{:?}", stats);
        }
    }

    log::info!(
        "Finished after {} frames: score {}, {} asteroids destroyed, {} draw calls, {} sound commands",
        stats.frame,
        stats.score,
        stats.asteroids_destroyed,
        draw_calls,
        sounds
    );

    let run = RunRecord::from_stats(&stats, highscores::now_millis());
    if scores.record(run).is_some() {
        if let Err(e) = scores.save(Path::new(HIGHSCORES_PATH)) {
            log::warn!("Failed to save high scores: {}", e);
        }
    }
}

/// Aim at the closest live asteroid and keep shooting
fn autopilot(game: &Game) -> FrameInput {
    let ship = game.spaceships().spaceship().map(|s| s.position());
    let origin = ship.unwrap_or_default();

    let target = game
        .asteroids()
        .asteroids()
        .iter()
        .filter(|a| !a.is_destroyed())
        .map(|a| a.position())
        .min_by(|a, b| {
            a.distance_squared(origin)
                .total_cmp(&b.distance_squared(origin))
        });

    let mut input = FrameInput {
        window_size: WINDOW_SIZE,
        ..FrameInput::default()
    };
    if let Some(target) = target {
        input.cursor = ndc_to_cursor(target.truncate(), WINDOW_SIZE);
        input.fire = ship.is_some();
    }
    input
}

fn ndc_to_cursor(ndc: Vec2, window_size: (u32, u32)) -> Vec2 {
    let (width, height) = window_size;
    Vec2::new(
        (ndc.x * 0.5 + 0.5) * width as f32,
        (0.5 - ndc.y * 0.5) * height as f32,
    )
}
