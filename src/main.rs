//! Terminal blockfall runner (default binary).
//!
//! Reads key press/release events through crossterm, feeds them to the engine
//! with the measured frame delta, and renders through the framebuffer-based
//! terminal screen (no ratatui widgets/layout).

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{terminal, QueueableCommand};

use blockfall::core::{AutorepeatController, EngineEvent, GameSnapshot, PuzzleEngine, RenderSink, UiSink};
use blockfall::input::{is_restart, map_event, should_quit, KeyTransition};
use blockfall::leaderboard::{JsonFileLeaderboard, Leaderboard, MemoryLeaderboard};
use blockfall::term::{TerminalScreen, Viewport};
use blockfall::types::GAME_ID;
use blockfall::AppConfig;

/// Target frame time (about 60 fps).
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // stdout is the alternate screen; logs go to stderr and should be redirected.
    if config.log_enabled {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .target(env_logger::Target::Stderr)
            .init();
    }
    log::info!("starting with seed {} ({})", config.seed, config.language.as_str());

    let mut leaderboard = open_leaderboard(&config);

    let (w, h) = terminal::size().unwrap_or((80, 24));
    let mut screen = TerminalScreen::new(config.language, Viewport::new(w, h));
    screen.enter()?;
    let release_events = push_release_reporting();

    let result = run(&mut screen, &config, leaderboard.as_mut(), release_events);

    // Always try to restore terminal state.
    if release_events {
        let mut out = io::stdout();
        let _ = out.queue(PopKeyboardEnhancementFlags).and_then(|o| o.flush());
    }
    let _ = screen.exit();
    result
}

fn open_leaderboard(config: &AppConfig) -> Box<dyn Leaderboard> {
    if config.leaderboard_disabled {
        log::info!("leaderboard disabled, scores last for this session only");
        return Box::new(MemoryLeaderboard::new());
    }
    match JsonFileLeaderboard::open(&config.scores_path) {
        Ok(board) => Box::new(board),
        Err(err) => {
            log::warn!("{err:#}; scores will not be saved");
            Box::new(MemoryLeaderboard::new())
        }
    }
}

/// Ask the terminal to report key releases. Returns whether it will.
fn push_release_reporting() -> bool {
    if !matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
        log::info!("terminal cannot report key releases, using release timeout");
        return false;
    }
    let mut out = io::stdout();
    out.queue(PushKeyboardEnhancementFlags(
        KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
    ))
    .and_then(|o| o.flush())
    .is_ok()
}

fn run(
    screen: &mut TerminalScreen,
    config: &AppConfig,
    leaderboard: &mut dyn Leaderboard,
    release_events: bool,
) -> Result<()> {
    let controller = AutorepeatController::new()
        .with_key_release_timeout_ms(config.key_release_timeout(release_events));
    let mut engine = PuzzleEngine::with_controller(config.seed, controller);
    let mut snapshot = GameSnapshot::default();

    let best = leaderboard.best_score(GAME_ID, &config.player).unwrap_or(0);
    screen.hud_mut().set_best_score(best);

    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        // Input until the next frame is due.
        let deadline = last_frame + frame;
        while event::poll(deadline.saturating_duration_since(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_restart(key) {
                        engine.reset();
                        continue;
                    }
                    match map_event(key) {
                        Some(KeyTransition::Down(k)) => engine.key_down(k),
                        Some(KeyTransition::Up(k)) => engine.key_up(k),
                        None => {}
                    }
                }
                Event::Resize(w, h) => screen.resize(w, h),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed_ms = u32::try_from(now.duration_since(last_frame).as_millis()).unwrap_or(u32::MAX);
        last_frame = now;

        engine.frame(elapsed_ms);

        for event in engine.take_events() {
            if let EngineEvent::GameOver { final_score } = event {
                submit_score(leaderboard, &config.player, final_score);
            }
            screen.on_event(&event);
        }

        engine.snapshot_into(&mut snapshot);
        screen.present(&snapshot)?;
    }
}

fn submit_score(leaderboard: &mut dyn Leaderboard, player: &str, score: u32) {
    match leaderboard.save_best_score(GAME_ID, player, score) {
        Ok(outcome) if !outcome.is_accepted() => {
            log::warn!("leaderboard rejected game id {GAME_ID:?}")
        }
        Ok(outcome) => log::info!("final score {score} for {player}: {outcome:?}"),
        Err(err) => log::warn!("could not save score: {err:#}"),
    }
}
