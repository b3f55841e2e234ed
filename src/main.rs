//! Terminal Hextris runner (default binary).
//!
//! crossterm for input, the framebuffer renderer from `hextris::term` for
//! output, and a [`DropTimer`] standing in for the fall clock. Logs go to
//! `--log-file` only; the terminal belongs to the game.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info, trace};
use tracing_subscriber::{fmt, EnvFilter};

use hextris::core::{EngineConfig, EngineEvent, GameSnapshot, GameState};
use hextris::input::{handle_key_event, should_quit};
use hextris::term::{Flash, FrameBuffer, HexView, TerminalRenderer, Viewport};
use hextris::types::{
    GameAction, BASE_DROP_INTERVAL_MS, DROP_HEIGHT, DROP_INTERVAL_FLOOR_MS,
};
use hextris::DropTimer;

/// Upper bound on how long a frame waits for input.
const FRAME_MS: u64 = 50;
/// How long a "+N" or "blocked" note stays on screen.
const FLASH_MS: u64 = 700;

#[derive(Parser, Debug)]
#[command(name = "hextris")]
#[command(about = "Falling-hexagon puzzle on an infinite cube-coordinate lattice")]
struct Args {
    /// RNG seed; the same seed replays the same pieces
    #[arg(long)]
    seed: Option<u32>,

    /// Distance from the origin at which new pieces appear
    #[arg(long, default_value_t = DROP_HEIGHT)]
    drop_height: i32,

    /// Drop interval at score 0
    #[arg(long, default_value_t = BASE_DROP_INTERVAL_MS)]
    base_interval_ms: u32,

    /// Fastest drop interval
    #[arg(long, default_value_t = DROP_INTERVAL_FLOOR_MS)]
    floor_interval_ms: u32,

    /// Also clear dense clusters after each turn
    #[arg(long)]
    cluster_elimination: bool,

    /// Write logs here (RUST_LOG filters, default info)
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = EngineConfig::default()
        .with_base_interval_ms(args.base_interval_ms)
        .with_floor_interval_ms(args.floor_interval_ms)
        .with_drop_height(args.drop_height)
        .with_cluster_elimination(args.cluster_elimination);
    config.validate().context("invalid engine configuration")?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!(seed, ?config, "starting");
    let mut game = GameState::with_config(seed, config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(
        score = game.score(),
        pieces = game.pieces_locked(),
        "exiting"
    );
    result
}

fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot create log file {path}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging init failed: {e}"))?;
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let view = HexView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut timer = DropTimer::new(game.drop_interval_ms() as u64, now_ms());
    let mut episode = game.episode_id();
    let mut flash: Option<(Flash, u64)> = None;

    loop {
        // Render.
        let now = now_ms();
        if flash.is_some_and(|(_, until)| now >= until) {
            flash = None;
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, flash.map(|(f, _)| f), Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until the next drop or frame.
        let timeout = Duration::from_millis(timer.timeout_ms(now_ms()).min(FRAME_MS));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let accepted = game.apply_action(action);
                        let steering = matches!(
                            action,
                            GameAction::MoveLeft
                                | GameAction::MoveRight
                                | GameAction::RotateLeft
                                | GameAction::RotateRight
                        );
                        if !accepted && steering {
                            trace!(action = action.as_str(), "rejected");
                            flash = Some((Flash::Blocked, now_ms() + FLASH_MS));
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Timer.
        let now = now_ms();
        if game.episode_id() != episode {
            episode = game.episode_id();
            timer = DropTimer::new(game.drop_interval_ms() as u64, now);
            flash = None;
        }
        timer.set_paused(game.paused() || game.game_over(), now);
        if timer.poll(now) {
            game.drop_piece(None, true);
        }

        for event in game.take_events() {
            match event {
                EngineEvent::Vanish { points } => {
                    flash = Some((Flash::Scored(points), now + FLASH_MS));
                }
                EngineEvent::DropIntervalChanged { interval_ms } => {
                    debug!(interval_ms, "drop timer re-armed");
                    timer.set_interval(interval_ms as u64, now);
                }
                EngineEvent::GameOver => {
                    flash = None;
                }
            }
        }
    }
}
