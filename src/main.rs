//! Terminal runner (default binary).
//!
//! Drives one [`Game`] from a single loop: keys from crossterm are applied as commands,
//! gravity moves the piece down every tick, and each iteration renders a snapshot through
//! the framebuffer renderer. Gravity stops once the game is lost; `q` quits.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use blockfall::config::{parse_args, RunConfig, USAGE};
use blockfall::core::{Game, GameSnapshot, PieceSource, ScriptedSource, UniformSource};
use blockfall::input::{handle_key_event, is_action_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    init_logging(&config)?;

    match config.shapes.clone() {
        Some(shapes) => {
            let source = ScriptedSource::new(shapes).context("empty --shapes cycle")?;
            play(&config, source)
        }
        None => {
            let source = match config.seed {
                Some(seed) => UniformSource::seeded(seed),
                None => UniformSource::from_os_rng(),
            };
            play(&config, source)
        }
    }
}

/// Run one game on the terminal, then print a summary if it was lost.
fn play<S: PieceSource>(config: &RunConfig, source: S) -> Result<()> {
    let mut game = Game::with_source(config.width, config.height, source)
        .context("cannot start game")?;
    info!(
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        scripted = config.shapes.is_some(),
        tick_ms = config.tick_ms,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    let result = term
        .enter()
        .context("cannot set up terminal")
        .and_then(|_| run(&mut term, &mut game, config));

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!(%err, "terminal restore failed");
    }

    info!(
        rows_completed = game.rows_completed(),
        pieces_locked = game.pieces_locked(),
        lost = game.has_lost(),
        "finished"
    );
    if result.is_ok() && game.has_lost() {
        println!(
            "Game over: {} rows completed with {} pieces.",
            game.rows_completed(),
            game.pieces_locked()
        );
    }
    result
}

/// Send `tracing` output to the log file, if one was requested.
fn init_logging(config: &RunConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            config.log_level,
        ))
        .try_init()
        .context("cannot install log subscriber")?;
    Ok(())
}

fn run<S: PieceSource>(
    term: &mut TerminalRenderer,
    game: &mut Game<S>,
    config: &RunConfig,
) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(config.tick_ms);
    let mut last_tick = Instant::now();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_action_event(&key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            if !game.has_lost() {
                game.move_down();
            }
        }
    }
}
