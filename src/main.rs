//! Terminal Tile Swap runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output. Logs go to a
//! file because the terminal is in raw mode while playing.

use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tile_swap::adapter::{AnalyticsSink, JsonLinesSink, ProgressStore, TracingSink};
use tile_swap::core::ProgressionController;
use tile_swap::input::{handle_key_event, should_autoplay, should_quit};
use tile_swap::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tile_swap::{App, Config};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    let mut app = build_app(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, config.tick_duration());

    // Always try to restore terminal state.
    let _ = term.exit();
    app.save();
    info!("Tile Swap exiting");
    result
}

fn init_logging(config: &Config) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;
    Ok(())
}

fn build_app(config: &Config) -> Result<App> {
    let store = ProgressStore::new(&config.save_file);
    if config.reset_progress {
        store.reset()?;
    }
    let progress = store.load()?;

    let seed = config.resolved_seed();
    info!(
        seed,
        level = progress.current_level,
        unlocked = progress.highest_unlocked_level,
        save_file = %store.path().display(),
        "Tile Swap starting"
    );

    let sink: Box<dyn AnalyticsSink> = match &config.analytics_file {
        Some(path) => match JsonLinesSink::append_to(path) {
            Ok(sink) => Box::new(sink),
            Err(err) => {
                warn!(error = %err, "Analytics file unavailable, logging events instead");
                Box::new(TracingSink)
            }
        },
        None => Box::new(TracingSink),
    };

    Ok(App::new(ProgressionController::with_progress(seed, progress))
        .with_store(store)
        .with_sink(sink))
}

fn run(term: &mut TerminalRenderer, app: &mut App, tick_duration: Duration) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(&view, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if should_autoplay(key) {
                        app.autoplay();
                    } else if let Some(action) = handle_key_event(key) {
                        app.handle_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the measured elapsed time.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            app.tick(elapsed.as_secs_f64());
        }
    }
}
