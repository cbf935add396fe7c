//! Trifall terminal runner (default binary).
//!
//! Crossterm supplies input and terminal control; drawing goes through the
//! framebuffer renderer in `trifall-term`. The loop polls input until the next
//! tick, then advances the key-repeat handler and the engine by the real
//! elapsed time.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use trifall::config::RunConfig;
use trifall::engine::Engine;
use trifall::input::{should_quit, InputHandler};
use trifall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use trifall::types::EngineState;
use trifall::{dispatch, logging};

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    logging::init(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let mut engine = match config.seed {
        Some(seed) => Engine::new(seed),
        None => Engine::from_entropy(),
    };
    if let Some(mode) = config.mode {
        engine.start_game(mode);
    }
    info!(seed = ?config.seed, tick_ms = config.tick_ms, "trifall started");

    let view = GameView::default();
    let mut input_handler = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = engine.snapshot();

    let tick_duration = Duration::from_millis(u64::from(config.tick_ms));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        engine.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = input_handler.handle_key(key) {
                        dispatch(&mut engine, action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

            for action in input_handler.update(elapsed_ms) {
                dispatch(&mut engine, action);
            }
            engine.update(elapsed_ms);

            if engine.state() != EngineState::Playing {
                input_handler.reset();
            }
        }
    }
}
