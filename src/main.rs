//! Terminal 2048 runner (default binary).
//!
//! crossterm for input, the framebuffer renderer from `tui_2048::term` for
//! output. The engine is ticked with wall-clock milliseconds so the slide
//! animation runs at its configured speed regardless of frame rate.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_2048::config::AppConfig;
use tui_2048::core::{GameSnapshot, GridEngine};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::logging;
use tui_2048::term::{
    frame_fingerprint, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport,
};
use tui_2048::types::TICK_MS;

/// Redraw a resting board at least this often.
const IDLE_REDRAW_MS: u64 = 1_000;

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(config.log_path.as_deref())?;
    let engine_config = config.engine_config()?;
    info!(
        "starting {}x{} game, win tile exponent {}, seed {}, end policy {}",
        engine_config.grid_width,
        engine_config.grid_height,
        engine_config.win_exponent,
        engine_config.seed,
        engine_config.end_policy.as_str()
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, GridEngine::new(engine_config));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut engine: GridEngine) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut throttle = RenderThrottle::new(IDLE_REDRAW_MS);

    let started = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        engine.snapshot_into(&mut snap);
        let fingerprint =
            frame_fingerprint(snap.board_hash, snap.score, snap.episode_id, snap.finished);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint, snap.animating) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(
                            "quit in episode {} with score {}",
                            engine.episode_id(),
                            engine.score()
                        );
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        engine.apply_action(action);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            engine.tick(elapsed.as_millis() as u32);
        }
    }
}
