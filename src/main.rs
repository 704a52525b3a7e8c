//! Terminal runner (default binary).
//!
//! Single-threaded loop: render, wait for input until the next step deadline,
//! apply the mapped action, and fire gravity on the configured cadence.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event};

use tile_tetris::config::{parse_args, DriverConfig};
use tile_tetris::core::Game;
use tile_tetris::input::{handle_key_event, handle_mouse_event, should_quit};
use tile_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tile_tetris::types::GameAction;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args, DriverConfig::from_env())?;

    let mut term = TerminalRenderer::new();
    term.enter(config.mouse)?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let mut game = result?;
    eprintln!(
        "[tile-tetris] seed={} step_ms={} mouse={}",
        config.seed, config.step_ms, config.mouse
    );
    if game.take_game_over_event() {
        eprintln!("[tile-tetris] game over after {} pieces", game.piece_id());
    } else {
        eprintln!("[tile-tetris] quit after {} pieces", game.piece_id());
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &DriverConfig) -> Result<Game> {
    let mut game = Game::new(config.seed);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = game.snapshot();

    let step_interval = config.step_interval();
    let mut last_step = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next step.
        let timeout = step_interval.saturating_sub(last_step.elapsed());
        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(game);
                    }
                    handle_key_event(key)
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, |x| view.column_for_x(viewport, x))
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    None
                }
                _ => None,
            };
            if let Some(action) = action {
                game.apply_action(action);
                // A manual step restarts the gravity timer.
                if matches!(action, GameAction::Step | GameAction::Drop) {
                    last_step = Instant::now();
                }
            }
        }

        // Gravity.
        if last_step.elapsed() >= step_interval {
            last_step = Instant::now();
            game.step();
        }
    }
}
