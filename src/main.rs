//! Terminal Nim runner (default binary).
//!
//! Drives the turn controller from a fixed-timestep loop, renders through the
//! framebuffer renderer and routes keyboard and mouse input to it.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_nim::cli::Cli;
use tui_nim::core::{GameSnapshot, GameState};
use tui_nim::input::{handle_key_event, should_quit, BarCursor, PointerTracker};
use tui_nim::runtime::Services;
use tui_nim::term::{FrameBuffer, GameView, HitTarget, TerminalRenderer, Viewport};
use tui_nim::types::{InputAction, MAX_ROWS, TICK_MS};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let services = Services::start(cli.services_config())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cli, &services);

    // Always try to restore terminal state.
    let _ = term.exit();
    services.shutdown();
    result
}

fn run(term: &mut TerminalRenderer, cli: &Cli, services: &Services) -> Result<()> {
    let mut game = GameState::new(&cli.board(), cli.timings(), cli.seed)?;

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = BarCursor::new();
    let mut sizes: Vec<u32> = Vec::with_capacity(MAX_ROWS);
    let mut pointer = PointerTracker::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        if !game.table_ready() {
            if let Some(table) = services.try_table() {
                game.provide_table(table);
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game.snapshot_into(&mut snap);
        snap.sizes_into(&mut sizes);
        cursor.clamp(&sizes);
        view.render_into(&snap, Some((cursor.row, cursor.bar)), viewport, &mut fb);
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
                    if let Some(action) = handle_key_event(key) {
                        apply_action(&mut game, &mut cursor, &sizes, action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(press) = pointer.handle_mouse_event(mouse) {
                        match view.hit_test(&snap, viewport, press.column, press.row) {
                            Some(HitTarget::Bar { row, bar }) => {
                                cursor = BarCursor { row, bar };
                                game.select_bar(row, bar);
                            }
                            Some(HitTarget::Button) => press_button(&mut game),
                            None => {}
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS)?;
            for ev in game.drain_events() {
                services.log().record(ev);
            }
        }
    }
}

fn apply_action(
    game: &mut GameState,
    cursor: &mut BarCursor,
    sizes: &[u32],
    action: InputAction,
) {
    match action {
        InputAction::Press => {
            game.select_bar(cursor.row, cursor.bar);
        }
        InputAction::Submit => press_button(game),
        InputAction::Restart => {
            game.restart();
        }
        _ => {
            cursor.apply(action, sizes);
        }
    }
}

/// The single button submits during play and restarts once the game ended.
fn press_button(game: &mut GameState) {
    if game.outcome().is_some() {
        game.restart();
    } else {
        game.submit();
    }
}
