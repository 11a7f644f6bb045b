//! Terminal tile-matching runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. Picks a
//! difficulty on the menu screen, then runs the game on a fixed 16ms tick.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tui_sheep::app::{seed_from_env, Flow, Session};
use tui_sheep::commentary::CommentaryRuntime;
use tui_sheep::input::{handle_key_event, handle_menu_key, mouse_pick, should_quit, MenuChoice};
use tui_sheep::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_sheep::types::TICK_MS;

fn main() -> Result<()> {
    init_logging()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `SHEEP_LOG_PATH` when set; stdout belongs to the alternate screen.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var("SHEEP_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;
    let filter = EnvFilter::try_from_env("SHEEP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut seed = seed_from_env();
    info!(seed, "starting");

    let mut commentary = match CommentaryRuntime::start_from_env() {
        Ok(rt) => {
            info!(commentator = rt.commentator_name(), "commentary ready");
            Some(rt)
        }
        Err(e) => {
            warn!(error = %e, "commentary unavailable, using fallback text");
            None
        }
    };

    let view = GameView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut session: Option<Session> = None;
    // Episode ids stay unique across sessions so late replies are dropped.
    let mut next_episode: u32 = 0;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        match &session {
            Some(s) => view.render_into(s.snapshot(), &s.hud(), viewport, &mut fb),
            None => view.render_menu_into(viewport, &mut fb),
        }
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match session.as_mut() {
                        None => {
                            if let Some(MenuChoice::Start(difficulty)) = handle_menu_key(key) {
                                info!(difficulty = difficulty.as_str(), seed, "new game");
                                session = Some(Session::with_first_episode(
                                    difficulty,
                                    seed,
                                    next_episode,
                                ));
                                seed = seed.wrapping_add(1);
                                term.invalidate();
                            }
                        }
                        Some(s) => {
                            if let Some(input) = handle_key_event(key) {
                                if s.handle_input(input) == Flow::Menu {
                                    next_episode = s.next_episode();
                                    session = None;
                                    term.invalidate();
                                }
                            }
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let (Some(s), Some((col, row))) = (session.as_mut(), mouse_pick(mouse)) {
                        s.handle_click(&view, viewport, col, row);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(s) = session.as_mut() {
                if let Some(outcome) = s.tick(TICK_MS) {
                    match &commentary {
                        Some(rt) => rt.request(outcome),
                        None => s.set_commentary(outcome.outcome.unconfigured_commentary()),
                    }
                }
            }
        }

        if let Some(rt) = commentary.as_mut() {
            while let Some(reply) = rt.try_recv() {
                if let Some(s) = session.as_mut() {
                    s.accept_commentary(reply);
                }
            }
        }
    }
}
