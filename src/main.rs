//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. Game
//! time is measured with a monotonic clock and fed to the session in whole
//! milliseconds.

use std::fs::{self, OpenOptions};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::FileStore;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::{open_output, App, Config};

/// Redraw cadence while idle
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config);
    log::info!(
        "starting: {}x{} board, drop {}ms, seed {}, data dir {}",
        config.session.cols,
        config.session.rows,
        config.session.drop_interval_ms,
        config.session.seed,
        config.data_dir.display()
    );

    let store = FileStore::new(&config.data_dir);
    let music = if config.music {
        open_output()
    } else {
        log::info!("music switched off by BLOCKFALL_MUSIC");
        None
    };
    let mut app = App::new(config.session, store, music);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("fatal: {:#}", e);
    }
    log::info!("exiting");
    result
}

/// Log to a file so the alternate screen stays clean. Failing to open the
/// file just disables logging.
fn init_logging(config: &Config) {
    if let Some(parent) = config.log_file.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
    else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn run(term: &mut TerminalRenderer, app: &mut App<FileStore>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_step = Instant::now();

    while !app.should_quit() {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(&view, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most one frame.
        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => app.handle_key(key),
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Feed whole milliseconds, carrying the remainder.
        let ms = last_step.elapsed().as_millis().min(u32::MAX as u128) as u32;
        if ms > 0 {
            last_step += Duration::from_millis(ms as u64);
            app.advance(ms);
        }
    }
    Ok(())
}
