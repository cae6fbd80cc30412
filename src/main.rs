//! A terminal carousel: flip through a deck of panels with the arrow keys,
//! digit keys or the mouse.
//!
//! Point it at a directory (one panel per file) or at a single text file
//! whose panels are separated by `---` lines.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, text::Line, widgets::Paragraph, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::{carousel::Carousel, deck};
use crate::ui::{carousel_widget::CarouselWidget, layout::AppLayout, popup::HelpPopup, theme::Theme};

/// Frame interval while idle; also the slide animation step.
const TICK_RATE: Duration = Duration::from_millis(33);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal panel carousel")]
struct Cli {
    /// Deck to show: a directory (one panel per file) or a text file.
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Panel to open first (1-based).
    #[arg(long, default_value_t = 1)]
    start: usize,

    /// Line that separates panels inside a single-file deck.
    #[arg(long, default_value = deck::DEFAULT_SEPARATOR)]
    separator: String,

    /// Switch panels instantly instead of sliding.
    #[arg(long)]
    no_animation: bool,

    /// Write the current configuration (defaults merged with the config
    /// file) back to disk and exit.
    #[arg(long)]
    write_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr behind RUST_LOG; the TUI owns the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let user_config = config::AppConfig::load();

    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── build the carousel ────────────────────────────────────
    let panels = deck::load_deck(&cli.path, &cli.separator)
        .with_context(|| format!("loading deck from {}", cli.path.display()))?;
    let mut carousel = Carousel::new(panels)?;
    open_at(&mut carousel, cli.start)?;
    tracing::info!(panels = carousel.len(), start = carousel.cursor(), "deck ready");

    let mut state = AppState::new(cli.path, carousel, user_config, !cli.no_animation);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let result = run(&mut state).await;

    // ── teardown ──────────────────────────────────────────────
    // Runs even when the loop failed so the shell gets its terminal back.
    restore_terminal();

    result
}

/// Move the carousel to the 1-based panel `start`.  Panel 0 does not exist
/// and anything past the end is rejected by the carousel.
fn open_at<P>(carousel: &mut Carousel<P>, start: usize) -> Result<()> {
    let index = start
        .checked_sub(1)
        .context("invalid --start: panels are numbered from 1")?;
    carousel.go_to(index).context("invalid --start")?;
    Ok(())
}

/// Enter the alternate screen and run the draw / event loop until quit.
async fn run(state: &mut AppState) -> Result<()> {
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(TICK_RATE);

    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            draw(frame, &*state);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Resize(w, h) => {
                state.terminal_area = Rect::new(0, 0, w, h);
                // A half-finished slide was sized for the old width.
                if let Some(slide) = state.slide.as_mut() {
                    slide.snap(state.carousel.cursor());
                }
            }
            AppEvent::Tick => {
                if let Some(slide) = state.slide.as_mut().filter(|s| s.is_animating()) {
                    slide.tick();
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Best-effort terminal restore; failures are logged, not propagated.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!("failed to leave raw mode: {e}");
    }
    let mut stderr_handle = stderr();
    if let Err(e) = execute!(stderr_handle, LeaveAlternateScreen, DisableMouseCapture, Show) {
        tracing::warn!("failed to restore terminal: {e}");
    }
}

fn draw(frame: &mut ratatui::Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area(), state.config.show_indicators);
    let current = state.carousel.current();

    let title = format!(
        " {} — {} ({}/{}) ",
        state.source.display(),
        current.title,
        state.carousel.cursor() + 1,
        state.carousel.len(),
    );
    frame.render_widget(
        Paragraph::new(Line::styled(title, Theme::title_style())),
        layout.title_area,
    );

    frame.render_widget(
        CarouselWidget {
            carousel: &state.carousel,
            slide_offset: state.slide_offset(),
            dots_area: layout.dots_area,
        },
        layout.strip_area,
    );

    let status = match &state.status_message {
        Some(msg) => Paragraph::new(msg.as_str()).style(Theme::error_style()),
        None => Paragraph::new(state.config.status_bar_hint()).style(Theme::status_bar_style()),
    };
    frame.render_widget(status, layout.status_area);

    if state.active_view == ActiveView::Help {
        frame.render_widget(HelpPopup { config: &state.config }, frame.area());
    }
}
