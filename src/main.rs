//! overlay-select - Interactive terminal picker
//! Copyright Cybex B.V.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use overlay_select::app::{App, AppOptions, Outcome};
use overlay_select::config::DropdownConfig;
use overlay_select::constants::EVENT_POLL_TIMEOUT_MS;
use overlay_select::dropdown::update_loop::wait_for_frame;
use overlay_select::dropdown::Item;
use overlay_select::{paths, ui};

/// Footer rows below the content pane
const FOOTER_HEIGHT: u16 = 1;

/// Interactive picker with an anchored dropdown
#[derive(Parser)]
#[command(name = "overlay-select")]
#[command(author = "Cybex B.V.")]
#[command(version = "1.0.0")]
#[command(about = "Pick one or more items from an anchored dropdown and print the choice as JSON")]
struct Cli {
    /// Item labels (each label is also its value)
    items: Vec<String>,

    /// Read items from a JSON or TOML file of {value, label} entries
    #[arg(long, value_name = "FILE")]
    items_file: Option<PathBuf>,

    /// Allow selecting several items
    #[arg(short, long)]
    multiselect: bool,

    /// Initial filter text
    #[arg(short, long, default_value = "")]
    filter: String,

    /// Initially selected value (repeatable)
    #[arg(short, long = "selected", value_name = "VALUE")]
    selected: Vec<String>,

    /// Configuration file (default: ~/.config/overlay-select/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Page row the select input is placed on
    #[arg(long, default_value_t = 2)]
    anchor_row: i32,

    /// Identifier reported in log lines
    #[arg(long)]
    hook: Option<String>,

    /// Title of the select input
    #[arg(short, long)]
    title: Option<String>,
}

/// TOML items file layout
#[derive(Deserialize)]
struct ItemsFile {
    items: Vec<Item<String>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", DropdownConfig::example_toml());
        return Ok(());
    }

    // Set up logging to file
    let log_dir = paths::data_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, paths::LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    tracing::info!("overlay-select starting");

    let config = match &cli.config {
        Some(path) => DropdownConfig::load_from(path)?,
        None => DropdownConfig::load_or(DropdownConfig::terminal()),
    };

    let mut items: Vec<Item<String>> = cli
        .items
        .iter()
        .map(|label| Item::new(label.clone(), label.as_str()))
        .collect();
    if let Some(path) = &cli.items_file {
        items.extend(load_items(path)?);
    }

    let options = AppOptions {
        items,
        selected: cli.selected,
        multiselect: cli.multiselect,
        filter: cli.filter,
        title: cli.title,
        hook: cli.hook,
        anchor_row: cli.anchor_row,
    };

    let outcome = run_tui(App::new(config, options)).await?;

    match outcome {
        Outcome::Selected(values) => {
            println!("{}", serde_json::to_string(&values)?);
            Ok(())
        }
        Outcome::Cancelled => {
            tracing::info!("Selection cancelled");
            // Flush the log before exiting without unwinding
            drop(guard);
            std::process::exit(1);
        }
    }
}

/// Read items from a `.toml` file (`[[items]]` tables) or a JSON array
fn load_items(path: &Path) -> Result<Vec<Item<String>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file: {}", path.display()))?;

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let items = if is_toml {
        toml::from_str::<ItemsFile>(&content)
            .with_context(|| format!("Failed to parse items file: {}", path.display()))?
            .items
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse items file: {}", path.display()))?
    };

    tracing::info!(count = items.len(), path = %path.display(), "Loaded items");
    Ok(items)
}

async fn run_tui(mut app: App) -> Result<Outcome> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        return Err(err);
    }

    Ok(app.result())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let size = terminal.size()?;
    app.set_size(size.width, size.height.saturating_sub(FOOTER_HEIGHT));
    app.open_dropdown();

    // Create async event stream for responsive input
    let mut event_stream = EventStream::new();

    loop {
        // Draw UI, then fit row text and redraw if it changed
        terminal.draw(|frame| ui::draw(frame, app))?;
        if app.after_render() {
            terminal.draw(|frame| ui::draw(frame, app))?;
        }

        let timeout = Duration::from_millis(EVENT_POLL_TIMEOUT_MS);

        tokio::select! {
            biased;  // Prioritize in order: input, update loop frames, timeout

            // Terminal events (instant response)
            Some(Ok(event)) = event_stream.next() => {
                let now = Instant::now();
                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key.code, now);
                    }
                    Event::Mouse(mouse) => app.handle_mouse(mouse, now),
                    Event::Resize(width, height) => {
                        app.handle_resize(width, height.saturating_sub(FOOTER_HEIGHT), now);
                    }
                    _ => {}
                }
            }
            // Update loop frame while the page scrolls or resizes
            _ = wait_for_frame(app.frame_deadline()) => {
                app.on_frame(Instant::now());
            }
            // Timeout for idle redraw
            _ = tokio::time::sleep(timeout) => {}
        }

        if app.should_quit {
            break;
        }
    }

    app.close_dropdown();
    Ok(())
}
