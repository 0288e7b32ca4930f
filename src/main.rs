//! taglist - an interactive tag list in the terminal.
//!
//! Click to select, `^E` to edit (type to add, backspace to remove, drag to
//! reorder), `^L` to collapse.

use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use tracing::warn;

use taglist::app::App;
use taglist::events::EventHandler;
use taglist::{logging, AppError, Config};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tags to start with.
    tags: Vec<String>,

    /// Configuration file to use instead of the default location.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start in editing mode.
    #[arg(short, long)]
    editable: bool,

    /// Allow more than one selected tag.
    #[arg(short, long)]
    multi_select: bool,

    /// Start collapsed.
    #[arg(long)]
    collapsed: bool,

    /// Label shown before the first tag.
    #[arg(short, long)]
    prefix: Option<String>,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Logging disabled: {e:#}");
    }

    let config = load_config(&args).map_err(|e| {
        let hint = e.suggested_action().unwrap_or_default();
        anyhow::anyhow!("{} {}", e.user_message(), hint)
    })?;
    let mut app = App::new(config, args.tags.clone());
    apply_flags(&mut app, &args);

    let result = run(&mut app);
    logging::shutdown();
    result
}

fn load_config(args: &Args) -> taglist::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using default: {}", e);
            Config::terminal()
        }),
    };
    if let Some(prefix) = &args.prefix {
        config.appearance.prefix_label = Some(prefix.clone());
    }
    config.behavior.multiple_selection |= args.multi_select;
    Ok(config)
}

fn apply_flags(app: &mut App, args: &Args) {
    let tag_list = app.tag_list_mut();
    if args.editable {
        tag_list.set_editable(true);
    }
    if args.collapsed {
        tag_list.set_collapsed(true);
    }
}

fn run(app: &mut App) -> Result<()> {
    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)
        .map_err(|e| AppError::terminal(e.to_string()))
        .context("Failed to enable mouse capture")?;

    let events = EventHandler::new();
    let result = (|| -> Result<()> {
        while !app.should_quit() {
            terminal.draw(|frame| app.view(frame))?;
            app.update(events.next()?);
        }
        Ok(())
    })();

    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        warn!("Failed to disable mouse capture: {}", e);
    }
    ratatui::restore();
    result
}
