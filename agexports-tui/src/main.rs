//! AgExports TUI: explore 2011 US agricultural exports in the terminal.
//!
//! Panes:
//! 1. Categories: chips choosing the map's category
//! 2. Map: tile-grid choropleth, click or Enter to select states
//! 3. Breakdown: one donut per selected state, j/k highlights a category

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use agexports_core::data::{DatasetOrigin, LoadedDataset};
use agexports_core::{open_dataset, DashboardConfig, DashboardContext, Session};
use agexports_tui::app::AppState;
use agexports_tui::{input, ui};

#[derive(Parser)]
#[command(name = "agexports-tui", about = "US agricultural exports dashboard")]
struct Args {
    /// Config file (default: <config dir>/agexports/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset URL or local CSV path, overriding the config
    #[arg(long)]
    data: Option<String>,

    /// Serve the cached dataset without touching the network
    #[arg(long)]
    offline: bool,

    /// Refetch the dataset even if the cache is fresh
    #[arg(long)]
    force: bool,

    /// Starting category, overriding the config
    #[arg(long)]
    category: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config.resolved_cache_dir())?;

    // Load before touching the terminal so failures print normally.
    let loaded = open_dataset(&config, args.force)
        .with_context(|| format!("failed to load dataset from {}", config.source))?;
    let label = origin_label(&config, &loaded);
    tracing::info!(rows = loaded.table.len(), source = %config.source, "dataset ready");

    let ctx = DashboardContext::new(loaded.table).shared();
    let category = args.category.as_deref().unwrap_or(&config.default_category);
    let session = Session::starting_with(&ctx, category);
    let mut app = AppState::new(ctx, session, label);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms timeout for ~20 FPS tick
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<DashboardConfig> {
    let path = args.config.clone().or_else(DashboardConfig::default_path);
    let mut config = match path {
        Some(path) => DashboardConfig::load(&path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = &args.data {
        config.source = data.clone();
    }
    if args.offline {
        config.offline = true;
    }
    Ok(config)
}

/// Log to a file so the terminal stays clean. `RUST_LOG` overrides `info`.
fn init_logging(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    let path = dir.join("agexports-tui.log");
    let file = File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn origin_label(config: &DashboardConfig, loaded: &LoadedDataset) -> String {
    match &loaded.origin {
        DatasetOrigin::Cache(meta) => {
            let age = chrono::Local::now().naive_local() - meta.fetched_at;
            let suffix = if config.offline { ", offline" } else { "" };
            format!("cache ({}h old{suffix})", age.num_hours().max(0))
        }
        DatasetOrigin::Fetched(_) if config.is_remote() => "fetched".to_string(),
        DatasetOrigin::Fetched(_) => format!("file {}", config.source),
    }
}
