//! AgExports CLI: dataset, summary and figure export commands.
//!
//! Commands:
//! - `fetch`: download the dataset and store it in the cache
//! - `summary`: row count, category registry with colors, consistency report
//! - `figure`: replay interactions through a session and print plotly JSON
//! - `cache status` / `cache clear`: inspect or drop the cached dataset

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use agexports_core::data::quality::DEFAULT_TOLERANCE;
use agexports_core::data::{consistency_report, CacheStatus, ConsistencyEntry, DatasetOrigin};
use agexports_core::figure::plotly::view_json;
use agexports_core::{
    open_dataset, Category, ClickEvent, DashboardConfig, DashboardContext, DashboardEvent, HoverEvent,
    Session,
};

#[derive(Parser)]
#[command(name = "agexports", about = "US agricultural exports (2011) dashboard tools")]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalOpts {
    /// Config file (default: <config dir>/agexports/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset URL or local CSV path, overriding the config.
    #[arg(long, global = true)]
    data: Option<String>,

    /// Offline mode: serve the cached dataset, no network access.
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the dataset and store it in the cache.
    Fetch {
        /// Refetch even if the cache is fresh.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print table size, category registry and the consistency report.
    Summary {
        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Replay interactions through a session and print the figures as plotly JSON.
    Figure {
        /// Chosen category. Defaults to the config's default category.
        #[arg(long)]
        category: Option<String>,

        /// State code to click on the map. Repeat to click several.
        #[arg(long = "select", value_name = "CODE")]
        select: Vec<String>,

        /// Hover a sector: CODE:CATEGORY (e.g. CA:corn).
        #[arg(long, value_name = "CODE:CATEGORY")]
        hover: Option<String>,

        /// JSON-lines file of dashboard events, replayed after the flags above.
        #[arg(long)]
        events: Option<PathBuf>,

        /// Pretty-print the JSON.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Cache management commands.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Report whether the cached dataset is fresh.
    Status,
    /// Remove the cached dataset.
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    let config = load_config(&cli.global)?;

    match cli.command {
        Commands::Fetch { force } => run_fetch(&config, force),
        Commands::Summary { json } => run_summary(&config, json),
        Commands::Figure {
            category,
            select,
            hover,
            events,
            pretty,
        } => run_figure(&config, category, select, hover, events, pretty),
        Commands::Cache { action } => match action {
            CacheAction::Status => run_cache_status(&config),
            CacheAction::Clear => run_cache_clear(&config),
        },
    }
}

/// Logs go to stderr so stdout stays clean for JSON. `RUST_LOG` overrides `info`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(opts: &GlobalOpts) -> Result<DashboardConfig> {
    let path = opts.config.clone().or_else(DashboardConfig::default_path);
    let mut config = match path {
        Some(path) => DashboardConfig::load(&path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = &opts.data {
        config.source = data.clone();
    }
    if opts.offline {
        config.offline = true;
    }
    Ok(config)
}

fn load_context(config: &DashboardConfig, force: bool) -> Result<DashboardContext> {
    let loaded = open_dataset(config, force)
        .with_context(|| format!("failed to load dataset from {}", config.source))?;
    Ok(DashboardContext::new(loaded.table))
}

fn run_fetch(config: &DashboardConfig, force: bool) -> Result<()> {
    if config.offline {
        bail!("fetch needs the network; drop --offline");
    }
    let loaded = open_dataset(config, force)
        .with_context(|| format!("failed to fetch {}", config.source))?;

    match &loaded.origin {
        DatasetOrigin::Fetched(Some(meta)) => println!(
            "Fetched {} rows from {}\nCached at {} (hash {})",
            meta.row_count,
            meta.source,
            config.cache().data_path().display(),
            meta.content_hash
        ),
        DatasetOrigin::Fetched(None) => println!(
            "Read {} rows from {} (local files are not cached)",
            loaded.table.len(),
            config.source
        ),
        DatasetOrigin::Cache(meta) => println!(
            "Cache is fresh: {} rows fetched {} (use --force to refetch)",
            meta.row_count, meta.fetched_at
        ),
    }
    Ok(())
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    source: &'a str,
    rows: usize,
    categories: Vec<&'a Category>,
    consistency: Vec<ConsistencyEntry>,
}

fn run_summary(config: &DashboardConfig, json: bool) -> Result<()> {
    let ctx = load_context(config, false)?;
    let report = SummaryReport {
        source: &config.source,
        rows: ctx.table().len(),
        categories: ctx.registry().iter().collect(),
        consistency: consistency_report(ctx.table(), ctx.registry(), DEFAULT_TOLERANCE),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Source: {}", report.source);
    println!("Rows:   {}", report.rows);
    println!();
    println!("{:<16} {:<8} {}", "Category", "Color", "Kind");
    println!("{}", "-".repeat(36));
    for cat in &report.categories {
        let kind = if cat.aggregate { "aggregate" } else { "component" };
        println!("{:<16} {:<8} {}", cat.name, cat.color.to_hex(), kind);
    }

    let flagged: Vec<&ConsistencyEntry> = report.consistency.iter().filter(|e| !e.consistent).collect();
    println!();
    if flagged.is_empty() {
        println!("Consistency: all {} rows within tolerance", report.consistency.len());
    } else {
        println!("Consistency: {} rows exceed their total", flagged.len());
        for e in flagged {
            println!(
                "  {:<4} total {:>10.2}  components {:>10.2}  ({:.1}%)",
                e.code,
                e.total,
                e.component_sum,
                e.coverage * 100.0
            );
        }
    }
    Ok(())
}

fn run_figure(
    config: &DashboardConfig,
    category: Option<String>,
    select: Vec<String>,
    hover: Option<String>,
    events: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let ctx = load_context(config, false)?;
    let mut script: Vec<DashboardEvent> = Vec::new();
    if let Some(category) = category {
        script.push(DashboardEvent::CategoryChanged {
            category: Some(category),
        });
    }
    script.extend(
        select
            .into_iter()
            .map(|code| DashboardEvent::MapClicked(ClickEvent::on(code.to_uppercase()))),
    );
    if let Some(raw) = hover {
        script.push(DashboardEvent::PieHovered(parse_hover(&raw)?));
    }
    if let Some(path) = events {
        script.extend(read_events(&path)?);
    }

    let session = replay(&ctx, &config.default_category, script);
    let value = view_json(&session.view(&ctx));
    let out = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{out}");
    Ok(())
}

/// Run events through a fresh session starting on `start_category`.
fn replay(ctx: &DashboardContext, start_category: &str, events: Vec<DashboardEvent>) -> Session {
    let mut session = Session::starting_with(ctx, start_category);
    for event in events {
        let rerender = session.handle(ctx, event);
        tracing::debug!(?rerender, "replayed event");
    }
    session
}

/// `CODE:CATEGORY` → hover event. Codes are uppercased.
fn parse_hover(raw: &str) -> Result<HoverEvent> {
    let Some((code, category)) = raw.split_once(':') else {
        bail!("--hover expects CODE:CATEGORY, got '{raw}'");
    };
    let (code, category) = (code.trim(), category.trim());
    if code.is_empty() || category.is_empty() {
        bail!("--hover expects CODE:CATEGORY, got '{raw}'");
    }
    Ok(HoverEvent::hover(code.to_uppercase(), category))
}

/// One JSON event per line; blank lines and `#` comments are skipped.
fn read_events(path: &Path) -> Result<Vec<DashboardEvent>> {
    let text = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    parse_events(&text).with_context(|| format!("in {}", path.display()))
}

fn parse_events(text: &str) -> Result<Vec<DashboardEvent>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}: invalid event", i + 1))
        })
        .collect()
}

fn run_cache_status(config: &DashboardConfig) -> Result<()> {
    let cache = config.cache();
    let now = chrono::Local::now().naive_local();
    match cache.meta() {
        None => println!("No cached dataset in {}", cache.cache_dir().display()),
        Some(meta) => {
            let status = cache.status(&config.source, config.max_age(), now);
            let label = match status {
                CacheStatus::Fresh => "fresh",
                CacheStatus::Stale => "stale",
                CacheStatus::OtherSource => "from another source",
                CacheStatus::Missing => "missing",
            };
            println!("Cache:   {}", cache.data_path().display());
            println!("Source:  {}", meta.source);
            println!("Rows:    {}", meta.row_count);
            println!("Fetched: {}", meta.fetched_at);
            println!("Hash:    {}", meta.content_hash);
            println!("Status:  {label}");
        }
    }
    Ok(())
}

fn run_cache_clear(config: &DashboardConfig) -> Result<()> {
    let cache = config.cache();
    cache.clear().context("failed to clear cache")?;
    println!("Cleared {}", cache.cache_dir().display());
    Ok(())
}
