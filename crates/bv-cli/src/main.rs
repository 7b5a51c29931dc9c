//! CLI entry point for brickview.
//!
//! Browses the parts of a LEGO set, fetched from the Rebrickable catalog,
//! as an interactive gallery or as a one-shot listing.
//!
//! # Usage
//!
//! ```bash
//! brickview [OPTIONS] [COMMAND]
//!
//! # Interactive browser, starting at the configured default set
//! brickview browse 10497-1
//!
//! # Print the red bricks of a set
//! brickview show 10497-1 --color red --category brick
//!
//! # Same, as JSON
//! brickview show 10497-1 --color red --json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use bv_client::CatalogClient;
use bv_core::{
    Config, FilterState, GallerySummary, PartCard, ReferenceData, SearchField, SetMetadata,
    gallery, grouping,
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Browse the parts of LEGO sets from the Rebrickable catalog.
#[derive(Parser)]
#[command(name = "brickview", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute (defaults to `browse`).
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON configuration file.
    #[arg(short, long, global = true, env = "BRICKVIEW_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Rebrickable API key.
    #[arg(long, global = true, env = "REBRICKABLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Catalog base URL.
    #[arg(long, global = true, env = "BRICKVIEW_BASE_URL")]
    base_url: Option<String>,

    /// JSON file mapping category ids to names.
    #[arg(long, global = true)]
    categories: Option<Utf8PathBuf>,

    /// JSON file listing favourite sets.
    #[arg(long, global = true)]
    favourites: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Log file used while the interactive browser is running.
    ///
    /// Defaults to `brickview.log` in the system temporary directory.
    #[arg(long, global = true)]
    log_file: Option<Utf8PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Start the interactive gallery.
    Browse {
        /// Set to load first (overrides `default_set`).
        set: Option<String>,
    },

    /// Print the parts of one set and exit.
    Show {
        /// Set number, e.g. `10497-1`.
        set: String,

        /// Only colors containing this text.
        #[arg(long)]
        color: Option<String>,

        /// Only categories containing this text.
        #[arg(long)]
        category: Option<String>,

        /// Only part names containing this text.
        #[arg(long)]
        part: Option<String>,

        /// Hide variants with a lower quantity.
        #[arg(long, value_name = "N")]
        min_quantity: Option<u32>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List the favourite sets.
    Favourites,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Where log lines are written.
enum LogTarget {
    Stderr,
    File(File),
}

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
/// Noisy crates like `hyper` and `reqwest` are filtered to `warn` level.
fn init_tracing(verbose: bool, no_color: bool, target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},hyper=warn,hyper_util=warn,reqwest=warn,mio=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var_os("NO_COLOR").is_none();

    let registry = tracing_subscriber::registry().with(filter);
    match target {
        LogTarget::Stderr => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(use_ansi)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogTarget::File(file) => registry
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init(),
    }
}

fn open_log_file(path: &Utf8Path) -> color_eyre::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open log file {path}"))
}

fn default_log_path() -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(std::env::temp_dir())
        .unwrap_or_else(|_| Utf8PathBuf::from("."))
        .join("brickview.log")
}

/// Builds a [`Config`] from the optional file and CLI overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the merged
/// configuration is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(key) = cli.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        config.api.api_key = Some(key.to_owned());
    }
    if let Some(base_url) = &cli.base_url {
        config.api.base_url.clone_from(base_url);
    }
    if let Some(path) = &cli.categories {
        config.reference.categories_path = Some(path.clone());
    }
    if let Some(path) = &cli.favourites {
        config.reference.favourites_path = Some(path.clone());
    }

    config.validate()?;
    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs the interactive browser.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the TUI fails.
async fn run_browse(mut config: Config, set: Option<String>) -> color_eyre::Result<()> {
    if let Some(set) = set {
        config.default_set = Some(set);
    }
    info!(default_set = ?config.default_set, "Starting browser");

    let client = CatalogClient::from_config(&config.api)?;

    // Handle SIGTERM for graceful shutdown on Unix
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = bv_tui::run(config, client) => {
                result.map_err(|e| eyre!("TUI error: {}", e))?;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        bv_tui::run(config, client)
            .await
            .map_err(|e| eyre!("TUI error: {}", e))?;
    }

    Ok(())
}

/// Search and quantity options of `brickview show`.
#[derive(Debug, Default)]
struct ShowFilter {
    color: Option<String>,
    category: Option<String>,
    part: Option<String>,
    min_quantity: Option<u32>,
}

impl ShowFilter {
    fn to_state(&self) -> FilterState {
        let mut state = FilterState::new();
        for (field, text) in [
            (SearchField::Color, &self.color),
            (SearchField::Category, &self.category),
            (SearchField::PartName, &self.part),
        ] {
            if let Some(text) = text {
                state.set_search(field, text.as_str());
            }
        }
        if let Some(min) = self.min_quantity {
            state.set_min_quantity(min);
        }
        state
    }
}

/// Fetches one set, filters it and prints the gallery.
///
/// # Errors
///
/// Returns an error if the set cannot be loaded or output fails.
async fn run_show(
    config: &Config,
    set_num: &str,
    filter: &ShowFilter,
    json: bool,
) -> color_eyre::Result<()> {
    let reference = ReferenceData::load(&config.reference)?;
    let client = CatalogClient::from_config(&config.api)?;

    let loaded = match client.load_set(set_num.trim()).await {
        Ok(loaded) => loaded,
        Err(err) if err.http_status() == Some(404) => {
            return Err(eyre!("Set {set_num} was not found in the catalog"));
        }
        Err(err) => return Err(err).wrap_err_with(|| format!("Could not load set {set_num}")),
    };
    if let Some(page) = loaded.inventory.failed_page {
        warn!(set_num, page, "Inventory is incomplete");
    }

    let groups = grouping::group(
        loaded.inventory.records.iter().cloned(),
        &reference.categories,
    );
    let state = filter.to_state();
    let cards = gallery::render(&groups, &state);
    let summary = GallerySummary::of_cards(&cards);

    let content = if json {
        let report = ShowReport::new(&loaded.metadata, loaded.inventory.failed_page, summary, &cards);
        let mut text = serde_json::to_string_pretty(&report)
            .map_err(|e| eyre!("Failed to serialize JSON: {}", e))?;
        text.push('\n');
        text
    } else {
        render_text(&loaded.metadata, loaded.inventory.failed_page, summary, &cards)
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(content.as_bytes())?;
    Ok(())
}

/// Prints the favourite sets table.
///
/// # Errors
///
/// Returns an error if the favourites file cannot be read.
fn run_favourites(config: &Config) -> color_eyre::Result<()> {
    let reference = ReferenceData::load(&config.reference)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    for favourite in reference.favourites.iter() {
        writeln!(handle, "{:<10} {}", favourite.set_num, favourite.name)?;
    }
    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// JSON document printed by `brickview show --json`.
#[derive(Serialize)]
struct ShowReport<'a> {
    set: &'a SetMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    truncated_at_page: Option<u32>,
    summary: GallerySummary,
    parts: Vec<ShowPart<'a>>,
}

#[derive(Serialize)]
struct ShowPart<'a> {
    part_num: &'a str,
    part_name: &'a str,
    category: &'a str,
    variants: &'a [&'a bv_core::Variant],
}

impl<'a> ShowReport<'a> {
    fn new(
        set: &'a SetMetadata,
        truncated_at_page: Option<u32>,
        summary: GallerySummary,
        cards: &'a [PartCard<'a>],
    ) -> Self {
        let parts = cards
            .iter()
            .map(|card| ShowPart {
                part_num: &card.group.part_num,
                part_name: &card.group.part_name,
                category: &card.group.category,
                variants: &card.variants,
            })
            .collect();
        Self {
            set,
            truncated_at_page,
            summary,
            parts,
        }
    }
}

/// Formats the gallery as plain text.
fn render_text(
    set: &SetMetadata,
    truncated_at_page: Option<u32>,
    summary: GallerySummary,
    cards: &[PartCard<'_>],
) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    let _ = writeln!(output, "{}", set.title());
    if let Some(page) = truncated_at_page {
        let _ = writeln!(output, "Warning: inventory incomplete, page {page} failed");
    }
    let _ = writeln!(
        output,
        "{} parts, {} colors, {} pieces",
        summary.parts, summary.variants, summary.pieces
    );

    if cards.is_empty() {
        let _ = writeln!(output, "\nNo parts match.");
        return output;
    }

    for card in cards {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "{}  {}  [{}]",
            card.group.part_num, card.group.part_name, card.group.category
        );
        for variant in &card.variants {
            let _ = writeln!(
                output,
                "    {:<24} x{:<4} {:<10} {}",
                variant.color,
                variant.quantity,
                variant.element_id,
                variant.image_url.as_deref().unwrap_or("-")
            );
        }
    }

    output
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Commands::Browse { set: None });

    // 3. Initialize tracing; the browser owns the terminal, so it logs to a file
    let target = match &command {
        Commands::Browse { .. } => {
            let path = cli.log_file.clone().unwrap_or_else(default_log_path);
            LogTarget::File(open_log_file(&path)?)
        }
        Commands::Show { .. } | Commands::Favourites => LogTarget::Stderr,
    };
    init_tracing(cli.verbose, cli.no_color, target);

    // 4. Load configuration and apply overrides
    let config = build_config(&cli)?;

    // 5. Route to the command
    match command {
        Commands::Browse { set } => run_browse(config, set).await,
        Commands::Show {
            set,
            color,
            category,
            part,
            min_quantity,
            json,
        } => {
            let filter = ShowFilter {
                color,
                category,
                part,
                min_quantity,
            };
            run_show(&config, &set, &filter, json).await
        }
        Commands::Favourites => run_favourites(&config),
    }
}
