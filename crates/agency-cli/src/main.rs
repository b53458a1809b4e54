mod controller;
mod loader;
mod tui;
mod view;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use agency_client::AgencyClient;
use agency_core::SortMode;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::controller::Controller;

/// Where `browse` logs when no `--log-file` is given.
const BROWSE_LOG_FILE: &str = "agency-cli.log";

#[derive(Debug, Parser)]
#[command(name = "agency-cli")]
#[command(about = "Browse agencies grouped by niche")]
struct Cli {
    /// Override the listing API base URL (defaults to `AGENCY_API_BASE_URL`)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Append log output to this file instead of stderr (`browse` defaults to
    /// `agency-cli.log`)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive two-pane browser (default)
    Browse,
    /// Fetch once and print the rendered view
    List {
        /// Niche to select instead of the first one
        #[arg(long)]
        niche: Option<String>,
        /// Sort mode: pricing, review or latest
        #[arg(long, default_value = "pricing", value_parser = parse_sort_mode)]
        sort: SortMode,
        /// Expand the listed agency with this id
        #[arg(long)]
        expand: Option<i64>,
    },
}

fn parse_sort_mode(raw: &str) -> Result<SortMode, String> {
    raw.parse::<SortMode>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = agency_core::load_app_config()?;
    if let Some(base_url) = cli.base_url.clone() {
        config.api_base_url = base_url;
    }

    let interactive = matches!(cli.command, None | Some(Commands::Browse));
    init_tracing(&config.log_level, cli.log_file.as_deref(), interactive)?;
    tracing::debug!(?config, "configuration loaded");

    let client = AgencyClient::from_config(&config)?;

    match cli.command {
        None | Some(Commands::Browse) => {
            tokio::task::spawn_blocking(move || tui::run(client)).await?
        }
        Some(Commands::List {
            niche,
            sort,
            expand,
        }) => {
            run_list(&client, niche.as_deref(), sort, expand).await;
            Ok(())
        }
    }
}

/// Installs the `tracing` subscriber.
///
/// `RUST_LOG` wins over `log_level`.
fn init_tracing(log_level: &str, log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;

    match log_destination(log_file, interactive) {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// File to log to, or `None` for stderr. The interactive browser owns the
/// terminal, so it always logs to a file.
fn log_destination(log_file: Option<&Path>, interactive: bool) -> Option<&Path> {
    match log_file {
        Some(path) => Some(path),
        None if interactive => Some(Path::new(BROWSE_LOG_FILE)),
        None => None,
    }
}

/// Fetches once, applies the requested selection, and prints the view.
///
/// A failed fetch prints the empty view; the failure itself is only logged.
async fn run_list(client: &AgencyClient, niche: Option<&str>, sort: SortMode, expand: Option<i64>) {
    let mut controller = Controller::new();
    let outcome = loader::load_once(&mut controller, client).await;
    tracing::debug!(?outcome, records = controller.records().len(), "list load finished");

    if let Some(niche) = niche {
        controller.pick_niche(niche);
    }
    controller.set_sort_mode(sort);
    if let Some(id) = expand {
        let key = controller
            .view()
            .agencies
            .iter()
            .find(|a| a.record.id == id)
            .map(|a| a.key);
        match key {
            Some(key) => controller.toggle_agency(key),
            None => tracing::warn!(id, "no listed agency with that id to expand"),
        }
    }

    print!("{}", view::render_text(&controller.view()));
}
