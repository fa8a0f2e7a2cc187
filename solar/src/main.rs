//! Solar asset registry CLI.
//!
//! Seeds an in-memory store from `solar.toml` and queries it through the same
//! list view pipeline the HTTP API uses.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use solar::core::summary::summarize;
use solar::core::view::{
    AssetListing, DEFAULT_PAGE_SIZE, FilterState, PageState, SortDirection, SortField, SortState,
    StatusFilter, compute_visible_page,
};
use solar::io::config::{DEFAULT_CONFIG_FILE, StoreConfig, load_config, write_config};
use solar::io::store::AssetStore;

#[derive(Parser)]
#[command(name = "solar", version, about = "Query a simulated solar asset registry")]
struct Cli {
    /// Store configuration file (missing file means defaults).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Ignore configured latency and failure injection.
    #[arg(long, global = true)]
    instant: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one page of assets as JSON.
    List {
        /// `all`, `active`, `inactive` or `maintenance`.
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Case-insensitive substring of id, name or location.
        #[arg(long, default_value = "")]
        search: String,
        /// Column to sort by (e.g. `capacity`, `installDate`).
        #[arg(long, default_value = "id")]
        sort: SortField,
        /// Sort descending instead of ascending.
        #[arg(long)]
        desc: bool,
        /// Zero-indexed page.
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Print dashboard statistics as JSON.
    Summary,
    /// Write the default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    solar::logging::init();
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::List {
            status,
            search,
            sort,
            desc,
            page,
            page_size,
        } => {
            let store = open_store(&cli.config, cli.instant)?;
            let filter = FilterState { status, search };
            let sort = SortState {
                field: sort,
                direction: if desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            };
            let page = PageState {
                index: page,
                size: page_size,
            };
            cmd_list(&store, &filter, &sort, &page).await
        }
        Command::Summary => {
            let store = open_store(&cli.config, cli.instant)?;
            cmd_summary(&store).await
        }
        Command::InitConfig { force } => cmd_init_config(&cli.config, force),
    }
}

fn open_store(config_path: &Path, instant: bool) -> Result<AssetStore> {
    let mut config = load_config(config_path)?;
    if instant {
        config = StoreConfig {
            seed_count: config.seed_count,
            rng_seed: config.rng_seed,
            ..StoreConfig::instant()
        };
    }
    info!(seed_count = config.seed_count, "seeding store");
    Ok(AssetStore::seeded(&config))
}

async fn cmd_list(
    store: &AssetStore,
    filter: &FilterState,
    sort: &SortState,
    page: &PageState,
) -> Result<()> {
    let assets = store.list().await.context("list assets")?;
    let visible = compute_visible_page(&assets, filter, sort, page);
    print_json(&AssetListing::new(visible, page, assets.len()))
}

async fn cmd_summary(store: &AssetStore) -> Result<()> {
    let assets = store.list().await.context("list assets")?;
    print_json(&summarize(&assets))
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &StoreConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{payload}");
    Ok(())
}
