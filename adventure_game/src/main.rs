//! Adventure - Text adventure with turn-based combat
//!
//! Game data (locations, weapons, armor and creatures) is read from a data
//! directory when one is given, otherwise the bundled catalog is used.
//! Characters are saved to a row file that is created on first run.

mod app;
mod console;
mod creation;
mod flavor;
mod prompt;
mod ui;

use adventure_core::store::{PlayerStore, DEFAULT_PLAYERS, FILE_DEFAULT_PLAYERS};
use adventure_core::{default_constants, load_constants, Catalog};
use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use console::Console;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "adventure")]
#[command(author, version, about = "A text adventure with turn-based combat", long_about = None)]
struct Args {
    /// Directory holding locations.csv, weapons.csv, armors.csv and creatures.csv
    #[arg(short = 'd', long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Game constants file (TOML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Where characters are saved
    #[arg(short = 's', long = "save-file", default_value = "players.csv")]
    save_file: PathBuf,

    /// Seed for reproducible fights
    #[arg(long = "seed")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging();

    let catalog = match &args.data_dir {
        Some(dir) => Catalog::load(dir)
            .with_context(|| format!("Failed to load game data from {}", dir.display()))?,
        None => Catalog::builtin().context("Bundled game data is invalid")?,
    };

    let constants = match &args.config {
        Some(path) => load_constants(path)
            .with_context(|| format!("Failed to load constants from {}", path.display()))?,
        None => default_constants(),
    };

    let template = save_template(args.data_dir.as_deref())?;
    let store = PlayerStore::open(&args.save_file, &template, &catalog)
        .with_context(|| format!("Failed to open save file {}", args.save_file.display()))?;

    let rng = match args.seed {
        Some(seed) => {
            tracing::info!("Using seed {}", seed);
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::seed_from_u64(rand::random()),
    };

    let mut app = App::new(catalog, constants, store, Console::stdio(), rng);
    app.run()
}

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise
fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Template for a fresh save file, taken from the data directory if it has one
fn save_template(data_dir: Option<&Path>) -> Result<String> {
    let Some(path) = data_dir
        .map(|dir| dir.join(FILE_DEFAULT_PLAYERS))
        .filter(|path| path.exists())
    else {
        return Ok(DEFAULT_PLAYERS.to_string());
    };
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))
}
