//! Socks - the Visual Matching activity of the Able & Beyond Life Skills Lab.
//!
//! A terminal front end for the `matching` engine. The grid of socks is drawn
//! as text; the player types tile numbers to tap two socks at a time and find
//! the pairs.
//!
//! Logs go to a daily rolling file (see [`config`] for the directory) so they
//! never interleave with the game screen.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use matching::Catalog;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;
mod commands;
mod config;
mod render;
mod session;

use session::Session;

/// Top-level CLI arguments.
///
/// With no subcommand a game session starts on stdin/stdout.
#[derive(Parser)]
#[command(name = "socks", about = "Visual matching activity: find the sock pairs")]
struct Cli {
    /// Level to start at (defaults to `SOCKS_LEVEL`, then the catalog's first level).
    #[arg(short, long)]
    level: Option<String>,

    /// JSON catalog of pair-groups and levels (defaults to `SOCKS_CATALOG_PATH`,
    /// then the built-in sock catalog).
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the levels in the catalog and exit.
    Levels,
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = config::get_log_dir();
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&log_dir, config::LOG_FILE_PREFIX);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let catalog_path = cli.catalog.or_else(config::get_catalog_path);
    let catalog = load_catalog(catalog_path.as_deref())?;

    if let Some(Commands::Levels) = cli.command {
        for level in catalog.levels() {
            println!("{:<10} {}", level.name, level.label);
        }
        return Ok(());
    }

    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let level = cli.level.or_else(config::get_level);

    tracing::info!("Socks starting up");
    tracing::debug!("Log directory: {:?}", log_dir);

    let mut session = Session::start(catalog, level.as_deref(), rng)?;
    tracing::info!(
        session_id = session.session_id(),
        level = session.level(),
        "Game ready"
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    app::run(&mut session, stdin.lock(), &mut stdout)?;

    tracing::info!("Socks shutting down");
    Ok(())
}
