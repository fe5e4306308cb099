//! Varispeed CLI - playback transport demo
//!
//! Interactive transport session over the simulated engine.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use varispeed::cli::{commands, Cli};

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Varispeed v{}", env!("CARGO_PKG_VERSION"));

    commands::run(&cli).context("transport session failed")?;
    Ok(())
}
