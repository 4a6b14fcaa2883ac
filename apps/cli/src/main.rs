//! ProfileScout CLI — website enrichment for collected GitHub profiles.
//!
//! Discovers personal websites referenced by a profile, scrapes them through
//! the configured backend, and attaches the aggregated insights to the
//! profile JSON.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
