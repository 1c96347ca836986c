//! blockport CLI — legacy-site-to-block-markup migration tool.
//!
//! Imports legacy pages into the block markup consumed by the content
//! pipeline, and renders the decorated navigation header.

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
