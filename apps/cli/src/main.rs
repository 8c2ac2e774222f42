//! SiteNav CLI: contextual navigation for static sites.
//!
//! Loads a CSV sitemap and prints the breadcrumb, related pages and
//! top-level links the embedded widget would show for a given page.

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
