// src/bin/cli.rs
use bgg_scrape::cli;
use color_eyre::eyre::eyre;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run().map_err(|e| {
        bgg_scrape::loge!("CLI: {e}");
        eyre!("{e}")
    })
}
