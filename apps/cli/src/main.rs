//! regiontree CLI: administrative-division registry to region trees.
//!
//! Converts the flat national registry of administrative-division codes
//! into one nested JSON document per top-level region.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
