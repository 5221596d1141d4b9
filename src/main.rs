use anyhow::Result;
use clap::Parser;

use transit_barrier::cli::Cli;
use transit_barrier::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);
    commands::dispatch(&cli)
}
