pub mod clean;
pub mod null;
pub mod od;
pub mod route;
pub mod score;

use anyhow::Result;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

/// Run the stage selected on the command line.
pub fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Clean(args) => clean::run(cli, args),
        Commands::Od(args) => od::run(cli, args),
        Commands::Null(args) => null::run(cli, args),
        Commands::Route(args) => route::run(cli, args),
        Commands::Score(args) => score::run(cli, args),
    }
}

/// Install the logger. `-v` raises the default level; `RUST_LOG` wins when set.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .try_init();
}
