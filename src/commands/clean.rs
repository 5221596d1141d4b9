use anyhow::Result;

use crate::cli::{CleanArgs, Cli};
use crate::common::require_input;
use crate::io::write_table;
use crate::swipe::{read_raw_swipes, swipes_to_frame, CleanParams};

pub fn run(_cli: &Cli, args: &CleanArgs) -> Result<()> {
    require_input(&args.input, "Place the raw SUBE transactions there or pass --in.")?;

    let params = CleanParams { fare_code: args.fare_code, ..Default::default() };
    let outcome = read_raw_swipes(&args.input, &params)?;
    log::info!(
        "[clean] {} swipes kept, {} malformed rows, {} filtered out",
        outcome.records.len(), outcome.malformed, outcome.filtered
    );

    let mut df = swipes_to_frame(&outcome.records)?;
    write_table(&mut df, &args.output)?;
    if let Some(csv) = &args.csv {
        write_table(&mut df, csv)?;
    }

    log::info!("[clean] Wrote {}", args.output.display());
    Ok(())
}
