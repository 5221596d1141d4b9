use anyhow::Result;

use crate::cli::{Cli, OdArgs};
use crate::common::require_input;
use crate::io::{read_table, write_table};
use crate::od::{infer_od_pairs, pairs_to_frame, OdParams};
use crate::swipe::swipes_from_frame;

pub fn run(_cli: &Cli, args: &OdArgs) -> Result<()> {
    require_input(&args.input, "Run `transit-barrier clean` first.")?;

    let swipes = swipes_from_frame(&read_table(&args.input)?)?;
    let params = OdParams { min_gap_hours: args.min_gap_hours };
    let pairs = infer_od_pairs(&swipes, &params);
    log::info!("[od] {} OD pairs from {} swipes", pairs.len(), swipes.len());

    let mut df = pairs_to_frame(&pairs)?;
    write_table(&mut df, &args.output)?;
    if let Some(csv) = &args.csv {
        write_table(&mut df, csv)?;
    }

    log::info!("[od] Wrote {}", args.output.display());
    Ok(())
}
