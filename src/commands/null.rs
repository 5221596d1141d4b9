use anyhow::Result;

use crate::cli::{Cli, NullArgs};
use crate::common::require_input;
use crate::io::{read_table, write_table};
use crate::null::{null_pairs_to_frame, rewire, summary_to_frame, NullParams};
use crate::od::pairs_from_frame;

pub fn run(_cli: &Cli, args: &NullArgs) -> Result<()> {
    require_input(&args.input, "Run `transit-barrier od` first.")?;

    let pairs = pairs_from_frame(&read_table(&args.input)?, "OD pairs")?
        .into_iter()
        .map(|(_, pair)| pair)
        .collect::<Vec<_>>();

    let params = NullParams {
        bin_km: args.bin_km,
        tol_bins: args.tol_bins,
        seed: args.seed,
        allow_keep: args.allow_keep,
    };
    let model = rewire(&pairs, &params)?;

    log::info!("[null] Matched {} | Unmatched {}", model.matched(), model.unmatched.len());
    if !model.unmatched.is_empty() {
        log::warn!("[null] {} origins found no compatible destination and were left out", model.unmatched.len());
    }

    write_table(&mut null_pairs_to_frame(&model.pairs)?, &args.output)?;
    write_table(&mut summary_to_frame(&model.summary)?, &args.summary)?;

    log::info!("[null] Wrote {} and {}", args.output.display(), args.summary.display());
    Ok(())
}
