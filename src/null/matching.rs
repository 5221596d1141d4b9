use anyhow::Result;
use rand::{rngs::StdRng, seq::{IndexedRandom, SliceRandom}, SeedableRng};

use crate::geom::haversine_km;
use crate::od::OdPair;

use super::{summary::summarize, DestinationPool, DistanceBins, SummaryRow};

/// Parameters of the distance-preserving rewiring.
#[derive(Debug, Clone, PartialEq)]
pub struct NullParams {
    /// Bin width in kilometres.
    pub bin_km: f64,
    /// Maximum bin offset between a candidate and the origin's real trip.
    pub tol_bins: usize,
    pub seed: u64,
    /// Whether an origin may keep its own destination.
    pub allow_keep: bool,
}

impl Default for NullParams {
    fn default() -> Self {
        Self { bin_km: 1.0, tol_bins: 1, seed: 123, allow_keep: false }
    }
}

/// A real trip whose destination position was taken from another trip.
#[derive(Debug, Clone, PartialEq)]
pub struct NullOdPair {
    /// Origin row in the real OD set.
    pub origin_row: usize,
    /// Row whose destination was claimed.
    pub donor_row: usize,
    /// The origin's trip with the donor's destination position.
    pub pair: OdPair,
    pub distancia_km: f64,
}

/// Result of one rewiring run.
#[derive(Debug, Clone)]
pub struct NullModel {
    /// Matched trips, ordered by origin row.
    pub pairs: Vec<NullOdPair>,
    /// Origin rows left without a compatible destination.
    pub unmatched: Vec<usize>,
    pub bins: DistanceBins,
    pub summary: Vec<SummaryRow>,
}

impl NullModel {
    #[inline] pub fn matched(&self) -> usize { self.pairs.len() }
}

/// One-to-one random matching of origins to compatible destinations.
///
/// Origins are visited in seeded random order. Each claims a uniformly chosen destination
/// among those still in `pool` whose distance bin lies within `tol_bins` of its own trip's bin.
/// Returns the donor of each origin (if any) and what is left of the pool.
pub fn match_destinations(
    real: &[OdPair],
    bins: &DistanceBins,
    params: &NullParams,
    mut pool: DestinationPool,
) -> (Vec<Option<usize>>, DestinationPool) {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let real_bins = real.iter().map(|p| bins.bin_of(p.distance_km())).collect::<Vec<_>>();

    let mut order = (0..real.len()).collect::<Vec<_>>();
    order.shuffle(&mut rng);

    let mut assignment = vec![None; real.len()];
    for i in order {
        let origin = real[i].origin.position;
        let candidates = pool.iter()
            .filter(|&j| params.allow_keep || j != i)
            .filter(|&j| {
                let bin = bins.bin_of(haversine_km(origin, real[j].destination.position));
                bin.abs_diff(real_bins[i]) <= params.tol_bins
            })
            .collect::<Vec<_>>();

        let Some(&j) = candidates.choose(&mut rng) else { continue };
        pool.claim(j);
        assignment[i] = Some(j);
    }
    (assignment, pool)
}

/// Build a null OD set from `real` that approximately preserves its distance distribution.
pub fn rewire(real: &[OdPair], params: &NullParams) -> Result<NullModel> {
    let real_km = real.iter().map(OdPair::distance_km).collect::<Vec<_>>();
    let bins = DistanceBins::covering(&real_km, params.bin_km)?;

    let (assignment, pool) = match_destinations(real, &bins, params, DestinationPool::full(real.len()));
    log::debug!("[null::matching] {} destinations left unclaimed", pool.len());

    let mut pairs = Vec::with_capacity(real.len());
    let mut unmatched = Vec::new();
    for (i, donor) in assignment.into_iter().enumerate() {
        let Some(j) = donor else { unmatched.push(i); continue };
        let mut pair = real[i].clone();
        pair.destination.position = real[j].destination.position;
        let distancia_km = pair.distance_km();
        pairs.push(NullOdPair { origin_row: i, donor_row: j, pair, distancia_km });
    }

    let null_km = pairs.iter().map(|p| p.distancia_km).collect::<Vec<_>>();
    let summary = summarize(&bins, &real_km, &null_km);

    Ok(NullModel { pairs, unmatched, bins, summary })
}
