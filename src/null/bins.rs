use anyhow::{ensure, Result};

/// Fixed-width distance bins starting at zero.
///
/// Edges are `0, w, 2w, …` for every multiple strictly below `max + w`, so the last edge
/// reaches or passes the largest distance.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBins {
    edges: Vec<f64>,
}

impl DistanceBins {
    /// Maximum used when the observed maximum is zero or undefined.
    pub const FALLBACK_MAX_KM: f64 = 0.5;

    pub fn new(max_km: f64, width_km: f64) -> Result<Self> {
        ensure!(width_km.is_finite() && width_km > 0.0, "[null::bins] Bin width must be positive, got {width_km}");

        let max_km = if max_km.is_finite() && max_km > 0.0 { max_km } else { Self::FALLBACK_MAX_KM };
        let edges = (0..)
            .map(|k| k as f64 * width_km)
            .take_while(|&edge| edge < max_km + width_km)
            .collect();

        Ok(Self { edges })
    }

    /// Bins wide enough for every finite value of `distances`.
    pub fn covering(distances: &[f64], width_km: f64) -> Result<Self> {
        let max_km = distances.iter().copied().filter(|d| d.is_finite()).fold(f64::NAN, f64::max);
        Self::new(max_km, width_km)
    }

    #[inline] pub fn edges(&self) -> &[f64] { &self.edges }

    /// Number of closed intervals between consecutive edges.
    #[inline] pub fn intervals(&self) -> usize { self.edges.len().saturating_sub(1) }

    /// Index of the last edge not above `distance_km`. Distances past the last edge fall in the last bin.
    pub fn bin_of(&self, distance_km: f64) -> usize {
        self.edges.partition_point(|&edge| edge <= distance_km).saturating_sub(1)
    }

    /// Interval `(e_k, e_k+1]` holding `distance_km`, the first one closed on the left.
    /// Values outside `[e_0, e_last]` have none.
    pub fn interval_of(&self, distance_km: f64) -> Option<usize> {
        let (&first, &last) = (self.edges.first()?, self.edges.last()?);
        if !(first..=last).contains(&distance_km) || self.intervals() == 0 { return None }
        if distance_km == first { return Some(0) }
        Some(self.edges.partition_point(|&edge| edge < distance_km) - 1)
    }

    /// Display label of interval `k`.
    pub fn label(&self, k: usize) -> String {
        let (lo, hi) = (self.edges[k], self.edges[k + 1]);
        if k == 0 { format!("[{lo}, {hi}]") } else { format!("({lo}, {hi}]") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_reach_past_the_maximum() {
        let bins = DistanceBins::new(2.5, 1.0).unwrap();
        assert_eq!(bins.edges(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(bins.intervals(), 3);
    }

    #[test]
    fn zero_maximum_uses_the_fallback() {
        let bins = DistanceBins::covering(&[0.0, 0.0], 1.0).unwrap();
        assert_eq!(bins.edges(), &[0.0, 1.0]);
        assert_eq!(bins.bin_of(0.0), 0);
    }

    #[test]
    fn bin_index_counts_edges_at_or_below() {
        let bins = DistanceBins::new(2.5, 1.0).unwrap();
        assert_eq!(bins.bin_of(0.0), 0);
        assert_eq!(bins.bin_of(0.99), 0);
        assert_eq!(bins.bin_of(1.0), 1);
        assert_eq!(bins.bin_of(2.5), 2);
        assert_eq!(bins.bin_of(7.0), 3);
    }

    #[test]
    fn intervals_are_right_closed() {
        let bins = DistanceBins::new(2.5, 1.0).unwrap();
        assert_eq!(bins.interval_of(0.0), Some(0));
        assert_eq!(bins.interval_of(1.0), Some(0));
        assert_eq!(bins.interval_of(1.2), Some(1));
        assert_eq!(bins.interval_of(3.0), Some(2));
        assert_eq!(bins.interval_of(3.1), None);
        assert_eq!(bins.label(0), "[0, 1]");
        assert_eq!(bins.label(2), "(2, 3]");
    }

    #[test]
    fn width_must_be_positive() {
        assert!(DistanceBins::new(3.0, 0.0).is_err());
    }
}
