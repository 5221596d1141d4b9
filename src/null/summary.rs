use anyhow::Result;
use polars::frame::DataFrame;

use crate::common::column;

use super::DistanceBins;

/// Probability mass of one distance interval for the real and null sets.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub bin: String,
    pub prob_real: f64,
    pub prob_nulo: f64,
}

fn mass(bins: &DistanceBins, distances: &[f64]) -> Vec<f64> {
    let mut counts = vec![0usize; bins.intervals()];
    for k in distances.iter().filter_map(|&d| bins.interval_of(d)) {
        counts[k] += 1;
    }
    let total = counts.iter().sum::<usize>().max(1) as f64;
    counts.into_iter().map(|c| c as f64 / total).collect()
}

/// Per-interval comparison of real and null distances. Values outside the bins are left out.
pub(crate) fn summarize(bins: &DistanceBins, real_km: &[f64], null_km: &[f64]) -> Vec<SummaryRow> {
    let real = mass(bins, real_km);
    let null = mass(bins, null_km);
    (0..bins.intervals())
        .map(|k| SummaryRow { bin: bins.label(k), prob_real: real[k], prob_nulo: null[k] })
        .collect()
}

pub(crate) fn summary_to_frame(rows: &[SummaryRow]) -> Result<DataFrame> {
    Ok(DataFrame::new(vec![
        column("bin", rows.iter().map(|r| r.bin.clone()).collect::<Vec<_>>()),
        column("prob_real", rows.iter().map(|r| r.prob_real).collect::<Vec<_>>()),
        column("prob_nulo", rows.iter().map(|r| r.prob_nulo).collect::<Vec<_>>()),
    ])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_sums_to_one_per_side() {
        let bins = DistanceBins::new(3.0, 1.0).unwrap();
        let rows = summarize(&bins, &[0.0, 0.5, 1.5, 2.5], &[1.0, 2.2]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].prob_real, 0.5);
        assert_eq!(rows[0].prob_nulo, 0.5);
        assert!((rows.iter().map(|r| r.prob_real).sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_values_are_left_out() {
        let bins = DistanceBins::new(1.5, 1.0).unwrap();
        let rows = summarize(&bins, &[0.5], &[0.5, 9.0]);
        assert_eq!(rows[0].prob_nulo, 1.0);
    }

    #[test]
    fn empty_side_is_all_zero() {
        let bins = DistanceBins::new(1.0, 1.0).unwrap();
        let rows = summarize(&bins, &[0.3], &[]);
        assert!(rows.iter().all(|r| r.prob_nulo == 0.0));
    }

    #[test]
    fn frame_has_summary_columns() {
        let bins = DistanceBins::new(1.0, 1.0).unwrap();
        let df = summary_to_frame(&summarize(&bins, &[0.3], &[0.4])).unwrap();
        let names = df.get_column_names().iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["bin", "prob_real", "prob_nulo"]);
    }
}
