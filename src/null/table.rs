use anyhow::Result;
use polars::frame::DataFrame;

use crate::common::column;
use crate::od::{pairs_to_frame, OdPair};

use super::NullOdPair;

/// Null OD table: the OD columns plus the rewired `distancia_km`.
pub(crate) fn null_pairs_to_frame(pairs: &[NullOdPair]) -> Result<DataFrame> {
    let od = pairs.iter().map(|p| p.pair.clone()).collect::<Vec<OdPair>>();
    let mut df = pairs_to_frame(&od)?;
    df.with_column(column("distancia_km", pairs.iter().map(|p| p.distancia_km).collect::<Vec<_>>()))?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::f64_column;
    use crate::null::{rewire, NullParams};
    use crate::od::{pairs_from_frame, Endpoint};
    use crate::geom::Position;

    #[test]
    fn null_table_reads_back_as_od_pairs() {
        let real = (0..4).map(|i| OdPair {
            id_tarjeta: format!("c{i}"),
            origin: Endpoint { position: Position::new(-34.6, -58.4 + i as f64 * 0.001), hora: 7.0, modo: None, interno: None, ramal: None },
            destination: Endpoint { position: Position::new(-34.59, -58.4 + i as f64 * 0.002), hora: 11.0, modo: None, interno: None, ramal: None },
        }).collect::<Vec<_>>();
        let model = rewire(&real, &NullParams::default()).unwrap();
        let df = null_pairs_to_frame(&model.pairs).unwrap();

        assert_eq!(df.height(), model.matched());
        let distances = f64_column(&df, "distancia_km").unwrap();
        let back = pairs_from_frame(&df, "null od").unwrap();
        for ((_, pair), (d, null)) in back.iter().zip(distances.iter().zip(&model.pairs)) {
            assert_eq!(pair, &null.pair);
            assert_eq!(*d, Some(null.distancia_km));
        }
    }
}
