use anyhow::Result;
use polars::frame::DataFrame;

use crate::common::{column, f64_column, optional_str_column, require_columns, str_column};
use crate::geom::Position;

use super::{Endpoint, OdPair};

/// Columns an OD table must carry to be routed or rewired.
pub(crate) const OD_POSITION_COLUMNS: [&str; 7] = [
    "id_tarjeta", "lat_origen", "lon_origen", "hora_origen", "lat_destino", "lon_destino", "hora_destino",
];

/// Build the OD table.
pub(crate) fn pairs_to_frame(pairs: &[OdPair]) -> Result<DataFrame> {
    let mut columns = vec![column("id_tarjeta", pairs.iter().map(|p| p.id_tarjeta.clone()).collect::<Vec<_>>())];
    let origins = pairs.iter().map(|p| &p.origin).collect::<Vec<_>>();
    let destinations = pairs.iter().map(|p| &p.destination).collect::<Vec<_>>();

    for (suffix, ends) in [("origen", origins), ("destino", destinations)] {
        columns.push(column(&format!("lat_{suffix}"), ends.iter().map(|e| e.position.lat).collect::<Vec<_>>()));
        columns.push(column(&format!("lon_{suffix}"), ends.iter().map(|e| e.position.lon).collect::<Vec<_>>()));
        columns.push(column(&format!("hora_{suffix}"), ends.iter().map(|e| e.hora).collect::<Vec<_>>()));
        columns.push(column(&format!("modo_{suffix}"), ends.iter().map(|e| e.modo.clone()).collect::<Vec<_>>()));
        columns.push(column(&format!("interno_{suffix}"), ends.iter().map(|e| e.interno.clone()).collect::<Vec<_>>()));
        columns.push(column(&format!("ramal_{suffix}"), ends.iter().map(|e| e.ramal.clone()).collect::<Vec<_>>()));
    }
    Ok(DataFrame::new(columns)?)
}

fn endpoints(df: &DataFrame, suffix: &str) -> Result<Vec<Option<Endpoint>>> {
    let lats = f64_column(df, &format!("lat_{suffix}"))?;
    let lons = f64_column(df, &format!("lon_{suffix}"))?;
    let hours = f64_column(df, &format!("hora_{suffix}"))?;
    let modes = optional_str_column(df, &format!("modo_{suffix}"))?;
    let vehicles = optional_str_column(df, &format!("interno_{suffix}"))?;
    let branches = optional_str_column(df, &format!("ramal_{suffix}"))?;

    Ok((0..df.height())
        .map(|i| Some(Endpoint {
            position: Position::new(lats[i]?, lons[i]?),
            hora: hours[i]?,
            modo: modes[i].clone(),
            interno: vehicles[i].clone(),
            ramal: branches[i].clone(),
        }))
        .collect())
}

/// Load OD pairs keyed by their row in `df`. Rows missing a card, coordinate or hour are skipped.
pub(crate) fn pairs_from_frame(df: &DataFrame, table: &str) -> Result<Vec<(usize, OdPair)>> {
    require_columns(df, table, &OD_POSITION_COLUMNS)?;

    let cards = str_column(df, "id_tarjeta")?;
    let origins = endpoints(df, "origen")?;
    let destinations = endpoints(df, "destino")?;

    Ok(cards.into_iter().zip(origins).zip(destinations)
        .enumerate()
        .filter_map(|(row, ((card, origin), destination))| {
            Some((row, OdPair { id_tarjeta: card?, origin: origin?, destination: destination? }))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{read_table, write_table};

    fn pair(card: &str) -> OdPair {
        OdPair {
            id_tarjeta: card.into(),
            origin: Endpoint {
                position: Position::new(-34.60, -58.40),
                hora: 7.0,
                modo: Some("COLECTIVO".into()),
                interno: Some("12".into()),
                ramal: None,
            },
            destination: Endpoint {
                position: Position::new(-34.55, -58.45),
                hora: 13.5,
                modo: Some("TREN".into()),
                interno: None,
                ramal: Some("R1".into()),
            },
        }
    }

    #[test]
    fn columns_follow_the_contract() {
        let df = pairs_to_frame(&[pair("A")]).unwrap();
        let names = df.get_column_names().iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec![
            "id_tarjeta",
            "lat_origen", "lon_origen", "hora_origen", "modo_origen", "interno_origen", "ramal_origen",
            "lat_destino", "lon_destino", "hora_destino", "modo_destino", "interno_destino", "ramal_destino",
        ]);
    }

    #[test]
    fn parquet_and_csv_round_trips() {
        let pairs = vec![pair("A"), pair("0007")];
        let dir = tempfile::tempdir().unwrap();
        for name in ["od.parquet", "od.csv"] {
            let path = dir.path().join(name);
            write_table(&mut pairs_to_frame(&pairs).unwrap(), &path).unwrap();
            let back = pairs_from_frame(&read_table(&path).unwrap(), "od").unwrap();
            assert_eq!(back, vec![(0, pairs[0].clone()), (1, pairs[1].clone())], "{name}");
        }
    }

    #[test]
    fn incomplete_rows_keep_the_indices_of_the_rest() {
        let df = DataFrame::new(vec![
            column("id_tarjeta", vec!["A", "B", "C"]),
            column("lat_origen", vec![Some(-34.6), None, Some(-34.6)]),
            column("lon_origen", vec![-58.4, -58.4, -58.4]),
            column("hora_origen", vec![7.0, 7.0, 7.0]),
            column("lat_destino", vec![-34.5, -34.5, -34.5]),
            column("lon_destino", vec![-58.5, -58.5, -58.5]),
            column("hora_destino", vec![12.0, 12.0, 12.0]),
        ]).unwrap();
        let rows = pairs_from_frame(&df, "od").unwrap().into_iter().map(|(i, _)| i).collect::<Vec<_>>();
        assert_eq!(rows, vec![0, 2]);
    }

    #[test]
    fn missing_destination_columns_are_named() {
        let df = pairs_to_frame(&[pair("A")]).unwrap().drop("lat_destino").unwrap();
        assert!(pairs_from_frame(&df, "od").unwrap_err().to_string().contains("lat_destino"));
    }
}
