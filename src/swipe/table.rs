use anyhow::Result;
use chrono::DateTime;
use polars::frame::DataFrame;

use crate::common::{column, f64_column, i64_column, optional_str_column, require_columns, str_column};

use super::SwipeRecord;

/// Columns the OD stage needs from the cleaned table.
pub(crate) const OD_SOURCE_COLUMNS: [&str; 8] = [
    "id_tarjeta", "lat", "lon", "hora", "modo", "interno_bus", "id_ramal", "etapa_red_sube",
];

/// `hora` as a timestamp on 1970-01-01.
fn hora_dt(hora: Option<f64>) -> Option<String> {
    let millis = (hora? * 3_600_000.0).round() as i64;
    DateTime::from_timestamp_millis(millis).map(|t| t.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Build the cleaned swipe table.
pub(crate) fn swipes_to_frame(swipes: &[SwipeRecord]) -> Result<DataFrame> {
    let strings = |f: fn(&SwipeRecord) -> &Option<String>| swipes.iter().map(|s| f(s).clone()).collect::<Vec<_>>();

    Ok(DataFrame::new(vec![
        column("id", strings(|s| &s.id)),
        column("id_tarjeta", swipes.iter().map(|s| s.id_tarjeta.clone()).collect::<Vec<_>>()),
        column("modo", strings(|s| &s.modo)),
        column("lat", swipes.iter().map(|s| s.lat).collect::<Vec<_>>()),
        column("lon", swipes.iter().map(|s| s.lon).collect::<Vec<_>>()),
        column("sexo", strings(|s| &s.sexo)),
        column("interno_bus", strings(|s| &s.interno_bus)),
        column("tipo_trx_tren", strings(|s| &s.tipo_trx_tren)),
        column("etapa_red_sube", swipes.iter().map(|s| s.etapa_red_sube).collect::<Vec<_>>()),
        column("id_linea", strings(|s| &s.id_linea)),
        column("id_ramal", strings(|s| &s.id_ramal)),
        column("id_tarifa", swipes.iter().map(|s| s.id_tarifa).collect::<Vec<_>>()),
        column("hora", swipes.iter().map(|s| s.hora).collect::<Vec<_>>()),
        column("hora_dt", swipes.iter().map(|s| hora_dt(s.hora)).collect::<Vec<_>>()),
    ])?)
}

/// Load swipes from a cleaned table. Rows without card or coordinates are skipped.
pub(crate) fn swipes_from_frame(df: &DataFrame) -> Result<Vec<SwipeRecord>> {
    require_columns(df, "cleaned swipes", &OD_SOURCE_COLUMNS)?;

    let cards = str_column(df, "id_tarjeta")?;
    let lats = f64_column(df, "lat")?;
    let lons = f64_column(df, "lon")?;
    let hours = f64_column(df, "hora")?;
    let stages = i64_column(df, "etapa_red_sube")?;
    let modes = str_column(df, "modo")?;
    let vehicles = str_column(df, "interno_bus")?;
    let branches = str_column(df, "id_ramal")?;
    let ids = optional_str_column(df, "id")?;
    let sexes = optional_str_column(df, "sexo")?;
    let train_trx = optional_str_column(df, "tipo_trx_tren")?;
    let lines = optional_str_column(df, "id_linea")?;
    let fares = if df.column("id_tarifa").is_ok() { i64_column(df, "id_tarifa")? } else { vec![None; df.height()] };

    let mut swipes = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let (Some(id_tarjeta), Some(lat), Some(lon)) = (cards[i].clone(), lats[i], lons[i]) else { continue };
        swipes.push(SwipeRecord {
            id: ids[i].clone(),
            id_tarjeta,
            modo: modes[i].clone(),
            lat,
            lon,
            sexo: sexes[i].clone(),
            interno_bus: vehicles[i].clone(),
            tipo_trx_tren: train_trx[i].clone(),
            etapa_red_sube: stages[i],
            id_linea: lines[i].clone(),
            id_ramal: branches[i].clone(),
            id_tarifa: fares[i],
            hora: hours[i],
        });
    }
    Ok(swipes)
}
