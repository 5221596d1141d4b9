use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};
use geo::LineString;
use polars::frame::DataFrame;
use serde_json::{json, Map, Value};

use crate::barrier::Barrier;
use crate::common::{bool_column, column, f64_column, i64_column, optional_f64_column, optional_str_column, require_columns, str_column};
use crate::geom::{Direction, Position};
use crate::io::geojson::write_lines_to_geojson_bytes;
use crate::io::wkb::{linestring_from_hex, linestring_to_hex};
use crate::od::OdPair;

/// Columns a route table must carry.
const ROUTE_COLUMNS: [&str; 8] = [
    "fila", "id_tarjeta", "hora_origen", "hora_destino", "lat_origen", "lon_origen", "lat_destino", "lon_destino",
];

/// Shortest road path of one OD row, with its direction and barrier crossings.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Row of the source OD table.
    pub fila: usize,
    pub id_tarjeta: String,
    pub hora_origen: f64,
    pub hora_destino: f64,
    pub origin: Position,
    pub destination: Position,
    /// Great-circle length of the OD pair.
    pub distancia_km: f64,
    pub geometry: LineString<f64>,
    pub direction: Direction,
    /// Crossing flag by `cruza_<barrier>` column name.
    pub crossings: BTreeMap<String, bool>,
}

impl Route {
    pub fn new(fila: usize, pair: &OdPair, geometry: LineString<f64>, barriers: &[Barrier]) -> Self {
        let crossings = barriers.iter().map(|b| (b.column(), b.crossed_by(&geometry))).collect();
        Self {
            fila,
            id_tarjeta: pair.id_tarjeta.clone(),
            hora_origen: pair.origin.hora,
            hora_destino: pair.destination.hora,
            origin: pair.origin.position,
            destination: pair.destination.position,
            distancia_km: pair.distance_km(),
            direction: Direction::of_line(&geometry),
            geometry,
            crossings,
        }
    }

    #[cfg(test)]
    pub(crate) fn for_test(geometry: LineString<f64>) -> Self {
        let first = geometry.0.first().copied().unwrap_or_default();
        let last = geometry.0.last().copied().unwrap_or_default();
        Self {
            fila: 0,
            id_tarjeta: "test".into(),
            hora_origen: 7.0,
            hora_destino: 12.0,
            origin: Position::new(first.y, first.x),
            destination: Position::new(last.y, last.x),
            distancia_km: Position::new(first.y, first.x).distance_km(Position::new(last.y, last.x)),
            direction: Direction::of_line(&geometry),
            geometry,
            crossings: BTreeMap::new(),
        }
    }
}

/// Build the route table. Every `cruza_*` column seen on any route is written, defaulting to false.
pub(crate) fn routes_to_frame(routes: &[Route]) -> Result<DataFrame> {
    let f64s = |f: fn(&Route) -> f64| routes.iter().map(f).collect::<Vec<_>>();

    let mut columns = vec![
        column("fila", routes.iter().map(|r| r.fila as u64).collect::<Vec<_>>()),
        column("id_tarjeta", routes.iter().map(|r| r.id_tarjeta.clone()).collect::<Vec<_>>()),
        column("hora_origen", f64s(|r| r.hora_origen)),
        column("hora_destino", f64s(|r| r.hora_destino)),
        column("lat_origen", f64s(|r| r.origin.lat)),
        column("lon_origen", f64s(|r| r.origin.lon)),
        column("lat_destino", f64s(|r| r.destination.lat)),
        column("lon_destino", f64s(|r| r.destination.lon)),
        column("distancia_km", f64s(|r| r.distancia_km)),
        column("direccion", routes.iter().map(|r| r.direction.as_str()).collect::<Vec<_>>()),
        column("ruta", routes.iter().map(|r| linestring_to_hex(&r.geometry)).collect::<Vec<_>>()),
    ];

    let names = routes.iter().flat_map(|r| r.crossings.keys()).collect::<BTreeSet<_>>();
    for name in names {
        let flags = routes.iter().map(|r| r.crossings.get(name).copied().unwrap_or(false)).collect::<Vec<_>>();
        columns.push(column(name, flags));
    }

    Ok(DataFrame::new(columns)?)
}

/// Load routes from a route table. Rows missing a required value are skipped.
pub(crate) fn routes_from_frame(df: &DataFrame, table: &str) -> Result<Vec<Route>> {
    require_columns(df, table, &ROUTE_COLUMNS)?;
    require_columns(df, table, &["ruta"])?;

    let filas = i64_column(df, "fila")?;
    let cards = str_column(df, "id_tarjeta")?;
    let [h0, h1, lat0, lon0, lat1, lon1] = ["hora_origen", "hora_destino", "lat_origen", "lon_origen", "lat_destino", "lon_destino"]
        .map(|name| f64_column(df, name));
    let (h0, h1, lat0, lon0, lat1, lon1) = (h0?, h1?, lat0?, lon0?, lat1?, lon1?);
    let distances = optional_f64_column(df, "distancia_km")?;
    let directions = optional_str_column(df, "direccion")?;
    let geometries = str_column(df, "ruta")?;

    let crossing_names = df.get_column_names().into_iter()
        .map(|c| c.to_string())
        .filter(|c| c.starts_with("cruza_"))
        .collect::<Vec<_>>();
    let crossing_flags = crossing_names.iter()
        .map(|name| bool_column(df, name))
        .collect::<Result<Vec<_>>>()?;

    let mut routes = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let fila = filas[i].and_then(|f| usize::try_from(f).ok());
        let (Some(fila), Some(id_tarjeta), Some(hex)) = (fila, cards[i].clone(), geometries[i].as_deref()) else { continue };
        let (Some(hora_origen), Some(hora_destino)) = (h0[i], h1[i]) else { continue };
        let (Some(lat_o), Some(lon_o), Some(lat_d), Some(lon_d)) = (lat0[i], lon0[i], lat1[i], lon1[i]) else { continue };

        let geometry = linestring_from_hex(hex)
            .with_context(|| format!("[route::table] Invalid route geometry in {table} row {i}"))?;
        let origin = Position::new(lat_o, lon_o);
        let destination = Position::new(lat_d, lon_d);

        routes.push(Route {
            fila,
            id_tarjeta,
            hora_origen,
            hora_destino,
            origin,
            destination,
            distancia_km: distances[i].unwrap_or_else(|| origin.distance_km(destination)),
            direction: directions[i].as_deref()
                .and_then(Direction::parse)
                .unwrap_or_else(|| Direction::of_line(&geometry)),
            geometry,
            crossings: crossing_names.iter().zip(&crossing_flags)
                .map(|(name, flags)| (name.clone(), flags[i]))
                .collect(),
        });
    }
    Ok(routes)
}

/// Routes as a GeoJSON FeatureCollection, one LineString feature per route.
pub(crate) fn routes_to_geojson(routes: &[Route]) -> Result<Vec<u8>> {
    let features = routes.iter()
        .map(|r| {
            let mut props = Map::new();
            props.insert("fila".into(), json!(r.fila));
            props.insert("id_tarjeta".into(), json!(r.id_tarjeta));
            props.insert("hora_origen".into(), json!(r.hora_origen));
            props.insert("hora_destino".into(), json!(r.hora_destino));
            props.insert("lat_origen".into(), json!(r.origin.lat));
            props.insert("lon_origen".into(), json!(r.origin.lon));
            props.insert("lat_destino".into(), json!(r.destination.lat));
            props.insert("lon_destino".into(), json!(r.destination.lon));
            props.insert("distancia_km".into(), json!(r.distancia_km));
            props.insert("direccion".into(), json!(r.direction.as_str()));
            for (name, crossed) in &r.crossings {
                props.insert(name.clone(), Value::Bool(*crossed));
            }
            (&r.geometry, props)
        })
        .collect::<Vec<_>>();
    write_lines_to_geojson_bytes(&features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{read_table, write_table};
    use crate::od::Endpoint;
    use geo::MultiLineString;

    fn rail() -> Barrier {
        Barrier {
            name: "San Martin".into(),
            geometry: MultiLineString::new(vec![LineString::from(vec![(-58.6, -34.6), (-58.3, -34.6)])]),
        }
    }

    fn pair(card: &str) -> OdPair {
        let end = |lat: f64, lon: f64, hora: f64| Endpoint { position: Position::new(lat, lon), hora, modo: None, interno: None, ramal: None };
        OdPair { id_tarjeta: card.into(), origin: end(-34.65, -58.45, 7.0), destination: end(-34.55, -58.44, 13.25) }
    }

    fn routes() -> Vec<Route> {
        let crossing = LineString::from(vec![(-58.45, -34.65), (-58.45, -34.55), (-58.44, -34.55)]);
        let beside = LineString::from(vec![(-58.45, -34.65), (-58.40, -34.64)]);
        vec![
            Route::new(0, &pair("0001"), crossing, &[rail()]),
            Route::new(3, &pair("0002"), beside, &[rail()]),
        ]
    }

    #[test]
    fn new_route_flags_crossings_and_direction() {
        let routes = routes();
        assert!(routes[0].crossings["cruza_san_martin"]);
        assert_eq!(routes[0].direction, Direction::SurNorte);
        assert!(!routes[1].crossings["cruza_san_martin"]);
    }

    #[test]
    fn parquet_and_csv_round_trips() {
        let routes = routes();
        let dir = tempfile::tempdir().unwrap();
        for name in ["routes.parquet", "routes.csv"] {
            let path = dir.path().join(name);
            write_table(&mut routes_to_frame(&routes).unwrap(), &path).unwrap();
            let back = routes_from_frame(&read_table(&path).unwrap(), "routes").unwrap();
            assert_eq!(back, routes, "{name}");
        }
    }

    #[test]
    fn geojson_export_carries_properties() {
        let bytes = routes_to_geojson(&routes()).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["geometry"]["type"], "LineString");
        assert_eq!(features[0]["properties"]["cruza_san_martin"], true);
        assert_eq!(features[1]["properties"]["fila"], 3);
    }

    #[test]
    fn table_without_geometry_is_rejected() {
        let df = routes_to_frame(&routes()).unwrap().drop("ruta").unwrap();
        assert!(routes_from_frame(&df, "routes").unwrap_err().to_string().contains("ruta"));
    }

    #[test]
    fn negative_row_index_is_skipped() {
        let mut df = routes_to_frame(&routes()).unwrap();
        df.with_column(column("fila", vec![-1i64, 3])).unwrap();
        let loaded = routes_from_frame(&df, "routes").unwrap();
        assert_eq!(loaded.iter().map(|r| r.fila).collect::<Vec<_>>(), vec![3]);
    }
}
