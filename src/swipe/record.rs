use crate::geom::Position;

/// Field order of a raw transaction row.
pub(crate) const RAW_COLUMNS: [&str; 13] = [
    "id", "id_tarjeta", "modo", "lat", "lon", "sexo",
    "interno_bus", "tipo_trx_tren", "etapa_red_sube",
    "id_linea", "id_ramal", "id_tarifa", "hora",
];

/// One validated card swipe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SwipeRecord {
    pub id: Option<String>,
    pub id_tarjeta: String,
    pub modo: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub sexo: Option<String>,
    pub interno_bus: Option<String>,
    pub tipo_trx_tren: Option<String>,
    pub etapa_red_sube: Option<i64>,
    pub id_linea: Option<String>,
    pub id_ramal: Option<String>,
    pub id_tarifa: Option<i64>,
    /// Hour of day, integral or fractional.
    pub hora: Option<f64>,
}

impl SwipeRecord {
    #[inline] pub fn position(&self) -> Position { Position::new(self.lat, self.lon) }

    /// Swipes on the first stage of a network trip are the only OD candidates.
    #[inline] pub fn is_od_eligible(&self) -> bool {
        self.etapa_red_sube == Some(0) && self.hora.is_some_and(f64::is_finite)
    }
}
