use crate::geom::Position;
use crate::swipe::SwipeRecord;

/// One end of an inferred trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub position: Position,
    pub hora: f64,
    pub modo: Option<String>,
    pub interno: Option<String>,
    pub ramal: Option<String>,
}

impl Endpoint {
    /// Endpoint taken from an eligible swipe. Callers guarantee `hora` is present.
    pub(crate) fn from_swipe(swipe: &SwipeRecord, hora: f64) -> Self {
        Self {
            position: swipe.position(),
            hora,
            modo: swipe.modo.clone(),
            interno: swipe.interno_bus.clone(),
            ramal: swipe.id_ramal.clone(),
        }
    }
}

/// One origin-destination trip attributed to a card.
#[derive(Debug, Clone, PartialEq)]
pub struct OdPair {
    pub id_tarjeta: String,
    pub origin: Endpoint,
    pub destination: Endpoint,
}

impl OdPair {
    /// Hours elapsed between origin and destination swipes.
    #[inline] pub fn gap_hours(&self) -> f64 { self.destination.hora - self.origin.hora }

    /// Great-circle length of the trip in kilometres.
    #[inline] pub fn distance_km(&self) -> f64 { self.origin.position.distance_km(self.destination.position) }
}
