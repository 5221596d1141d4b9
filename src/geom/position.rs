use geo::{Distance, Haversine, Point};

/// A WGS84 position. Equality is exact on both coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    #[inline] pub fn new(lat: f64, lon: f64) -> Self { Self { lat, lon } }

    /// Point in (x, y) = (lon, lat) order.
    #[inline] pub fn to_point(self) -> Point<f64> { Point::new(self.lon, self.lat) }

    /// Great-circle distance to `other` in kilometres.
    #[inline] pub fn distance_km(self, other: Position) -> f64 { haversine_km(self, other) }
}

/// Great-circle distance between two positions in kilometres.
pub(crate) fn haversine_km(a: Position, b: Position) -> f64 {
    Haversine.distance(a.to_point(), b.to_point()) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_identical_points() {
        let p = Position::new(-34.6, -58.4);
        assert_eq!(p.distance_km(p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = Position::new(-35.0, -58.4).distance_km(Position::new(-34.0, -58.4));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = Position::new(-34.61, -58.44);
        let b = Position::new(-34.55, -58.50);
        assert!((a.distance_km(b) - b.distance_km(a)).abs() < 1e-12);
    }
}
