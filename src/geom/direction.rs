use std::fmt;

use geo::LineString;
use serde::{Deserialize, Serialize};

/// Travel direction of a route, from the latitude of its first and last vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    SurNorte,
    NorteSur,
    Horizontal,
}

impl Direction {
    /// Direction between two latitudes. Equal latitudes are horizontal.
    pub fn from_latitudes(start: f64, end: f64) -> Self {
        if end > start { Direction::SurNorte }
        else if end < start { Direction::NorteSur }
        else { Direction::Horizontal }
    }

    /// Direction of a route. Empty lines are horizontal.
    pub fn of_line(line: &LineString<f64>) -> Self {
        match (line.0.first(), line.0.last()) {
            (Some(first), Some(last)) => Self::from_latitudes(first.y, last.y),
            _ => Direction::Horizontal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SurNorte => "sur_norte",
            Direction::NorteSur => "norte_sur",
            Direction::Horizontal => "horizontal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sur_norte" => Some(Direction::SurNorte),
            "norte_sur" => Some(Direction::NorteSur),
            "horizontal" => Some(Direction::Horizontal),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_uses_endpoints_only() {
        // Dips south in the middle but ends north of the start.
        let line = LineString::from(vec![(-58.4, -34.60), (-58.4, -34.70), (-58.3, -34.55)]);
        assert_eq!(Direction::of_line(&line), Direction::SurNorte);

        let line = LineString::from(vec![(-58.4, -34.55), (-58.3, -34.60)]);
        assert_eq!(Direction::of_line(&line), Direction::NorteSur);

        let line = LineString::from(vec![(-58.4, -34.60), (-58.3, -34.60)]);
        assert_eq!(Direction::of_line(&line), Direction::Horizontal);
    }

    #[test]
    fn names_round_trip() {
        for d in [Direction::SurNorte, Direction::NorteSur, Direction::Horizontal] {
            assert_eq!(Direction::parse(d.as_str()), Some(d));
        }
        assert_eq!(Direction::parse("este_oeste"), None);
    }
}
