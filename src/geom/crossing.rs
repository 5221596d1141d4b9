use geo::{BoundingRect, Intersects, LineString, MultiLineString, Relate};

/// DE-9IM pattern for a line/line crossing: the interiors meet in points only.
const CROSSES_LINES: &str = "0********";

/// Returns true iff `route` genuinely crosses `barrier`.
/// Touching at an endpoint or running along the barrier is not a crossing.
pub fn crosses(route: &LineString<f64>, barrier: &MultiLineString<f64>) -> bool {
    let (Some(a), Some(b)) = (route.bounding_rect(), barrier.bounding_rect()) else { return false };
    if !a.intersects(&b) { return false }

    route.relate(barrier)
        .matches(CROSSES_LINES)
        .unwrap_or(false)
}
