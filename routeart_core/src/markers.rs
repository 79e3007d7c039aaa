//! Placement of evenly-spaced distance markers along a route. Markers are a
//! property of the whole route: the cumulative distance keeps running across
//! segment boundaries, so an interval can span the gap between two segments
//! transparently.

use logging_timer::time;

use crate::distance::distance_between_points_metres;
use crate::error::{Error, Result};
use crate::model::{GeoPoint, Route};
pub use crate::model::MarkerPosition;

pub const METRES_PER_KILOMETRE: f64 = 1000.0;
pub const METRES_PER_MILE: f64 = 1609.34;

/// The unit a marker interval is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Kilometers,
    Miles,
}

impl Unit {
    /// Number of metres in one of this unit.
    pub fn metres(&self) -> f64 {
        match self {
            Unit::Kilometers => METRES_PER_KILOMETRE,
            Unit::Miles => METRES_PER_MILE,
        }
    }
}

/// Walks the route in path order and emits one MarkerPosition each time the
/// running distance crosses a multiple of `interval` (expressed in `unit`).
/// The marker's coordinates and elevation are linearly interpolated between
/// the bracketing pair of points, proportionally to where the crossing falls.
///
/// The start point is never a marker, and a crossing landing exactly on the
/// final point of the route is not emitted either: a 10 km route with 1 km
/// markers gets markers at 1..=9 km. A route shorter than one interval
/// produces an empty vector. An interval that is not a positive finite
/// number is an error.
#[time]
pub fn place_markers(route: &Route, unit: Unit, interval: f64) -> Result<Vec<MarkerPosition>> {
    if !interval.is_finite() || interval <= 0.0 {
        return Err(Error::InvalidMarkerInterval(interval));
    }

    let interval_metres = interval * unit.metres();
    let mut markers = Vec::new();

    // Next multiple to emit, kept as an ordinal so the stored distance is an
    // exact product rather than an accumulated sum.
    let mut ordinal: u64 = 1;
    let mut next_metres = interval_metres;
    let mut running = 0.0;

    for (segment_index, segment) in route.segments.iter().enumerate() {
        for point_index in 1..segment.points.len() {
            let p1 = &segment.points[point_index - 1];
            let p2 = &segment.points[point_index];
            let delta = distance_between_points_metres(p1, p2);

            // A crossing strictly inside (or at the start of) this pair.
            // delta == 0 never satisfies the condition because next_metres
            // is always ahead of the running total.
            while next_metres < running + delta {
                let fraction = (next_metres - running) / delta;
                markers.push(MarkerPosition {
                    distance_metres: next_metres,
                    point: interpolate(p1, p2, fraction)?,
                    segment_index,
                    point_index: point_index - 1,
                });

                ordinal += 1;
                next_metres = interval_metres * ordinal as f64;
            }

            running += delta;
        }
    }

    Ok(markers)
}

/// Linear interpolation between two points. `fraction` is in [0, 1); 0 is
/// `p1`. Elevation is interpolated only when both ends have one, otherwise
/// the marker has no elevation. Interpolating between two in-range
/// coordinates stays in range, so the construction cannot fail in practice.
fn interpolate(p1: &GeoPoint, p2: &GeoPoint, fraction: f64) -> Result<GeoPoint> {
    let lat = p1.lat() + (p2.lat() - p1.lat()) * fraction;
    let lon = p1.lon() + (p2.lon() - p1.lon()) * fraction;

    let mut point = GeoPoint::new(lat, lon)?;
    if let (Some(e1), Some(e2)) = (p1.ele(), p2.ele()) {
        point = point.with_ele(e1 + (e2 - e1) * fraction);
    }

    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::total_distance_metres;
    use crate::model::Segment;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    /// A straight run along the equator. One degree of longitude there is
    /// about 111,195 m.
    fn equator_route(degrees: f64, steps: usize) -> Route {
        let points = (0..=steps)
            .map(|i| pt(0.0, degrees * i as f64 / steps as f64))
            .collect();
        Route {
            name: None,
            segments: vec![Segment::new(points)],
        }
    }

    #[test]
    fn non_positive_or_non_finite_intervals_are_rejected() {
        let route = equator_route(0.1, 4);
        assert!(matches!(
            place_markers(&route, Unit::Kilometers, 0.0),
            Err(Error::InvalidMarkerInterval(_))
        ));
        assert!(matches!(
            place_markers(&route, Unit::Kilometers, -2.5),
            Err(Error::InvalidMarkerInterval(_))
        ));
        assert!(matches!(
            place_markers(&route, Unit::Miles, f64::NAN),
            Err(Error::InvalidMarkerInterval(_))
        ));
    }

    #[test]
    fn route_shorter_than_one_interval_yields_no_markers() {
        // ~11 km of route, 20 km interval.
        let route = equator_route(0.1, 4);
        let markers = place_markers(&route, Unit::Kilometers, 20.0).unwrap();
        assert!(markers.is_empty());
    }

    #[test]
    fn markers_fall_on_exact_multiples_in_increasing_order() {
        // ~111 km with a 10 km interval: 11 markers, none at the start.
        let route = equator_route(1.0, 100);
        let total = total_distance_metres(&route);
        let markers = place_markers(&route, Unit::Kilometers, 10.0).unwrap();

        assert_eq!(markers.len(), (total / 10_000.0).floor() as usize);
        for (i, marker) in markers.iter().enumerate() {
            let expected = (i + 1) as f64 * 10_000.0;
            assert!((marker.distance_metres - expected).abs() < 1e-6);
        }
        for w in markers.windows(2) {
            assert!(w[1].distance_metres > w[0].distance_metres);
        }
        assert!(markers[0].distance_metres > 0.0);
    }

    #[test]
    fn nine_markers_on_a_route_just_under_ten_kilometres() {
        // ~9.5 km at 1 km intervals: markers at 1..=9 km, the start point is
        // never one.
        let route = equator_route(0.0855, 10);
        let markers = place_markers(&route, Unit::Kilometers, 1.0).unwrap();
        assert_eq!(markers.len(), 9);
        assert!((markers[0].distance_metres - 1000.0).abs() < 1e-6);
        assert!((markers[8].distance_metres - 9000.0).abs() < 1e-6);
    }

    #[test]
    fn marker_position_is_interpolated_between_the_bracketing_points() {
        // Two points 1 degree apart on the equator; an interval of 60% of
        // the total distance fits exactly once, 60% of the way along.
        let route = equator_route(1.0, 1);
        let total = total_distance_metres(&route);
        let markers =
            place_markers(&route, Unit::Kilometers, total * 0.6 / 1000.0).unwrap();

        assert_eq!(markers.len(), 1);
        let m = &markers[0];
        assert_eq!(m.segment_index, 0);
        assert_eq!(m.point_index, 0);
        assert!((m.point.lon() - 0.6).abs() < 1e-6);
        assert!(m.point.lat().abs() < 1e-9);
    }

    #[test]
    fn elevation_is_interpolated_when_both_ends_have_it() {
        let route = Route {
            name: None,
            segments: vec![Segment::new(vec![
                pt(0.0, 0.0).with_ele(100.0),
                pt(0.0, 1.0).with_ele(300.0),
            ])],
        };
        let total = total_distance_metres(&route);
        let markers =
            place_markers(&route, Unit::Kilometers, total * 0.3 / 1000.0).unwrap();

        assert_eq!(markers.len(), 3);
        assert!((markers[0].point.ele().unwrap() - 160.0).abs() < 1e-3);
        assert!((markers[1].point.ele().unwrap() - 220.0).abs() < 1e-3);
        assert!((markers[2].point.ele().unwrap() - 280.0).abs() < 1e-3);
    }

    #[test]
    fn elevation_is_absent_when_an_end_lacks_it() {
        let route = Route {
            name: None,
            segments: vec![Segment::new(vec![
                pt(0.0, 0.0).with_ele(100.0),
                pt(0.0, 1.0),
            ])],
        };
        let total = total_distance_metres(&route);
        let markers =
            place_markers(&route, Unit::Kilometers, total * 0.7 / 1000.0).unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].point.ele(), None);
    }

    #[test]
    fn intervals_span_segment_boundaries_without_resetting() {
        // Two segments of ~5.5 km each, 1 km of marker interval. The
        // cumulative distance keeps running across the boundary, so the
        // markers keep their route-wide spacing.
        let seg = |start: f64| {
            Segment::new(
                (0..=10)
                    .map(|i| pt(0.0, start + 0.05 * i as f64 / 10.0))
                    .collect(),
            )
        };
        let route = Route {
            name: None,
            segments: vec![seg(0.0), seg(0.05)],
        };

        let total = total_distance_metres(&route);
        let markers = place_markers(&route, Unit::Kilometers, 1.0).unwrap();
        assert_eq!(markers.len(), (total / 1000.0).floor() as usize);

        // At least one marker must land in the second segment.
        assert!(markers.iter().any(|m| m.segment_index == 1));
        for (i, marker) in markers.iter().enumerate() {
            let expected = (i + 1) as f64 * 1000.0;
            assert!((marker.distance_metres - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn miles_are_converted_to_metres() {
        // ~111 km is just under 70 miles; 30-mile markers fit twice.
        let route = equator_route(1.0, 50);
        let markers = place_markers(&route, Unit::Miles, 30.0).unwrap();
        assert_eq!(markers.len(), 2);
        assert!((markers[0].distance_metres - 30.0 * METRES_PER_MILE).abs() < 1e-6);
        assert!((markers[1].distance_metres - 60.0 * METRES_PER_MILE).abs() < 1e-6);
    }
}
