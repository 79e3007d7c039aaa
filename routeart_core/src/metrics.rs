//! Aggregate metrics over a whole route. Everything here is a pure function
//! of a borrowed Route; nothing is cached and nothing is mutated, so the same
//! Route can be fed to several of these concurrently.

use time::Duration;

use crate::distance::segment_distance_metres;
use crate::error::{Error, Result};
use crate::model::{Bounds, ElevationStats, Route};

/// Returns the total length of the route in metres: the sum of each segment's
/// length. A route with no segments, or only single-point segments, has a
/// total distance of 0.
pub fn total_distance_metres(route: &Route) -> f64 {
    route.segments.iter().map(segment_distance_metres).sum()
}

/// Returns the elapsed time over the whole route: latest timestamp minus
/// earliest, across every segment. If any point lacks a timestamp the
/// duration is unknowable and `None` is returned - a route without temporal
/// data is perfectly legitimate, not an error.
pub fn total_duration(route: &Route) -> Option<Duration> {
    let mut earliest = None;
    let mut latest = None;

    for segment in &route.segments {
        for point in &segment.points {
            let time = point.time()?;
            if earliest.map_or(true, |t| time < t) {
                earliest = Some(time);
            }
            if latest.map_or(true, |t| time > t) {
                latest = Some(time);
            }
        }
    }

    match (earliest, latest) {
        (Some(min), Some(max)) => Some(max - min),
        _ => None,
    }
}

/// Returns elevation statistics over the route, or `None` if no point
/// carries an elevation at all. Min and max consider every sample present.
/// Gain and loss come from consecutive deltas within each segment; a pair
/// where either point lacks elevation breaks the delta chain for that pair
/// only, it does not zero the missing value.
pub fn elevation_stats(route: &Route) -> Option<ElevationStats> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut gain = 0.0;
    let mut loss = 0.0;
    let mut any = false;

    for segment in &route.segments {
        for (i, point) in segment.points.iter().enumerate() {
            if let Some(ele) = point.ele() {
                any = true;
                min = min.min(ele);
                max = max.max(ele);
            }

            if i == 0 {
                continue;
            }

            match (segment.points[i - 1].ele(), point.ele()) {
                (Some(prev), Some(curr)) => {
                    let delta = curr - prev;
                    if delta > 0.0 {
                        gain += delta;
                    } else {
                        loss += delta.abs();
                    }
                }
                _ => {}
            }
        }
    }

    if any {
        Some(ElevationStats {
            min,
            max,
            gain,
            loss,
        })
    } else {
        None
    }
}

/// Returns the axis-aligned bounding box over every point of the route. A
/// route containing no points at all has undefined bounds, which is an error.
pub fn bounds(route: &Route) -> Result<Bounds> {
    let mut points = route.segments.iter().flat_map(|s| s.points.iter());

    let first = points.next().ok_or(Error::EmptyRoute)?;
    let mut bounds = Bounds {
        min_lat: first.lat(),
        min_lon: first.lon(),
        max_lat: first.lat(),
        max_lon: first.lon(),
    };

    for point in points {
        bounds.min_lat = bounds.min_lat.min(point.lat());
        bounds.min_lon = bounds.min_lon.min(point.lon());
        bounds.max_lat = bounds.max_lat.max(point.lat());
        bounds.max_lon = bounds.max_lon.max(point.lon());
    }

    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeoPoint, Segment};
    use time::macros::datetime;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn total_distance_of_trivial_routes_is_zero() {
        assert_eq!(total_distance_metres(&Route::default()), 0.0);

        let route = Route {
            name: None,
            segments: vec![
                Segment::new(vec![pt(10.0, 10.0)]),
                Segment::new(vec![pt(20.0, 20.0)]),
            ],
        };
        assert_eq!(total_distance_metres(&route), 0.0);
    }

    #[test]
    fn total_distance_sums_segments_without_bridging_the_gap() {
        let seg = |lon_a: f64, lon_b: f64| {
            Segment::new(vec![pt(0.0, lon_a), pt(0.0, lon_b)])
        };

        // Two half-degree segments separated by a large gap. The gap between
        // segment ends must not be counted.
        let route = Route {
            name: None,
            segments: vec![seg(0.0, 0.5), seg(10.0, 10.5)],
        };

        let one_degree = total_distance_metres(&Route {
            name: None,
            segments: vec![seg(0.0, 1.0)],
        });

        let total = total_distance_metres(&route);
        assert!((total - one_degree).abs() < 1e-6, "got {total}");
    }

    #[test]
    fn duration_spans_min_to_max_across_all_segments() {
        let route = Route {
            name: None,
            segments: vec![
                Segment::new(vec![
                    pt(0.0, 0.0).with_time(datetime!(2024-06-01 10:00:00 UTC)),
                    pt(0.0, 0.1).with_time(datetime!(2024-06-01 10:12:00 UTC)),
                ]),
                Segment::new(vec![
                    pt(0.0, 0.2).with_time(datetime!(2024-06-01 10:20:00 UTC)),
                    pt(0.0, 0.3).with_time(datetime!(2024-06-01 10:30:00 UTC)),
                ]),
            ],
        };

        assert_eq!(total_duration(&route), Some(Duration::minutes(30)));
    }

    #[test]
    fn duration_is_unknown_if_any_point_lacks_a_timestamp() {
        let route = Route {
            name: None,
            segments: vec![Segment::new(vec![
                pt(0.0, 0.0).with_time(datetime!(2024-06-01 10:00:00 UTC)),
                pt(0.0, 0.1),
            ])],
        };

        assert_eq!(total_duration(&route), None);
        assert_eq!(total_duration(&Route::default()), None);
    }

    #[test]
    fn elevation_stats_absent_when_no_point_has_elevation() {
        let route = Route {
            name: None,
            segments: vec![Segment::new(vec![pt(0.0, 0.0), pt(0.0, 0.1)])],
        };
        assert_eq!(elevation_stats(&route), None);
    }

    #[test]
    fn elevation_gain_and_loss() {
        let route = Route {
            name: None,
            segments: vec![Segment::new(vec![
                pt(0.0, 0.0).with_ele(100.0),
                pt(0.0, 0.1).with_ele(150.0),
                pt(0.0, 0.2).with_ele(120.0),
                pt(0.0, 0.3).with_ele(180.0),
            ])],
        };

        let stats = elevation_stats(&route).unwrap();
        assert_eq!(stats.min, 100.0);
        assert_eq!(stats.max, 180.0);
        assert_eq!(stats.gain, 110.0);
        assert_eq!(stats.loss, 30.0);
        // With elevation present everywhere, gain - loss telescopes to
        // last - first.
        assert_eq!(stats.gain - stats.loss, 180.0 - 100.0);
    }

    #[test]
    fn missing_elevation_breaks_the_delta_chain_for_that_pair_only() {
        let route = Route {
            name: None,
            segments: vec![Segment::new(vec![
                pt(0.0, 0.0).with_ele(100.0),
                pt(0.0, 0.1), // no elevation: neither adjacent delta counts
                pt(0.0, 0.2).with_ele(50.0),
                pt(0.0, 0.3).with_ele(80.0),
            ])],
        };

        let stats = elevation_stats(&route).unwrap();
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.gain, 30.0);
        assert_eq!(stats.loss, 0.0);
    }

    #[test]
    fn deltas_do_not_cross_segment_boundaries() {
        let route = Route {
            name: None,
            segments: vec![
                Segment::new(vec![pt(0.0, 0.0).with_ele(500.0)]),
                Segment::new(vec![pt(0.0, 0.1).with_ele(100.0)]),
            ],
        };

        let stats = elevation_stats(&route).unwrap();
        assert_eq!(stats.gain, 0.0);
        assert_eq!(stats.loss, 0.0);
        assert_eq!(stats.min, 100.0);
        assert_eq!(stats.max, 500.0);
    }

    #[test]
    fn bounds_cover_every_point() {
        let route = Route {
            name: None,
            segments: vec![
                Segment::new(vec![pt(10.0, -20.0), pt(15.0, -25.0)]),
                Segment::new(vec![pt(-5.0, 30.0)]),
            ],
        };

        let b = bounds(&route).unwrap();
        assert_eq!(b.min_lat, -5.0);
        assert_eq!(b.max_lat, 15.0);
        assert_eq!(b.min_lon, -25.0);
        assert_eq!(b.max_lon, 30.0);
    }

    #[test]
    fn bounds_of_a_pointless_route_is_an_error() {
        let route = Route {
            name: None,
            segments: vec![Segment::default()],
        };
        assert!(matches!(bounds(&route), Err(Error::EmptyRoute)));
        assert!(matches!(bounds(&Route::default()), Err(Error::EmptyRoute)));
    }
}
