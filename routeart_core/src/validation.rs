//! Advisory route inspection. Everything reported here is data, not an
//! error: empty segments, suspicious coordinates and odd timestamps are all
//! legal to process, and the caller decides whether any finding is fatal.

use crate::model::Route;

/// Above this many points a segment is flagged as a performance hazard.
const LARGE_SEGMENT_POINTS: usize = 10_000;

/// Latitudes beyond this magnitude distort badly under common map
/// projections, so they get a warning.
const EXTREME_LATITUDE_DEGREES: f64 = 85.0;

/// The findings from inspecting a route, split into three independent lists
/// so a reporting layer can group them. All lists empty means a clean route.
#[derive(Debug, Clone, Default)]
pub struct RouteFindings {
    /// Structural problems: no segments, empty or single-point segments,
    /// pathologically large segments.
    pub structural: Vec<String>,
    /// Coordinate warnings, currently extreme latitudes.
    pub coordinates: Vec<String>,
    /// Timestamp problems: inconsistent presence, out-of-order, duplicates.
    pub timestamps: Vec<String>,
}

impl RouteFindings {
    pub fn is_clean(&self) -> bool {
        self.structural.is_empty() && self.coordinates.is_empty() && self.timestamps.is_empty()
    }

    /// Total number of findings across all three lists.
    pub fn len(&self) -> usize {
        self.structural.len() + self.coordinates.len() + self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }
}

/// Inspects a route and returns every finding. Never fails and never touches
/// the route: hard range invariants live in GeoPoint construction, not here.
pub fn validate_route(route: &Route) -> RouteFindings {
    RouteFindings {
        structural: check_structure(route),
        coordinates: check_coordinates(route),
        timestamps: check_timestamps(route),
    }
}

fn check_structure(route: &Route) -> Vec<String> {
    let mut findings = Vec::new();

    if route.segments.is_empty() {
        findings.push("route has no segments".to_owned());
        return findings;
    }

    for (i, segment) in route.segments.iter().enumerate() {
        match segment.len() {
            0 => findings.push(format!("segment {} has no points", i + 1)),
            1 => findings.push(format!(
                "segment {} has only one point - no route data",
                i + 1
            )),
            n if n > LARGE_SEGMENT_POINTS => findings.push(format!(
                "segment {} has {} points, which may cause performance issues",
                i + 1,
                n
            )),
            _ => {}
        }
    }

    findings
}

fn check_coordinates(route: &Route) -> Vec<String> {
    let mut findings = Vec::new();

    // Latitude and longitude ranges are enforced at GeoPoint construction,
    // so only projection-risk warnings remain to be checked.
    for (i, segment) in route.segments.iter().enumerate() {
        for (j, point) in segment.points.iter().enumerate() {
            if point.lat().abs() > EXTREME_LATITUDE_DEGREES {
                findings.push(format!(
                    "point {} in segment {} has extreme latitude ({}) which may cause issues with map projections",
                    j + 1,
                    i + 1,
                    point.lat()
                ));
            }
        }
    }

    findings
}

fn check_timestamps(route: &Route) -> Vec<String> {
    let mut findings = Vec::new();

    for (i, segment) in route.segments.iter().enumerate() {
        let timestamps: Vec<_> = segment.points.iter().filter_map(|p| p.time()).collect();
        if timestamps.is_empty() {
            continue;
        }

        if timestamps.len() < segment.len() {
            findings.push(format!(
                "segment {} has inconsistent timestamps (some points missing timestamp data)",
                i + 1
            ));
        }

        if timestamps.windows(2).any(|w| w[1] < w[0]) {
            findings.push(format!("segment {} has out-of-order timestamps", i + 1));
        }

        let mut sorted = timestamps;
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            findings.push(format!("segment {} has duplicate timestamps", i + 1));
        }
    }

    findings
}
