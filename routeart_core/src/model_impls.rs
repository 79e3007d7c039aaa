use time::Duration;

use crate::error::Result;
use crate::metrics;
use crate::model::{Bounds, ElevationStats, Route, Segment};

impl Route {
    /// Creates a route from the segments produced by a parser.
    pub fn new<S>(name: Option<S>, segments: Vec<Segment>) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.map(Into::into),
            segments,
        }
    }

    /// Returns the total number of points across all segments.
    pub fn num_points(&self) -> usize {
        self.segments.iter().map(|segment| segment.len()).sum()
    }

    /// Returns the total length of the route, in metres.
    pub fn total_distance_metres(&self) -> f64 {
        metrics::total_distance_metres(self)
    }

    /// Returns the elapsed time over the route, if every point has a
    /// timestamp.
    pub fn total_duration(&self) -> Option<Duration> {
        metrics::total_duration(self)
    }

    /// Returns the elevation statistics, if any point has an elevation.
    pub fn elevation_stats(&self) -> Option<ElevationStats> {
        metrics::elevation_stats(self)
    }

    /// Returns the bounding box of the route. Fails if the route has no
    /// points.
    pub fn bounds(&self) -> Result<Bounds> {
        metrics::bounds(self)
    }
}
