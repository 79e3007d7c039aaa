use time::OffsetDateTime;

use crate::error::{Error, Result};

pub type Lat = f64; // -90..90
pub type Lon = f64; // -180..180

/// A single recorded location sample. Latitude and longitude are checked at
/// construction time; elevation and timestamp are optional because many GPS
/// devices simply don't record them. Once built, a point never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    lat: Lat,
    lon: Lon,
    ele: Option<f64>,
    time: Option<OffsetDateTime>,
}

impl GeoPoint {
    /// Creates a point from a latitude and longitude in decimal degrees
    /// (WGS84). Values outside [-90, 90] / [-180, 180] are rejected.
    pub fn new(lat: Lat, lon: Lon) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(Error::LongitudeOutOfRange(lon));
        }

        Ok(Self {
            lat,
            lon,
            ele: None,
            time: None,
        })
    }

    /// Sets the elevation, in metres.
    pub fn with_ele(mut self, ele: f64) -> Self {
        self.ele = Some(ele);
        self
    }

    /// Sets the timestamp. Timestamps in a GPX file are UTC per the XSD.
    pub fn with_time(mut self, time: OffsetDateTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn lat(&self) -> Lat {
        self.lat
    }

    pub fn lon(&self) -> Lon {
        self.lon
    }

    /// Elevation in metres, if the device recorded one.
    pub fn ele(&self) -> Option<f64> {
        self.ele
    }

    /// Timestamp, if the device recorded one.
    pub fn time(&self) -> Option<OffsetDateTime> {
        self.time
    }
}

/// A contiguous, ordered run of recorded points with no recording gap. A
/// device may emit several segments per recording, e.g. when reception is
/// lost or the unit is switched off. The point order is the path order, it
/// is not sortable. An empty segment is legal (the Validator flags it).
#[derive(Debug, Clone, Default)]
pub struct Segment {
    pub points: Vec<GeoPoint>,
}

impl Segment {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A full recorded path: an optional name and one or more segments in
/// recording order. A Route is built once by the parser and treated as
/// read-only for the rest of the pipeline - metrics, validation and marker
/// placement all borrow it immutably.
#[derive(Debug, Clone, Default)]
pub struct Route {
    /// GPS name of the route, usually taken from the first track's <name>.
    pub name: Option<String>,
    /// The segments, in recording order.
    pub segments: Vec<Segment>,
}

/// The smallest axis-aligned lat-lon rectangle containing all route points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// The minimum latitude.
    pub min_lat: Lat,
    /// The minimum longitude.
    pub min_lon: Lon,
    /// The maximum latitude.
    pub max_lat: Lat,
    /// The maximum longitude.
    pub max_lon: Lon,
}

/// Elevation statistics over a whole route. Gain is the sum of the positive
/// point-to-point elevation deltas within each segment, loss the absolute sum
/// of the negative ones. Pairs where either point lacks elevation contribute
/// nothing; min and max are taken over every sample that is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationStats {
    /// Lowest elevation sample, in metres.
    pub min: f64,
    /// Highest elevation sample, in metres.
    pub max: f64,
    /// Total climb, in metres.
    pub gain: f64,
    /// Total descent, in metres (positive number).
    pub loss: f64,
}

/// A distance marker placed along the route, interpolated to fall exactly at
/// a multiple of the chosen interval. Carries everything a renderer needs to
/// draw the marker without redoing any geometry.
#[derive(Debug, Clone)]
pub struct MarkerPosition {
    /// Cumulative distance from the start of the route, in metres. Always an
    /// exact multiple of the marker interval.
    pub distance_metres: f64,
    /// The interpolated position of the marker.
    pub point: GeoPoint,
    /// Index of the segment containing the bracketing pair of points.
    pub segment_index: usize,
    /// Index within that segment of the first point of the bracketing pair.
    pub point_index: usize,
}
