use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The errors this crate can raise. Only hard invariant violations are
/// errors: out-of-range coordinates, a non-positive marker interval, and
/// bounds of a point-less route. Merely suspicious data goes through the
/// validation module as advisory findings instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("latitude {0} is outside the valid range -90..=90 degrees")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside the valid range -180..=180 degrees")]
    LongitudeOutOfRange(f64),

    #[error("marker interval must be a positive number, got {0}")]
    InvalidMarkerInterval(f64),

    #[error("route contains no points, bounds are undefined")]
    EmptyRoute,

    #[error("malformed GPX: {0}")]
    MalformedGpx(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] time::error::Parse),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
