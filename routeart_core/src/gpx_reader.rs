//! A deliberately small GPX reader: it pulls out the track structure that
//! the route model needs - <trk>, <trkseg>, <trkpt> with lat, lon, <ele> and
//! <time> - and skips everything else in the file (metadata, waypoints,
//! extensions and so on). The XSD is at
//! https://www.topografix.com/GPX/1/1/gpx.xsd

use std::path::Path;

use log::info;
use logging_timer::time;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use time::format_description::well_known;
use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::model::{GeoPoint, Route, Segment};

/// Reads a Route from a GPX file on disk.
#[time]
pub fn read_route_from_file<P: AsRef<Path>>(input_file: P) -> Result<Route> {
    let input_file = input_file.as_ref();
    info!("Reading GPX file {:?}", input_file);
    let contents = std::fs::read(input_file)?;
    read_route_from_slice(&contents)
}

/// Reads a Route from in-memory GPX data.
pub fn read_route_from_slice(data: &[u8]) -> Result<Route> {
    let xml_reader = Reader::from_reader(data);
    read_route_from_reader(xml_reader)
}

fn read_route_from_reader(mut xml_reader: Reader<&[u8]>) -> Result<Route> {
    let mut name: Option<String> = None;
    let mut segments: Vec<Segment> = Vec::new();
    let mut saw_gpx = false;

    loop {
        match xml_reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"gpx" => {
                    saw_gpx = true;
                }
                b"trk" => {
                    parse_track(&mut xml_reader, &mut name, &mut segments)?;
                }
                _ => {
                    // Metadata, waypoints, routes: not track data, skip the
                    // whole subtree.
                    xml_reader.read_to_end(e.name())?;
                }
            },
            Ok(Event::Eof) => {
                if !saw_gpx {
                    return Err(Error::MalformedGpx("no <gpx> element found".to_owned()));
                }
                info!(
                    "Parsed route {:?} with {} segments",
                    name,
                    segments.len()
                );
                return Ok(Route::new(name, segments));
            }
            Err(e) => {
                return Err(Error::MalformedGpx(format!(
                    "error at position {}: {:?}",
                    xml_reader.error_position(),
                    e
                )))
            }
            _ => (),
        }
    }
}

fn parse_track(
    xml_reader: &mut Reader<&[u8]>,
    route_name: &mut Option<String>,
    segments: &mut Vec<Segment>,
) -> Result<()> {
    loop {
        match xml_reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"name" => {
                    let name = read_inner_as_string(xml_reader)?;
                    // The first named track names the route.
                    if route_name.is_none() {
                        *route_name = Some(name);
                    }
                }
                b"trkseg" => {
                    segments.push(parse_track_segment(xml_reader)?);
                }
                _ => {
                    xml_reader.read_to_end(e.name())?;
                }
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"trk" => return Ok(()),
                _ => {}
            },
            // Ignore spurious Event::Text, they are usually newlines.
            Ok(Event::Text(_)) | Ok(Event::Empty(_)) => {}
            e => {
                return Err(Error::MalformedGpx(format!(
                    "unexpected element in <trk>: {:?}",
                    e
                )))
            }
        }
    }
}

fn parse_track_segment(xml_reader: &mut Reader<&[u8]>) -> Result<Segment> {
    let mut segment = Segment::default();

    loop {
        match xml_reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"trkpt" => {
                    segment.points.push(parse_trackpoint(&e, xml_reader)?);
                }
                _ => {
                    xml_reader.read_to_end(e.name())?;
                }
            },
            // A trackpoint with no children, e.g. <trkpt lat=".." lon=".."/>
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"trkpt" {
                    let lat = read_attribute_as_f64(&e, "lat")?;
                    let lon = read_attribute_as_f64(&e, "lon")?;
                    segment.points.push(GeoPoint::new(lat, lon)?);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"trkseg" => return Ok(segment),
                _ => {}
            },
            Ok(Event::Text(_)) => {}
            e => {
                return Err(Error::MalformedGpx(format!(
                    "unexpected element in <trkseg>: {:?}",
                    e
                )))
            }
        }
    }
}

fn parse_trackpoint(start: &BytesStart<'_>, xml_reader: &mut Reader<&[u8]>) -> Result<GeoPoint> {
    let lat = read_attribute_as_f64(start, "lat")?;
    let lon = read_attribute_as_f64(start, "lon")?;
    let mut ele = None;
    let mut time = None;

    loop {
        match xml_reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"ele" => {
                    ele = Some(read_inner_as_f64(xml_reader)?);
                }
                b"time" => {
                    time = Some(read_inner_as_time(xml_reader)?);
                }
                _ => {
                    // hdop, extensions and friends.
                    xml_reader.read_to_end(e.name())?;
                }
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"trkpt" => {
                    let mut point = GeoPoint::new(lat, lon)?;
                    if let Some(ele) = ele {
                        point = point.with_ele(ele);
                    }
                    if let Some(time) = time {
                        point = point.with_time(time);
                    }
                    return Ok(point);
                }
                _ => {}
            },
            Ok(Event::Text(_)) | Ok(Event::Empty(_)) => {}
            e => {
                return Err(Error::MalformedGpx(format!(
                    "unexpected element in <trkpt>: {:?}",
                    e
                )))
            }
        }
    }
}

fn read_attribute_as_f64(e: &BytesStart<'_>, name: &str) -> Result<f64> {
    let attr = e.try_get_attribute(name)?.ok_or_else(|| {
        Error::MalformedGpx(format!("<trkpt> is missing the '{name}' attribute"))
    })?;
    let value = attr.unescape_value()?;
    value
        .parse()
        .map_err(|_| Error::MalformedGpx(format!("could not parse '{value}' as a number")))
}

fn read_inner_as_string(xml_reader: &mut Reader<&[u8]>) -> Result<String> {
    match xml_reader.read_event() {
        Ok(Event::Text(text)) => Ok(text.unescape()?.into_owned()),
        e => Err(Error::MalformedGpx(format!(
            "expected text content, got {:?}",
            e
        ))),
    }
}

fn read_inner_as_f64(xml_reader: &mut Reader<&[u8]>) -> Result<f64> {
    let text = read_inner_as_string(xml_reader)?;
    text.parse()
        .map_err(|_| Error::MalformedGpx(format!("could not parse '{text}' as a number")))
}

fn read_inner_as_time(xml_reader: &mut Reader<&[u8]>) -> Result<OffsetDateTime> {
    let text = read_inner_as_string(xml_reader)?;
    Ok(OffsetDateTime::parse(&text, &well_known::Rfc3339)?)
}
