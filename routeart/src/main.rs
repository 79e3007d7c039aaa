use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use args::{parse_args, Command};
use clap::builder::styling::AnsiColor;
use env_logger::Builder;
use log::{debug, info};
use logging_timer::time;
use rayon::prelude::*;
use routeart_core::gpx_reader::read_route_from_file;
use routeart_core::markers::{place_markers, MarkerPosition, Unit};
use routeart_core::model::Route;
use routeart_core::validation::{validate_route, RouteFindings};
use std::io::Write;

mod args;
mod formatting;

use formatting::{format_bounds, format_distance, format_duration, format_elevation};

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

#[time]
fn main() -> Result<()> {
    configure_logging();
    info!("Starting {PROGRAM_NAME}");

    let args = parse_args();
    debug!("{:?}", &args);

    match args.command {
        Command::Info { files } => info_command(&files),
        Command::Validate { files } => validate_command(&files),
        Command::Markers {
            unit,
            interval,
            files,
        } => markers_command(&files, unit.into(), interval),
    }
}

/// Reads every file and prints its statistics. Each route is independent, so
/// the parsing and metric computation runs across files in parallel; output
/// stays in input order.
fn info_command(files: &[PathBuf]) -> Result<()> {
    let routes = read_routes(files);

    for (file, route) in routes {
        let route = route.with_context(|| format!("failed to read {:?}", file))?;
        print_route_info(file, &route);
    }

    Ok(())
}

fn print_route_info(file: &Path, route: &Route) {
    println!("\n=== Route Information ===");
    println!("File: {}", file.display());
    println!("Name: {}", route.name.as_deref().unwrap_or("Unnamed route"));

    println!("\n=== Route Statistics ===");
    println!("Distance: {}", format_distance(route.total_distance_metres()));
    println!("Duration: {}", format_duration(route.total_duration()));

    println!("\n=== Route Structure ===");
    println!("Segments: {}", route.segments.len());
    println!("Points: {}", route.num_points());

    println!("\n=== Elevation Profile ===");
    println!("{}", format_elevation(route.elevation_stats()));

    println!("\n=== Geographic Bounds ===");
    match route.bounds() {
        Ok(bounds) => println!("{}", format_bounds(&bounds)),
        Err(_) => println!("No points recorded"),
    }
}

/// Runs the validator over every file and prints the findings by category.
/// Findings never stop processing, but the process exits 1 if there are any.
fn validate_command(files: &[PathBuf]) -> Result<()> {
    let routes = read_routes(files);

    let mut total_findings = 0;
    for (file, route) in routes {
        let route = route.with_context(|| format!("failed to read {:?}", file))?;
        let findings = validate_route(&route);
        total_findings += findings.len();
        print_findings(file, &findings);
    }

    if total_findings > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn print_findings(file: &Path, findings: &RouteFindings) {
    println!("\n=== Route Validation Results ===");
    println!("File: {}", file.display());

    if findings.is_clean() {
        println!("\n\u{2713} Route data is valid");
        println!("No issues found");
        return;
    }

    println!("\n\u{2717} Found {} issues in route data:", findings.len());
    for (heading, list) in [
        ("Segment Issues:", &findings.structural),
        ("Coordinate Issues:", &findings.coordinates),
        ("Timestamp Issues:", &findings.timestamps),
    ] {
        if !list.is_empty() {
            println!("\n{heading}");
            for finding in list {
                println!("- {finding}");
            }
        }
    }
}

/// Computes marker positions for every file and prints them as a plain
/// table: a renderer (or a curious rider) takes it from there.
fn markers_command(files: &[PathBuf], unit: Unit, interval: f64) -> Result<()> {
    let placed: Vec<_> = files
        .par_iter()
        .map(|f| {
            let markers = read_route_from_file(f).and_then(|route| {
                let markers = place_markers(&route, unit, interval)?;
                Ok((route, markers))
            });
            (f, markers)
        })
        .collect();

    for (file, result) in placed {
        let (route, markers) =
            result.with_context(|| format!("failed to place markers for {:?}", file))?;
        print_markers(file, &route, unit, &markers);
    }

    Ok(())
}

fn print_markers(file: &Path, route: &Route, unit: Unit, markers: &[MarkerPosition]) {
    let label = match unit {
        Unit::Kilometers => "km",
        Unit::Miles => "mi",
    };

    println!("\nFile: {}", file.display());
    println!(
        "Route: {}, {}",
        route.name.as_deref().unwrap_or("Unnamed route"),
        format_distance(route.total_distance_metres())
    );

    if markers.is_empty() {
        println!("No markers: the route is shorter than one interval");
        return;
    }

    println!(
        "{:>6}  {:>13}  {:>11}  {:>12}  {:>8}  {}",
        "marker", format!("distance ({label})"), "latitude", "longitude", "ele (m)", "seg/pt"
    );
    for (i, marker) in markers.iter().enumerate() {
        let ele = marker
            .point
            .ele()
            .map(|e| format!("{e:.1}"))
            .unwrap_or_else(|| "-".to_owned());
        println!(
            "{:>6}  {:>13.2}  {:>11.6}  {:>12.6}  {:>8}  {}/{}",
            i + 1,
            marker.distance_metres / unit.metres(),
            marker.point.lat(),
            marker.point.lon(),
            ele,
            marker.segment_index,
            marker.point_index
        );
    }
}

/// Parses all the input files in parallel, keeping the input order.
fn read_routes(files: &[PathBuf]) -> Vec<(&PathBuf, routeart_core::Result<Route>)> {
    files
        .par_iter()
        .map(|f| (f, read_route_from_file(f)))
        .collect()
}

fn configure_logging() {
    let mut builder = Builder::from_default_env();

    builder.format(|buf, record| {
        let level_style = buf.default_level_style(record.level());
        let level_style = match record.level() {
            log::Level::Error => level_style.fg_color(Some(AnsiColor::Red.into())),
            log::Level::Warn => level_style.fg_color(Some(AnsiColor::Yellow.into())),
            log::Level::Info => level_style.fg_color(Some(AnsiColor::Green.into())),
            log::Level::Debug => level_style.fg_color(Some(AnsiColor::Blue.into())),
            log::Level::Trace => level_style.fg_color(Some(AnsiColor::Magenta.into())),
        };

        match (record.file(), record.line()) {
            (Some(file), Some(line)) => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#} {}/{}] {}",
                buf.timestamp(),
                record.level(),
                file,
                line,
                record.args()
            ),
            _ => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#}] {}",
                buf.timestamp(),
                record.level(),
                record.args()
            ),
        }
    });

    builder.init();
}
