//! Turns engine results into display strings. Everything here is
//! presentation only; the numbers come straight from routeart_core.

use routeart_core::markers::{METRES_PER_KILOMETRE, METRES_PER_MILE};
use routeart_core::model::{Bounds, ElevationStats};
use time::Duration;

/// Formats a distance in both kilometres and miles, e.g.
/// "42.20 km (26.22 miles)".
pub fn format_distance(metres: f64) -> String {
    let km = metres / METRES_PER_KILOMETRE;
    let miles = metres / METRES_PER_MILE;
    format!("{km:.2} km ({miles:.2} miles)")
}

/// Formats an optional duration for display. Seconds are only shown for
/// durations under an hour.
pub fn format_duration(duration: Option<Duration>) -> String {
    let Some(duration) = duration else {
        return "Unknown".to_owned();
    };

    let days = duration.whole_days();
    let hours = duration.whole_hours() % 24;
    let minutes = duration.whole_minutes() % 60;
    let seconds = duration.whole_seconds() % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(pluralize(days, "day"));
    }
    if hours > 0 {
        parts.push(pluralize(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(pluralize(minutes, "minute"));
    }
    if seconds > 0 && days == 0 && hours == 0 {
        parts.push(pluralize(seconds, "second"));
    }

    if parts.is_empty() {
        return "0 seconds".to_owned();
    }

    parts.join(", ")
}

fn pluralize(n: i64, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Formats elevation statistics, or a "no data" message.
pub fn format_elevation(stats: Option<ElevationStats>) -> String {
    match stats {
        Some(stats) => format!(
            "Min: {:.1}m, Max: {:.1}m, Gain: {:.1}m, Loss: {:.1}m",
            stats.min, stats.max, stats.gain, stats.loss
        ),
        None => "No elevation data available".to_owned(),
    }
}

/// Formats geographic bounds as latitude and longitude ranges.
pub fn format_bounds(bounds: &Bounds) -> String {
    format!(
        "Latitude: {:.6}\u{b0} to {:.6}\u{b0}, Longitude: {:.6}\u{b0} to {:.6}\u{b0}",
        bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
    )
}
