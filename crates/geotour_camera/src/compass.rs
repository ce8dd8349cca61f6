// SPDX-License-Identifier: MIT OR Apache-2.0
//! Heading to compass-direction labels.

/// The sixteen fine compass points, clockwise from north.
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// The eight coarse compass points, clockwise from north.
const CARDINAL_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Normalize a heading into `[0, 360)` degrees.
fn normalize(heading: f64) -> f64 {
    (heading % 360.0 + 360.0) % 360.0
}

/// Map a heading in degrees to the nearest of the sixteen compass points.
///
/// Each point covers a 22.5° arc centered on its label, so 11.24° is still
/// "N" while 11.25° becomes "NNE". Headings outside `[0, 360)` are
/// normalized first.
pub fn compass_direction(heading: f64) -> &'static str {
    let normalized = normalize(heading);
    let segment = 360.0 / COMPASS_POINTS.len() as f64;
    let index = ((normalized + segment / 2.0) / segment).floor() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Map a heading in degrees to the nearest of the eight cardinal and
/// intercardinal points, each covering a 45° arc centered on its label.
pub fn cardinal_direction(heading: f64) -> &'static str {
    let normalized = normalize(heading);
    let index = (normalized / 45.0).round() as usize % CARDINAL_POINTS.len();
    CARDINAL_POINTS[index]
}
