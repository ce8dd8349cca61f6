// SPDX-License-Identifier: MIT OR Apache-2.0
//! Camera and location value types.

use serde::{Deserialize, Serialize};

/// A geographic position with altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLngAltitude {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
    /// Altitude in meters above sea level
    pub altitude: f64,
}

impl LatLngAltitude {
    /// Create a position from latitude, longitude, and altitude.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// A geospatial viewpoint: focal center plus orientation and distance.
///
/// `heading` is degrees clockwise from north, `tilt` is degrees from
/// straight down (0) to the horizon (90), `range` is the distance in
/// meters from the camera to the focal center. `roll` is carried for
/// completeness but is conceptually always zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Focal center of the view
    pub center: LatLngAltitude,
    /// Heading in degrees, 0 is north
    pub heading: f64,
    /// Tilt in degrees, 0 is straight down
    pub tilt: f64,
    /// Distance from camera to focal center in meters
    pub range: f64,
    /// Roll in degrees
    pub roll: f64,
}

impl Default for Camera {
    /// The fixed default camera: centered at the origin, looking straight
    /// down from 1000 m.
    fn default() -> Self {
        Self {
            center: LatLngAltitude::default(),
            heading: 0.0,
            tilt: 0.0,
            range: 1000.0,
            roll: 0.0,
        }
    }
}

impl Camera {
    /// Create a camera with zero roll.
    pub fn new(center: LatLngAltitude, heading: f64, tilt: f64, range: f64) -> Self {
        Self {
            center,
            heading,
            tilt,
            range,
            roll: 0.0,
        }
    }

    /// Return a copy with a different focal center.
    pub fn with_center(mut self, center: LatLngAltitude) -> Self {
        self.center = center;
        self
    }

    /// Return a copy with a different heading.
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    /// Return a copy with a different tilt.
    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = tilt;
        self
    }

    /// Return a copy with a different range.
    pub fn with_range(mut self, range: f64) -> Self {
        self.range = range;
        self
    }

    /// Clamp and wrap every component into its valid range.
    ///
    /// See [`crate::validate::to_valid_camera`] for the rules.
    pub fn validated(&self) -> Camera {
        crate::validate::to_valid_camera(Some(self))
    }

    /// Render the camera as the block-style parameter report used in logs
    /// and when describing the current view to a text generator.
    ///
    /// The camera is validated first. Decimal places are fixed: six for
    /// latitude/longitude, one for altitude, zero for heading, tilt, and
    /// range.
    pub fn to_camera_string(&self) -> String {
        let camera = self.validated();
        format!(
            "camera {{\n    center = latLngAltitude {{\n        latitude = {}\n        longitude = {}\n        altitude = {}\n    }}\n    heading = {}\n    tilt = {}\n    range = {}\n}}",
            format_places(camera.center.latitude, 6),
            format_places(camera.center.longitude, 6),
            format_places(camera.center.altitude, 1),
            format_places(camera.heading, 0),
            format_places(camera.tilt, 0),
            format_places(camera.range, 0),
        )
    }
}

/// Format a value with a fixed number of decimal places. Zero decimal
/// places still prints a trailing `.0` so the output pastes back into
/// source as a float literal.
fn format_places(value: f64, places: usize) -> String {
    if places == 0 {
        format!("{value:.0}.0")
    } else {
        format!("{value:.places$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_is_origin_at_1000m() {
        let camera = Camera::default();
        assert_eq!(camera.center, LatLngAltitude::default());
        assert_eq!(camera.heading, 0.0);
        assert_eq!(camera.tilt, 0.0);
        assert_eq!(camera.roll, 0.0);
        assert_eq!(camera.range, 1000.0);
    }

    #[test]
    fn with_overrides_keep_other_fields() {
        let camera = Camera::new(LatLngAltitude::new(10.0, 20.0, 30.0), 90.0, 45.0, 500.0)
            .with_heading(180.0)
            .with_range(800.0);
        assert_eq!(camera.heading, 180.0);
        assert_eq!(camera.range, 800.0);
        assert_eq!(camera.tilt, 45.0);
        assert_eq!(camera.center.latitude, 10.0);
    }

    #[test]
    fn camera_string_uses_fixed_decimal_places() {
        let camera = Camera::new(
            LatLngAltitude::new(34.052235, -118.243685, 100.0),
            90.0,
            45.0,
            5000.0,
        );
        let report = camera.to_camera_string();
        assert!(report.contains("latitude = 34.052235"), "{report}");
        assert!(report.contains("longitude = -118.243685"), "{report}");
        assert!(report.contains("altitude = 100.0"), "{report}");
        assert!(report.contains("heading = 90.0"), "{report}");
        assert!(report.contains("range = 5000.0"), "{report}");
    }
}
