// SPDX-License-Identifier: MIT OR Apache-2.0
//! Range validation for camera values.
//!
//! Latitude, longitude, altitude, tilt, and range clamp to their bounds.
//! Heading and roll wrap circularly. Longitude deliberately clamps rather
//! than wraps: the discontinuity at the antimeridian is not meant to wrap
//! the way a bearing does.

use crate::camera::{Camera, LatLngAltitude};

/// Maximum camera range in meters, roughly the distance to the far side
/// of the Earth.
pub const MAX_RANGE_METERS: f64 = 63_170_000.0;

/// Maximum focal-point altitude in meters.
pub const MAX_ALTITUDE_METERS: f64 = 63_170_000.0;

/// Wrap a value into the half-open range `[lower, upper)`.
///
/// Equivalent to `lower + ((value - lower) mod span)` with floor-division
/// modulo, so 370 wraps to 10 in `[0, 360)` and -10 wraps to 350.
///
/// # Panics
///
/// Panics if `upper` is not greater than `lower`.
pub fn wrap_in(value: f64, lower: f64, upper: f64) -> f64 {
    let span = upper - lower;
    assert!(span > 0.0, "upper bound must be greater than lower bound");
    let offset = value - lower;
    lower + (offset - (offset / span).floor() * span)
}

/// Clamp a latitude into `[-90, 90]`.
pub fn valid_latitude(value: f64) -> f64 {
    value.clamp(-90.0, 90.0)
}

/// Clamp a longitude into `[-180, 180]`. No wraparound.
pub fn valid_longitude(value: f64) -> f64 {
    value.clamp(-180.0, 180.0)
}

/// Clamp an altitude into `[0, MAX_ALTITUDE_METERS]`.
pub fn valid_altitude(value: f64) -> f64 {
    value.clamp(0.0, MAX_ALTITUDE_METERS)
}

/// Wrap a value into the closed range `[lower, upper]` by repeatedly
/// adding or subtracting the span. A value already inside the range,
/// including either bound, is returned unchanged.
pub fn wrap_in_inclusive(value: f64, lower: f64, upper: f64) -> f64 {
    let span = upper - lower;
    assert!(span > 0.0, "upper bound must be greater than lower bound");
    let mut wrapped = value;
    while wrapped > upper {
        wrapped -= span;
    }
    while wrapped < lower {
        wrapped += span;
    }
    wrapped
}

/// Wrap a heading into `[0, 360)`.
pub fn valid_heading(value: f64) -> f64 {
    wrap_in(value, 0.0, 360.0)
}

/// Clamp a tilt into `[0, 90]`. Tilt does not wrap.
pub fn valid_tilt(value: f64) -> f64 {
    value.clamp(0.0, 90.0)
}

/// Wrap a roll into the closed range `[-360, 360]`. Both bounds are
/// themselves valid rolls, so exactly 360 stays 360.
pub fn valid_roll(value: f64) -> f64 {
    wrap_in_inclusive(value, -360.0, 360.0)
}

/// Clamp a range into `[0, MAX_RANGE_METERS]`. Range does not wrap.
pub fn valid_range(value: f64) -> f64 {
    value.clamp(0.0, MAX_RANGE_METERS)
}

/// Clamp every component of a location into its valid range.
pub fn to_valid_location(location: &LatLngAltitude) -> LatLngAltitude {
    LatLngAltitude {
        latitude: valid_latitude(location.latitude),
        longitude: valid_longitude(location.longitude),
        altitude: valid_altitude(location.altitude),
    }
}

/// Produce a guaranteed-valid camera from possibly-absent input.
///
/// A missing camera yields [`Camera::default`]. Otherwise every component
/// is clamped or wrapped into range. Validation is idempotent.
pub fn to_valid_camera(camera: Option<&Camera>) -> Camera {
    let Some(source) = camera else {
        return Camera::default();
    };

    Camera {
        center: to_valid_location(&source.center),
        heading: valid_heading(source.heading),
        tilt: valid_tilt(source.tilt),
        roll: valid_roll(source.roll),
        range: valid_range(source.range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_camera_yields_default() {
        assert_eq!(to_valid_camera(None), Camera::default());
    }

    #[test]
    fn heading_wraps_into_range() {
        assert_eq!(valid_heading(370.0), 10.0);
        assert_eq!(valid_heading(-10.0), 350.0);
        assert_eq!(valid_heading(360.0), 0.0);
        assert_eq!(valid_heading(0.0), 0.0);
        assert_eq!(valid_heading(720.5), 0.5);
    }

    #[test]
    fn wrap_preserves_congruence() {
        for heading in [-725.0, -360.0, -1.5, 0.0, 12.25, 359.99, 360.0, 1234.5] {
            let wrapped = wrap_in(heading, 0.0, 360.0);
            assert!((0.0..360.0).contains(&wrapped), "wrapped {heading} -> {wrapped}");
            let diff = (heading - wrapped) / 360.0;
            assert!((diff - diff.round()).abs() < 1e-9, "{heading} !== {wrapped} mod 360");
        }
    }

    #[test]
    #[should_panic(expected = "upper bound must be greater")]
    fn wrap_rejects_empty_span() {
        wrap_in(1.0, 10.0, 10.0);
    }

    #[test]
    fn roll_bounds_are_themselves_valid() {
        assert_eq!(valid_roll(360.0), 360.0);
        assert_eq!(valid_roll(-360.0), -360.0);
        assert_eq!(valid_roll(0.0), 0.0);
        assert_eq!(valid_roll(370.0), -350.0);
        assert_eq!(valid_roll(-370.0), 350.0);
    }

    #[test]
    fn longitude_clamps_instead_of_wrapping() {
        assert_eq!(valid_longitude(190.0), 180.0);
        assert_eq!(valid_longitude(-200.0), -180.0);
    }

    #[test]
    fn tilt_and_range_clamp() {
        assert_eq!(valid_tilt(120.0), 90.0);
        assert_eq!(valid_tilt(-5.0), 0.0);
        assert_eq!(valid_range(-1.0), 0.0);
        assert_eq!(valid_range(1e9), MAX_RANGE_METERS);
    }

    #[test]
    fn validation_is_idempotent() {
        let wild = Camera {
            center: LatLngAltitude::new(123.0, -567.0, -10.0),
            heading: 725.0,
            tilt: 300.0,
            range: 1e12,
            roll: 999.0,
        };
        let once = to_valid_camera(Some(&wild));
        let twice = to_valid_camera(Some(&once));
        assert_eq!(once, twice);
    }
}
