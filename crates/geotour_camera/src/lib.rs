// SPDX-License-Identifier: MIT OR Apache-2.0
//! Geospatial camera model for GeoTour.
//!
//! This crate provides the camera data types shared by the script and
//! playback crates:
//! - [`LatLngAltitude`] and [`Camera`] value types
//! - Range validation (clamping and circular wrapping) producing a
//!   guaranteed-valid camera from arbitrary input
//! - Compass-direction helpers mapping headings to direction labels

pub mod camera;
pub mod compass;
pub mod validate;

pub use camera::{Camera, LatLngAltitude};
pub use compass::{cardinal_direction, compass_direction};
pub use validate::{
    to_valid_camera, to_valid_location, valid_altitude, valid_heading, valid_latitude,
    valid_longitude, valid_range, valid_roll, valid_tilt, wrap_in, wrap_in_inclusive,
    MAX_ALTITUDE_METERS, MAX_RANGE_METERS,
};
