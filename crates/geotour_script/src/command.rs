// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed commands produced by the script parser.

use crate::types::{AltitudeMode, Color};
use geotour_camera::{Camera, LatLngAltitude};
use serde::{Deserialize, Serialize};

/// Target pose and timing of a `flyTo` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyToOptions {
    /// Camera pose to fly to
    pub camera: Camera,
    /// Flight duration in milliseconds
    pub duration_ms: u64,
}

/// Orbit definition of a `flyAround` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyAroundOptions {
    /// Orbit center and initial pose
    pub center: Camera,
    /// Orbit duration in milliseconds
    pub duration_ms: u64,
    /// Number of orbits; fractional values are partial orbits, negative
    /// values reverse direction
    pub rounds: f64,
}

/// Definition of a map marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    /// Unique object id
    pub id: String,
    /// Marker position
    pub position: LatLngAltitude,
    /// Label shown next to the marker
    pub label: String,
    /// How the position's altitude is interpreted
    pub altitude_mode: AltitudeMode,
}

/// Definition of a map polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineOptions {
    /// Unique object id
    pub id: String,
    /// Vertices in order; altitudes are zero and interpreted per
    /// `altitude_mode`
    pub points: Vec<LatLngAltitude>,
    /// Line color
    pub color: Color,
    /// Line width in screen pixels
    pub width: f64,
    /// How point altitudes are interpreted
    pub altitude_mode: AltitudeMode,
}

/// Definition of a filled map polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonOptions {
    /// Unique object id
    pub id: String,
    /// Outer boundary, closed automatically; altitudes are zero and
    /// interpreted per `altitude_mode`
    pub outer_points: Vec<LatLngAltitude>,
    /// Fill color
    pub fill_color: Color,
    /// Outline color
    pub stroke_color: Color,
    /// Outline width in screen pixels
    pub stroke_width: f64,
    /// How point altitudes are interpreted
    pub altitude_mode: AltitudeMode,
}

/// Definition of a 3D model placed on the map.
///
/// The script grammar has no command for models; embedders add them
/// directly through the scene API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Unique object id
    pub id: String,
    /// Model position
    pub position: LatLngAltitude,
    /// Source url of the glTF asset
    pub url: String,
    /// Per-axis scale factors
    pub scale: [f64; 3],
    /// Orientation: heading, tilt, roll in degrees
    pub orientation: [f64; 3],
    /// How the position's altitude is interpreted
    pub altitude_mode: AltitudeMode,
}

/// One parsed invocation from an animation script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Animate the camera to a new pose
    FlyTo(FlyToOptions),
    /// Orbit the camera around a center point
    FlyAround(FlyAroundOptions),
    /// Pause the sequence
    Delay {
        /// Pause duration in milliseconds
        duration_ms: u64,
    },
    /// Show a short text message to the user
    Message(String),
    /// Add a marker to the map
    AddMarker(MarkerOptions),
    /// Add a polyline to the map
    AddPolyline(PolylineOptions),
    /// Add a polygon to the map
    AddPolygon(PolygonOptions),
}

impl Command {
    /// The command name as it appears in a script.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FlyTo(_) => "flyTo",
            Self::FlyAround(_) => "flyAround",
            Self::Delay { .. } => "delay",
            Self::Message(_) => "message",
            Self::AddMarker(_) => "addMarker",
            Self::AddPolyline(_) => "addPolyline",
            Self::AddPolygon(_) => "addPolygon",
        }
    }

    /// Whether this command moves the camera or pauses the sequence, as
    /// opposed to adding an object to the map.
    pub fn is_camera_command(&self) -> bool {
        matches!(
            self,
            Self::FlyTo(_) | Self::FlyAround(_) | Self::Delay { .. } | Self::Message(_)
        )
    }
}
