// SPDX-License-Identifier: MIT OR Apache-2.0
//! The abstract 3D map controller the engine drives.
//!
//! Implementations wrap whatever actually renders the map. The engine
//! only requires the operations below; everything else about the map is
//! the embedder's business.

use crate::scene::ActiveMapObject;
use async_trait::async_trait;
use geotour_camera::Camera;
use geotour_script::{MarkerOptions, ModelOptions, PolygonOptions, PolylineOptions};
use std::time::Duration;
use thiserror::Error;

/// A failure reported by the map controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// A camera animation could not run or was interrupted abnormally.
    #[error("camera animation failed: {0}")]
    Camera(String),

    /// Adding an object failed outright.
    #[error("could not add `{id}` to the map: {reason}")]
    AddObject {
        /// The object id that failed
        id: String,
        /// What the controller reported
        reason: String,
    },

    /// The controller is not in a usable state.
    #[error("map controller unavailable: {0}")]
    Unavailable(String),
}

/// Camera and object operations of an external 3D map.
///
/// Flight methods resolve when the animation completes. Callers that
/// abandon a flight mid-air must call [`stop_camera_animation`] so the
/// map does not keep animating a dead session.
///
/// `add_*` methods return `Ok(None)` when the controller declines the
/// add (for example while the map is still initializing); that is
/// recoverable, unlike an `Err`.
///
/// [`stop_camera_animation`]: MapController::stop_camera_animation
#[async_trait]
pub trait MapController: Send + Sync {
    /// Jump the camera to a pose without animating.
    fn set_camera(&self, camera: &Camera);

    /// The current camera pose, if the map has one yet.
    fn camera(&self) -> Option<Camera>;

    /// Animate the camera to `camera` over `duration`, resolving on
    /// completion.
    async fn fly_to(&self, camera: &Camera, duration: Duration) -> Result<(), ControllerError>;

    /// Orbit the camera around `center` for `rounds` revolutions over
    /// `duration`, resolving on completion. Fractional `rounds` are
    /// partial orbits; negative values reverse direction.
    async fn fly_around(
        &self,
        center: &Camera,
        duration: Duration,
        rounds: f64,
    ) -> Result<(), ControllerError>;

    /// Halt any in-flight camera animation immediately.
    fn stop_camera_animation(&self);

    /// Add a marker to the map.
    async fn add_marker(
        &self,
        options: &MarkerOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError>;

    /// Add a polyline to the map.
    async fn add_polyline(
        &self,
        options: &PolylineOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError>;

    /// Add a polygon to the map.
    async fn add_polygon(
        &self,
        options: &PolygonOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError>;

    /// Add a 3D model to the map.
    async fn add_model(
        &self,
        options: &ModelOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError>;
}
