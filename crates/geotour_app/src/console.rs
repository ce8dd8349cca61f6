// SPDX-License-Identifier: MIT OR Apache-2.0
//! A map controller that narrates to the log instead of rendering.
//!
//! Flights sleep for their duration so scenario timing feels real; object
//! adds always succeed.

use async_trait::async_trait;
use geotour_camera::{compass_direction, Camera};
use geotour_engine::{ActiveMapObject, ControllerError, MapController};
use geotour_script::{MarkerOptions, ModelOptions, PolygonOptions, PolylineOptions};
use parking_lot::Mutex;
use std::time::Duration;
use tracing::{debug, info};

/// Console-backed stand-in for a real 3D map.
#[derive(Default)]
pub struct ConsoleController {
    camera: Mutex<Option<Camera>>,
}

impl ConsoleController {
    /// Create a controller with no camera pose yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn arrive(&self, camera: &Camera) {
        debug!("camera now:\n{}", camera.to_camera_string());
        *self.camera.lock() = Some(*camera);
    }
}

#[async_trait]
impl MapController for ConsoleController {
    fn set_camera(&self, camera: &Camera) {
        let camera = camera.validated();
        info!(
            "camera set to {:.6},{:.6} facing {}",
            camera.center.latitude,
            camera.center.longitude,
            compass_direction(camera.heading)
        );
        self.arrive(&camera);
    }

    fn camera(&self) -> Option<Camera> {
        *self.camera.lock()
    }

    async fn fly_to(&self, camera: &Camera, duration: Duration) -> Result<(), ControllerError> {
        info!(
            duration_ms = duration.as_millis() as u64,
            "flying to {:.6},{:.6} facing {}",
            camera.center.latitude,
            camera.center.longitude,
            compass_direction(camera.heading)
        );
        tokio::time::sleep(duration).await;
        self.arrive(camera);
        Ok(())
    }

    async fn fly_around(
        &self,
        center: &Camera,
        duration: Duration,
        rounds: f64,
    ) -> Result<(), ControllerError> {
        info!(
            duration_ms = duration.as_millis() as u64,
            rounds,
            "orbiting {:.6},{:.6} at range {:.0} m",
            center.center.latitude,
            center.center.longitude,
            center.range
        );
        tokio::time::sleep(duration).await;
        self.arrive(center);
        Ok(())
    }

    fn stop_camera_animation(&self) {
        info!("camera animation stopped");
    }

    async fn add_marker(
        &self,
        options: &MarkerOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        info!(
            id = %options.id,
            label = %options.label,
            mode = %options.altitude_mode,
            "marker at {:.6},{:.6}",
            options.position.latitude,
            options.position.longitude
        );
        Ok(Some(ConsoleMapObject::new("marker", &options.id)))
    }

    async fn add_polyline(
        &self,
        options: &PolylineOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        info!(
            id = %options.id,
            points = options.points.len(),
            color = %options.color,
            width = options.width,
            "polyline added"
        );
        Ok(Some(ConsoleMapObject::new("polyline", &options.id)))
    }

    async fn add_polygon(
        &self,
        options: &PolygonOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        info!(
            id = %options.id,
            points = options.outer_points.len(),
            fill = %options.fill_color,
            stroke = %options.stroke_color,
            "polygon added"
        );
        Ok(Some(ConsoleMapObject::new("polygon", &options.id)))
    }

    async fn add_model(
        &self,
        options: &ModelOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        info!(
            id = %options.id,
            url = %options.url,
            "model at {:.6},{:.6}",
            options.position.latitude,
            options.position.longitude
        );
        Ok(Some(ConsoleMapObject::new("model", &options.id)))
    }
}

/// Handle for an object the console controller "added".
struct ConsoleMapObject {
    kind: &'static str,
    id: String,
    removed: bool,
}

impl ConsoleMapObject {
    fn new(kind: &'static str, id: &str) -> Box<dyn ActiveMapObject> {
        Box::new(Self {
            kind,
            id: id.to_owned(),
            removed: false,
        })
    }
}

impl ActiveMapObject for ConsoleMapObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn remove(&mut self) {
        if !self.removed {
            self.removed = true;
            info!(id = %self.id, "{} removed", self.kind);
        }
    }
}
