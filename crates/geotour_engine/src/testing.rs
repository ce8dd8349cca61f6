// SPDX-License-Identifier: MIT OR Apache-2.0
//! Test doubles for the controller seam.

use crate::controller::{ControllerError, MapController};
use crate::scene::ActiveMapObject;
use async_trait::async_trait;
use geotour_camera::Camera;
use geotour_script::{MarkerOptions, ModelOptions, PolygonOptions, PolylineOptions};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// A scripted map controller that records every call in order.
///
/// Flights complete immediately unless gated with [`gate_next_flight`],
/// which hands the test a sender the flight waits on.
///
/// [`gate_next_flight`]: MockController::gate_next_flight
pub(crate) struct MockController {
    log: Mutex<Vec<String>>,
    camera: Mutex<Option<Camera>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    flight_error: Mutex<Option<String>>,
    declining: AtomicBool,
    removals: Arc<AtomicUsize>,
}

impl MockController {
    pub(crate) fn new() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            camera: Mutex::new(None),
            gate: Mutex::new(None),
            flight_error: Mutex::new(None),
            declining: AtomicBool::new(false),
            removals: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Snapshot of the calls recorded so far.
    pub(crate) fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    /// Make the next flight suspend until the returned sender fires or
    /// is dropped.
    pub(crate) fn gate_next_flight(&self) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        *self.gate.lock() = Some(receiver);
        sender
    }

    /// Make the next flight fail with a camera error.
    pub(crate) fn fail_next_flight(&self, reason: &str) {
        *self.flight_error.lock() = Some(reason.to_owned());
    }

    /// Decline every object add from now on.
    pub(crate) fn decline_adds(&self) {
        self.declining.store(true, Ordering::SeqCst);
    }

    /// How many handles have been removed.
    pub(crate) fn removals(&self) -> usize {
        self.removals.load(Ordering::SeqCst)
    }

    fn record(&self, entry: String) {
        self.log.lock().push(entry);
    }

    async fn finish_flight(&self) -> Result<(), ControllerError> {
        if let Some(reason) = self.flight_error.lock().take() {
            return Err(ControllerError::Camera(reason));
        }
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(())
    }

    fn add(&self, kind: &str, id: &str) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        self.record(format!("{kind} {id}"));
        if self.declining.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(Box::new(MockObject {
            id: id.to_owned(),
            removed: false,
            removals: Arc::clone(&self.removals),
        })))
    }
}

#[async_trait]
impl MapController for MockController {
    fn set_camera(&self, camera: &Camera) {
        self.record(format!("setCamera lat={}", camera.center.latitude));
        *self.camera.lock() = Some(*camera);
    }

    fn camera(&self) -> Option<Camera> {
        *self.camera.lock()
    }

    async fn fly_to(&self, camera: &Camera, duration: Duration) -> Result<(), ControllerError> {
        self.record(format!(
            "flyTo lat={} lng={} alt={} hdg={} tilt={} range={} dur={}ms",
            camera.center.latitude,
            camera.center.longitude,
            camera.center.altitude,
            camera.heading,
            camera.tilt,
            camera.range,
            duration.as_millis()
        ));
        self.finish_flight().await?;
        *self.camera.lock() = Some(*camera);
        Ok(())
    }

    async fn fly_around(
        &self,
        center: &Camera,
        duration: Duration,
        rounds: f64,
    ) -> Result<(), ControllerError> {
        self.record(format!(
            "flyAround lat={} lng={} dur={}ms count={}",
            center.center.latitude,
            center.center.longitude,
            duration.as_millis(),
            rounds
        ));
        self.finish_flight().await?;
        Ok(())
    }

    fn stop_camera_animation(&self) {
        self.record("stopCameraAnimation".to_owned());
    }

    async fn add_marker(
        &self,
        options: &MarkerOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        self.add("addMarker", &options.id)
    }

    async fn add_polyline(
        &self,
        options: &PolylineOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        self.add("addPolyline", &options.id)
    }

    async fn add_polygon(
        &self,
        options: &PolygonOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        self.add("addPolygon", &options.id)
    }

    async fn add_model(
        &self,
        options: &ModelOptions,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        self.add("addModel", &options.id)
    }
}

struct MockObject {
    id: String,
    removed: bool,
    removals: Arc<AtomicUsize>,
}

impl ActiveMapObject for MockObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn remove(&mut self) {
        if !self.removed {
            self.removed = true;
            self.removals.fetch_add(1, Ordering::SeqCst);
        }
    }
}
