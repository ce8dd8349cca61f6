// SPDX-License-Identifier: MIT OR Apache-2.0
//! Executable animation steps.
//!
//! Camera and timing commands become [`AnimationStep`] values; `execute`
//! suspends until the step is done or the session is cancelled. Object
//! commands never become steps, the player applies those directly.

use crate::controller::{ControllerError, MapController};
use crate::player::SessionEvent;
use serde::{Deserialize, Serialize};
use geotour_camera::Camera;
use geotour_script::Command;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// Why a step stopped short of completing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The session was cancelled while the step was suspended. This is
    /// the normal teardown path, not a failure.
    #[error("step cancelled")]
    Cancelled,

    /// The controller failed; the sequence aborts at this step.
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// What a step needs from its surrounding session.
pub struct StepContext<'a> {
    /// The map being driven
    pub controller: &'a dyn MapController,
    /// Sink for user-facing messages
    pub events: &'a mpsc::UnboundedSender<SessionEvent>,
    /// Cancellation signal; flips to true at most once per session
    pub cancel: &'a mut watch::Receiver<bool>,
}

/// One time-ordered action of an animation sequence.
///
/// Camera poses are validated at construction, so a step always holds
/// in-range parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimationStep {
    /// Fly the camera to a pose
    FlyTo {
        /// Validated target pose
        camera: Camera,
        /// Flight duration
        duration: Duration,
    },
    /// Orbit the camera around a center pose
    FlyAround {
        /// Validated orbit center and initial pose
        center: Camera,
        /// Orbit duration
        duration: Duration,
        /// Revolutions; fractional or negative allowed
        rounds: f64,
    },
    /// Pause the sequence
    Delay {
        /// Pause duration
        duration: Duration,
    },
    /// Show a short text to the user
    Message(String),
}

impl AnimationStep {
    /// Build the step for a camera or timing command. Object-adding
    /// commands have no step form and yield `None`.
    pub fn from_command(command: Command) -> Option<Self> {
        match command {
            Command::FlyTo(options) => Some(Self::FlyTo {
                camera: options.camera.validated(),
                duration: Duration::from_millis(options.duration_ms),
            }),
            Command::FlyAround(options) => Some(Self::FlyAround {
                center: options.center.validated(),
                duration: Duration::from_millis(options.duration_ms),
                rounds: options.rounds,
            }),
            Command::Delay { duration_ms } => Some(Self::Delay {
                duration: Duration::from_millis(duration_ms),
            }),
            Command::Message(text) => Some(Self::Message(text)),
            Command::AddMarker(_) | Command::AddPolyline(_) | Command::AddPolygon(_) => None,
        }
    }

    /// Run the step to completion.
    ///
    /// Flights and delays suspend; on cancellation a flight stops the
    /// in-progress camera animation before returning. Messages are
    /// delivered immediately and never suspend.
    pub async fn execute(&self, ctx: StepContext<'_>) -> Result<(), StepError> {
        let StepContext {
            controller,
            events,
            cancel,
        } = ctx;
        if *cancel.borrow_and_update() {
            return Err(StepError::Cancelled);
        }
        match self {
            Self::FlyTo { camera, duration } => {
                await_flight(controller.fly_to(camera, *duration), controller, cancel).await
            }
            Self::FlyAround {
                center,
                duration,
                rounds,
            } => {
                await_flight(
                    controller.fly_around(center, *duration, *rounds),
                    controller,
                    cancel,
                )
                .await
            }
            Self::Delay { duration } => {
                tokio::select! {
                    () = tokio::time::sleep(*duration) => Ok(()),
                    () = cancelled(cancel) => Err(StepError::Cancelled),
                }
            }
            Self::Message(text) => {
                let _ = events.send(SessionEvent::Message(text.clone()));
                Ok(())
            }
        }
    }
}

/// Await a camera flight, racing it against cancellation. A cancelled
/// flight is stopped on the controller before control returns.
async fn await_flight(
    flight: impl Future<Output = Result<(), ControllerError>>,
    controller: &dyn MapController,
    cancel: &mut watch::Receiver<bool>,
) -> Result<(), StepError> {
    tokio::select! {
        result = flight => Ok(result?),
        () = cancelled(cancel) => {
            controller.stop_camera_animation();
            Err(StepError::Cancelled)
        }
    }
}

/// Resolve once the session is cancelled. A dropped sender counts as
/// cancellation so an orphaned session unwinds instead of running on.
pub(crate) async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            return;
        }
    }
}
