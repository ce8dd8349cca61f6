// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback engine for GeoTour animation scripts.
//!
//! This crate executes parsed animation commands against an abstract 3D
//! map:
//! - Controller seam for the external map (camera flights, object adds)
//! - Scene object model tracking live handles by id
//! - Executable animation steps with a cooperative cancellation contract
//! - A session player running one sequence at a time
//!
//! ## Architecture
//!
//! A [`Player`] parses a script into commands, spawns one session task,
//! and drives steps strictly in order: a step never starts before the
//! previous one has returned, including awaiting camera-animation
//! completion. `stop` and a superseding `play` cancel at the running
//! step's suspension point, halting any in-flight camera animation
//! first. Objects added to the map are never rolled back.

pub mod controller;
pub mod player;
pub mod scene;
pub mod step;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ControllerError, MapController};
pub use player::{PlaybackState, Player, SessionEvent, SessionId};
pub use scene::{ActiveMapObject, MapObject, SceneRegistry};
pub use step::{AnimationStep, StepContext, StepError};
