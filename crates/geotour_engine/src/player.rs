// SPDX-License-Identifier: MIT OR Apache-2.0
//! The session player.
//!
//! A [`Player`] binds one [`MapController`] to one animation at a time.
//! `play` parses and starts a script, `stop` cancels cooperatively, and
//! `restart` replays the current script from the beginning. At most one
//! sequence runs per player; a new `play` cancels the running one and
//! waits for it to unwind before starting.

use crate::controller::MapController;
use crate::scene::{MapObject, SceneRegistry};
use crate::step::{AnimationStep, StepContext, StepError};
use geotour_script::{parse_animation, Command, ParseError};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Unique identifier for one playback run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Playback state of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No sequence has run, or the last one was cancelled or aborted
    #[default]
    Idle,
    /// A sequence is executing steps
    Running,
    /// A stop was requested and the sequence is unwinding
    Cancelling,
    /// The last sequence ran every step to the end
    Completed,
}

/// Something a session wants to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Informational text from a `message` command
    Message(String),
    /// A parse or execution failure, already phrased for display
    Error(String),
}

/// Plays parsed animation scripts against a map controller.
pub struct Player {
    controller: Arc<dyn MapController>,
    scene: Arc<Mutex<SceneRegistry>>,
    state: Arc<Mutex<PlaybackState>>,
    events: mpsc::UnboundedSender<SessionEvent>,
    cancel: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
    current: Option<Vec<Command>>,
}

impl Player {
    /// Create a player bound to `controller`, returning it together with
    /// the receiving end of its event channel.
    pub fn new(
        controller: Arc<dyn MapController>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let player = Self {
            controller,
            scene: Arc::new(Mutex::new(SceneRegistry::new())),
            state: Arc::new(Mutex::new(PlaybackState::Idle)),
            events,
            cancel: None,
            handle: None,
            current: None,
        };
        (player, receiver)
    }

    /// Parse `script` and start playing it.
    ///
    /// A running sequence is cancelled first. On a parse failure nothing
    /// starts: the error is returned and a user-facing
    /// [`SessionEvent::Error`] is emitted.
    pub fn play(&mut self, script: &str) -> Result<(), ParseError> {
        match parse_animation(script) {
            Ok(commands) => {
                self.play_commands(commands);
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "animation script rejected");
                let _ = self
                    .events
                    .send(SessionEvent::Error("Unable to parse animation".to_owned()));
                Err(error)
            }
        }
    }

    /// Start playing an already parsed command list, cancelling any
    /// running sequence first.
    pub fn play_commands(&mut self, commands: Vec<Command>) {
        self.current = Some(commands.clone());
        self.spawn(commands);
    }

    /// Request cancellation of the running sequence.
    ///
    /// Returns immediately; the sequence unwinds at its next suspension
    /// point, stopping any in-flight camera animation on the way out.
    /// Objects already added and the camera pose are left as they are.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let mut state = self.state.lock();
            if *state == PlaybackState::Running {
                *state = PlaybackState::Cancelling;
            }
            drop(state);
            let _ = cancel.send(true);
        }
    }

    /// Replay the current script from the beginning, cancelling the
    /// running sequence first. Does nothing if no script was ever played.
    pub fn restart(&mut self) {
        if let Some(commands) = self.current.clone() {
            self.spawn(commands);
        }
    }

    /// Wait for the active sequence (and any it superseded) to finish.
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    /// The player's current playback state.
    pub fn state(&self) -> PlaybackState {
        *self.state.lock()
    }

    /// Ids of the objects the player has added to the map, in insertion
    /// order.
    pub fn object_ids(&self) -> Vec<String> {
        self.scene.lock().ids().map(str::to_owned).collect()
    }

    /// Remove one object the player added. Returns whether it existed.
    pub fn remove_object(&mut self, id: &str) -> bool {
        self.scene.lock().remove(id)
    }

    /// Remove every object the player added to the map.
    pub fn clear_scene(&mut self) {
        self.scene.lock().clear();
    }

    fn spawn(&mut self, commands: Vec<Command>) {
        // Supersede the running sequence; the new one waits for it to
        // unwind before starting.
        if let Some(previous) = self.cancel.take() {
            let mut state = self.state.lock();
            if *state == PlaybackState::Running {
                *state = PlaybackState::Cancelling;
            }
            drop(state);
            let _ = previous.send(true);
        }
        let (cancel, cancel_rx) = watch::channel(false);
        self.cancel = Some(cancel);

        let previous = self.handle.take();
        let session = Session {
            id: SessionId::new(),
            controller: Arc::clone(&self.controller),
            scene: Arc::clone(&self.scene),
            state: Arc::clone(&self.state),
            events: self.events.clone(),
        };
        self.handle = Some(tokio::spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            session.run(commands, cancel_rx).await;
        }));
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        // Let a detached session unwind instead of driving a dead map.
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(true);
        }
    }
}

/// One spawned playback run.
struct Session {
    id: SessionId,
    controller: Arc<dyn MapController>,
    scene: Arc<Mutex<SceneRegistry>>,
    state: Arc<Mutex<PlaybackState>>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl Session {
    async fn run(self, commands: Vec<Command>, mut cancel: watch::Receiver<bool>) {
        *self.state.lock() = PlaybackState::Running;
        info!(session = %self.id, commands = commands.len(), "animation started");

        for (position, command) in commands.into_iter().enumerate() {
            if *cancel.borrow_and_update() {
                debug!(session = %self.id, position, "animation cancelled");
                *self.state.lock() = PlaybackState::Idle;
                return;
            }
            match self.run_command(command, &mut cancel).await {
                Ok(()) => {}
                Err(StepError::Cancelled) => {
                    debug!(session = %self.id, position, "animation cancelled");
                    *self.state.lock() = PlaybackState::Idle;
                    return;
                }
                Err(StepError::Controller(error)) => {
                    warn!(session = %self.id, position, error = %error, "animation aborted");
                    let _ = self
                        .events
                        .send(SessionEvent::Error(format!("Animation stopped: {error}")));
                    *self.state.lock() = PlaybackState::Idle;
                    return;
                }
            }
        }

        info!(session = %self.id, "animation completed");
        *self.state.lock() = PlaybackState::Completed;
    }

    async fn run_command(
        &self,
        command: Command,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<(), StepError> {
        // Object adds apply immediately; only camera and timing commands
        // become suspending steps.
        let command = match MapObject::from_command(command) {
            Ok(object) => {
                match object.add_to_map(self.controller.as_ref()).await? {
                    Some(handle) => self.scene.lock().insert(handle),
                    None => warn!(
                        session = %self.id,
                        id = object.id(),
                        kind = object.kind(),
                        "controller declined object, continuing without it"
                    ),
                }
                return Ok(());
            }
            Err(command) => command,
        };

        if let Some(step) = AnimationStep::from_command(command) {
            step.execute(StepContext {
                controller: self.controller.as_ref(),
                events: &self.events,
                cancel,
            })
            .await?;
        }
        Ok(())
    }
}
