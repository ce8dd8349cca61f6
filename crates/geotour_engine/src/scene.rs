// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene object model.
//!
//! A [`MapObject`] describes an entity that can be added to the map; an
//! [`ActiveMapObject`] is the live handle the controller returns once it
//! is. The [`SceneRegistry`] tracks handles by id so a session can remove
//! what it added.

use crate::controller::{ControllerError, MapController};
use geotour_script::{Command, MarkerOptions, ModelOptions, PolygonOptions, PolylineOptions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A live object previously added to the map.
///
/// `remove` must be idempotent: removing a handle twice is a no-op.
pub trait ActiveMapObject: Send {
    /// The object id the handle was registered under.
    fn id(&self) -> &str;

    /// Remove the object from the map.
    fn remove(&mut self);
}

/// Descriptor for an entity that can be added to the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapObject {
    /// A labelled point marker
    Marker(MarkerOptions),
    /// A stroked line
    Polyline(PolylineOptions),
    /// A filled area
    Polygon(PolygonOptions),
    /// A glTF model
    Model(ModelOptions),
}

impl MapObject {
    /// Extract the object described by an `add*` command. Camera and
    /// timing commands are handed back unchanged.
    pub fn from_command(command: Command) -> Result<Self, Command> {
        match command {
            Command::AddMarker(options) => Ok(Self::Marker(options)),
            Command::AddPolyline(options) => Ok(Self::Polyline(options)),
            Command::AddPolygon(options) => Ok(Self::Polygon(options)),
            other => Err(other),
        }
    }

    /// The unique object id.
    pub fn id(&self) -> &str {
        match self {
            Self::Marker(options) => &options.id,
            Self::Polyline(options) => &options.id,
            Self::Polygon(options) => &options.id,
            Self::Model(options) => &options.id,
        }
    }

    /// A short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Marker(_) => "marker",
            Self::Polyline(_) => "polyline",
            Self::Polygon(_) => "polygon",
            Self::Model(_) => "model",
        }
    }

    /// Realize this object against the controller.
    ///
    /// `Ok(None)` means the controller declined the add. That is a
    /// recoverable condition; the caller logs it and continues without a
    /// registered handle.
    pub async fn add_to_map(
        &self,
        controller: &dyn MapController,
    ) -> Result<Option<Box<dyn ActiveMapObject>>, ControllerError> {
        match self {
            Self::Marker(options) => controller.add_marker(options).await,
            Self::Polyline(options) => controller.add_polyline(options).await,
            Self::Polygon(options) => controller.add_polygon(options).await,
            Self::Model(options) => controller.add_model(options).await,
        }
    }
}

/// The id-keyed set of live objects one session has added to the map.
///
/// The registry is mutated only by the session that owns it; it does no
/// internal locking.
#[derive(Default)]
pub struct SceneRegistry {
    objects: IndexMap<String, Box<dyn ActiveMapObject>>,
}

impl SceneRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle under its id.
    ///
    /// A duplicate id replaces the previous object: the old handle is
    /// removed from the map and a warning is logged.
    pub fn insert(&mut self, handle: Box<dyn ActiveMapObject>) {
        let id = handle.id().to_owned();
        if let Some(mut replaced) = self.objects.insert(id.clone(), handle) {
            warn!(id = %id, "duplicate object id, replacing previous object");
            replaced.remove();
        }
    }

    /// Remove the object registered under `id` from the map and the
    /// registry. Returns whether such an object existed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.objects.shift_remove(id) {
            Some(mut handle) => {
                handle.remove();
                true
            }
            None => false,
        }
    }

    /// Remove every registered object from the map.
    pub fn clear(&mut self) {
        for (_, mut handle) in self.objects.drain(..) {
            handle.remove();
        }
    }

    /// Whether an object is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    /// Registered ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.objects.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Handle {
        id: String,
        removed: bool,
        removals: Arc<AtomicUsize>,
    }

    impl ActiveMapObject for Handle {
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

    fn handle(id: &str, removals: &Arc<AtomicUsize>) -> Box<dyn ActiveMapObject> {
        Box::new(Handle {
            id: id.to_owned(),
            removed: false,
            removals: Arc::clone(removals),
        })
    }

    #[test]
    fn insert_and_remove() {
        let removals = Arc::new(AtomicUsize::new(0));
        let mut scene = SceneRegistry::new();
        scene.insert(handle("m1", &removals));
        scene.insert(handle("m2", &removals));
        assert_eq!(scene.len(), 2);
        assert!(scene.contains("m1"));

        assert!(scene.remove("m1"));
        assert!(!scene.remove("m1"));
        assert_eq!(removals.load(Ordering::SeqCst), 1);
        assert_eq!(scene.ids().collect::<Vec<_>>(), vec!["m2"]);
    }

    #[test]
    fn duplicate_id_replaces_and_removes_old_handle() {
        let removals = Arc::new(AtomicUsize::new(0));
        let mut scene = SceneRegistry::new();
        scene.insert(handle("m1", &removals));
        scene.insert(handle("m1", &removals));
        assert_eq!(scene.len(), 1);
        assert_eq!(removals.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let removals = Arc::new(AtomicUsize::new(0));
        let mut scene = SceneRegistry::new();
        scene.insert(handle("a", &removals));
        scene.insert(handle("b", &removals));
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(removals.load(Ordering::SeqCst), 2);
    }
}
