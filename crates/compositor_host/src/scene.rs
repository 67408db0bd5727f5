// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host surface consumed by the compositor.
//!
//! All methods run on the host's command thread. Reactive work triggered by a
//! call must finish before the call returns, so nothing here is async.

use crate::error::Result;
use crate::marker::{Marker, MarkerId};
use crate::shot::{Frame, FrameRange, Shot, ShotId};
use serde_json::Value;

/// Store of camera-like shot entities
pub trait ShotStore {
    /// Create a new shot at the default transform and return its key
    fn create_shot(&mut self) -> ShotId;

    /// Destroy a shot. Returns false if it did not exist
    fn destroy_shot(&mut self, id: &ShotId) -> bool;

    /// Resolve a shot by key
    fn shot(&self, id: &ShotId) -> Option<&Shot>;

    /// Resolve a shot by key for mutation
    fn shot_mut(&mut self, id: &ShotId) -> Option<&mut Shot>;

    /// Keys of every live shot, in scene order
    fn shot_ids(&self) -> Vec<ShotId>;

    /// The scene's current frame range
    fn frame_range(&self) -> FrameRange;

    /// Whether a shot resolves
    fn contains_shot(&self, id: &ShotId) -> bool {
        self.shot(id).is_some()
    }
}

/// Store of timeline markers
pub trait MarkerStore {
    /// Add an unbound marker
    fn add_marker(&mut self, name: &str, frame: Frame) -> MarkerId;

    /// Remove a marker. Returns false if it did not exist
    fn remove_marker(&mut self, id: MarkerId) -> bool;

    /// All markers, in timeline order of creation
    fn markers(&self) -> Vec<Marker>;

    /// Bind a marker to a shot (or unbind with `None`)
    fn set_marker_shot(&mut self, id: MarkerId, shot: Option<ShotId>) -> bool;

    /// Remove every marker and return how many were removed
    fn clear_markers(&mut self) -> usize;
}

/// Viewport control
pub trait Viewport {
    /// The scene's active shot
    fn active_shot(&self) -> Option<ShotId>;

    /// Make a shot the scene's active shot
    fn set_active_shot(&mut self, id: Option<ShotId>);

    /// Switch the active viewport to look through the active shot.
    /// Returns false when the host has no viewport to switch.
    fn switch_to_shot_preview(&mut self) -> bool;
}

/// Render output sink
pub trait RenderOutput {
    /// Set the output resolution in pixels
    fn set_resolution(&mut self, x: u32, y: u32);

    /// Set the output frame rate
    fn set_frame_rate(&mut self, fps: f32);
}

/// Scene-level key/value properties
pub trait PropertyStore {
    /// Register a property with its default value
    fn register_property(&mut self, key: &str, default: Value) -> Result<()>;

    /// Remove a registered property
    fn unregister_property(&mut self, key: &str) -> Result<()>;

    /// Read a property
    fn property(&self, key: &str) -> Option<&Value>;

    /// Write a registered property
    fn set_property(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Everything a compositor session needs from its host
pub trait SceneHost: ShotStore + MarkerStore + Viewport + RenderOutput + PropertyStore {}

impl<T> SceneHost for T where
    T: ShotStore + MarkerStore + Viewport + RenderOutput + PropertyStore
{
}
