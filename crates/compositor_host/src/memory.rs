// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory host implementation.

use crate::error::{HostError, Result};
use crate::marker::{Marker, MarkerId};
use crate::scene::{MarkerStore, PropertyStore, RenderOutput, ShotStore, Viewport};
use crate::shot::{Frame, FrameRange, Shot, ShotId};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;

/// Base name for newly created shots
const SHOT_BASE_NAME: &str = "Camera";

/// What the viewport is looking through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Free user view
    #[default]
    Free,
    /// Looking through the active shot
    ShotPreview,
}

/// A complete scene host kept in memory
#[derive(Debug, Clone)]
pub struct MemoryHost {
    /// Live shots in scene order
    shots: IndexMap<ShotId, Shot>,
    /// Timeline markers
    markers: Vec<Marker>,
    /// Scene frame range
    frame_range: FrameRange,
    /// Active shot
    active_shot: Option<ShotId>,
    /// Viewport state (None if the host has no viewport)
    viewport: Option<ViewMode>,
    /// Last resolution pushed to the render output
    resolution: (u32, u32),
    /// Last frame rate pushed to the render output
    frame_rate: f32,
    /// Registered scene properties
    properties: IndexMap<String, Value>,
    /// Keys whose registration or removal is rejected
    faulty_keys: HashSet<String>,
}

impl MemoryHost {
    /// Create an empty host with one viewport
    pub fn new() -> Self {
        Self {
            shots: IndexMap::new(),
            markers: Vec::new(),
            frame_range: FrameRange::default(),
            active_shot: None,
            viewport: Some(ViewMode::Free),
            resolution: (1920, 1080),
            frame_rate: 24.0,
            properties: IndexMap::new(),
            faulty_keys: HashSet::new(),
        }
    }

    /// Set the scene frame range
    pub fn with_frame_range(mut self, start: Frame, end: Frame) -> Self {
        self.frame_range = FrameRange::new(start, end);
        self
    }

    /// Remove the viewport
    pub fn without_viewport(mut self) -> Self {
        self.viewport = None;
        self
    }

    /// Reject registration and removal of a property key
    pub fn with_faulty_property(mut self, key: impl Into<String>) -> Self {
        self.faulty_keys.insert(key.into());
        self
    }

    /// Insert a fully built shot, replacing any shot with the same key
    pub fn insert_shot(&mut self, shot: Shot) {
        self.shots.insert(shot.id.clone(), shot);
    }

    /// Change the scene frame range
    pub fn set_frame_range(&mut self, start: Frame, end: Frame) {
        self.frame_range = FrameRange::new(start, end);
    }

    /// Number of live shots
    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }

    /// Number of markers
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Viewport state, None when there is no viewport
    pub fn view_mode(&self) -> Option<ViewMode> {
        self.viewport
    }

    /// Last resolution received
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// Last frame rate received
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    /// Registered property keys, in registration order
    pub fn property_keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    fn next_shot_id(&self) -> ShotId {
        let mut suffix = 0usize;
        loop {
            let name = if suffix == 0 {
                SHOT_BASE_NAME.to_string()
            } else {
                format!("{SHOT_BASE_NAME}.{suffix:03}")
            };
            let id = ShotId::new(name);
            if !self.shots.contains_key(&id) {
                return id;
            }
            suffix += 1;
        }
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ShotStore for MemoryHost {
    fn create_shot(&mut self) -> ShotId {
        let id = self.next_shot_id();
        self.shots.insert(id.clone(), Shot::new(id.clone()));
        tracing::debug!("Created shot {}", id);
        id
    }

    fn destroy_shot(&mut self, id: &ShotId) -> bool {
        if self.shots.shift_remove(id).is_none() {
            return false;
        }

        for marker in self.markers.iter_mut().filter(|m| m.belongs_to(id)) {
            marker.shot = None;
        }
        if self.active_shot.as_ref() == Some(id) {
            self.active_shot = None;
        }

        tracing::debug!("Destroyed shot {}", id);
        true
    }

    fn shot(&self, id: &ShotId) -> Option<&Shot> {
        self.shots.get(id)
    }

    fn shot_mut(&mut self, id: &ShotId) -> Option<&mut Shot> {
        self.shots.get_mut(id)
    }

    fn shot_ids(&self) -> Vec<ShotId> {
        self.shots.keys().cloned().collect()
    }

    fn frame_range(&self) -> FrameRange {
        self.frame_range
    }
}

impl MarkerStore for MemoryHost {
    fn add_marker(&mut self, name: &str, frame: Frame) -> MarkerId {
        let marker = Marker::new(name, frame);
        let id = marker.id;
        self.markers.push(marker);
        id
    }

    fn remove_marker(&mut self, id: MarkerId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        self.markers.len() != before
    }

    fn markers(&self) -> Vec<Marker> {
        self.markers.clone()
    }

    fn set_marker_shot(&mut self, id: MarkerId, shot: Option<ShotId>) -> bool {
        match self.markers.iter_mut().find(|m| m.id == id) {
            Some(marker) => {
                marker.shot = shot;
                true
            }
            None => false,
        }
    }

    fn clear_markers(&mut self) -> usize {
        let count = self.markers.len();
        self.markers.clear();
        count
    }
}

impl Viewport for MemoryHost {
    fn active_shot(&self) -> Option<ShotId> {
        self.active_shot.clone()
    }

    fn set_active_shot(&mut self, id: Option<ShotId>) {
        self.active_shot = id;
    }

    fn switch_to_shot_preview(&mut self) -> bool {
        match self.viewport.as_mut() {
            Some(mode) => {
                *mode = ViewMode::ShotPreview;
                true
            }
            None => false,
        }
    }
}

impl RenderOutput for MemoryHost {
    fn set_resolution(&mut self, x: u32, y: u32) {
        self.resolution = (x, y);
    }

    fn set_frame_rate(&mut self, fps: f32) {
        self.frame_rate = fps;
    }
}

impl PropertyStore for MemoryHost {
    fn register_property(&mut self, key: &str, default: Value) -> Result<()> {
        if self.faulty_keys.contains(key) {
            return Err(HostError::Rejected(format!("register {key}")));
        }
        if self.properties.contains_key(key) {
            return Err(HostError::AlreadyRegistered(key.to_string()));
        }
        self.properties.insert(key.to_string(), default);
        Ok(())
    }

    fn unregister_property(&mut self, key: &str) -> Result<()> {
        if self.faulty_keys.contains(key) {
            return Err(HostError::Rejected(format!("unregister {key}")));
        }
        self.properties
            .shift_remove(key)
            .map(|_| ())
            .ok_or_else(|| HostError::NotRegistered(key.to_string()))
    }

    fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    fn set_property(&mut self, key: &str, value: Value) -> Result<()> {
        let Some(slot) = self.properties.get_mut(key) else {
            return Err(HostError::NotRegistered(key.to_string()));
        };
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shot_names_follow_numbered_suffix() {
        let mut host = MemoryHost::new();
        let first = host.create_shot();
        let second = host.create_shot();
        let third = host.create_shot();
        assert_eq!(first.as_str(), "Camera");
        assert_eq!(second.as_str(), "Camera.001");
        assert_eq!(third.as_str(), "Camera.002");

        // Freed names are reused
        host.destroy_shot(&second);
        assert_eq!(host.create_shot().as_str(), "Camera.001");
    }

    #[test]
    fn test_destroy_unbinds_markers_and_active_shot() {
        let mut host = MemoryHost::new();
        let id = host.create_shot();
        let marker = host.add_marker("Camera_start", 1);
        host.set_marker_shot(marker, Some(id.clone()));
        host.set_active_shot(Some(id.clone()));

        assert!(host.destroy_shot(&id));
        assert!(!host.destroy_shot(&id));
        assert_eq!(host.active_shot(), None);
        assert_eq!(host.markers()[0].shot, None);
    }

    #[test]
    fn test_preview_without_viewport() {
        let mut host = MemoryHost::new().without_viewport();
        assert!(!host.switch_to_shot_preview());
        assert_eq!(host.view_mode(), None);

        let mut host = MemoryHost::new();
        assert!(host.switch_to_shot_preview());
        assert_eq!(host.view_mode(), Some(ViewMode::ShotPreview));
    }

    #[test]
    fn test_property_registration() {
        let mut host = MemoryHost::new().with_faulty_property("broken");

        host.register_property("frame_rate", json!(24.0)).unwrap();
        assert_eq!(
            host.register_property("frame_rate", json!(30.0)),
            Err(HostError::AlreadyRegistered("frame_rate".to_string()))
        );
        assert!(host.register_property("broken", json!(null)).is_err());

        host.set_property("frame_rate", json!(30.0)).unwrap();
        assert_eq!(host.property("frame_rate"), Some(&json!(30.0)));
        assert!(host.set_property("missing", json!(1)).is_err());

        host.unregister_property("frame_rate").unwrap();
        assert!(host.property("frame_rate").is_none());
    }
}
