// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline markers.

use crate::shot::{Frame, ShotId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub Uuid);

impl MarkerId {
    /// Create a new random marker ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A named annotation on the scene timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker ID
    pub id: MarkerId,
    /// Display name
    pub name: String,
    /// Frame position
    pub frame: Frame,
    /// Shot this marker belongs to
    pub shot: Option<ShotId>,
}

impl Marker {
    /// Create an unbound marker
    pub fn new(name: impl Into<String>, frame: Frame) -> Self {
        Self {
            id: MarkerId::new(),
            name: name.into(),
            frame,
            shot: None,
        }
    }

    /// Whether this marker is bound to the given shot
    pub fn belongs_to(&self, shot: &ShotId) -> bool {
        self.shot.as_ref() == Some(shot)
    }
}
