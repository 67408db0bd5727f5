// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shot entities owned by the host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame number on the scene timeline
pub type Frame = i32;

/// Lowest frame a shot range may start or end on
pub const MIN_SHOT_FRAME: Frame = 1;

/// Stable external reference to a shot.
///
/// This is the host's lookup key (the object name). Holding a `ShotId` does
/// not keep the shot alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShotId(pub String);

impl ShotId {
    /// Create an ID from a host name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the underlying name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShotId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Inclusive frame range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    /// First frame
    pub start: Frame,
    /// Last frame
    pub end: Frame,
}

impl FrameRange {
    /// Create a range as given
    pub fn new(start: Frame, end: Frame) -> Self {
        Self { start, end }
    }

    /// Create a range valid for a shot (both ends at least frame 1)
    pub fn for_shot(start: Frame, end: Frame) -> Self {
        Self {
            start: start.max(MIN_SHOT_FRAME),
            end: end.max(MIN_SHOT_FRAME),
        }
    }

    /// Number of frames covered, zero if the range is inverted
    pub fn len(&self) -> u32 {
        if self.end < self.start {
            0
        } else {
            self.end.abs_diff(self.start) + 1
        }
    }

    /// Whether the range covers no frames
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FrameRange {
    fn default() -> Self {
        Self { start: 1, end: 250 }
    }
}

/// Camera projection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Perspective camera
    #[default]
    Perspective,
    /// Orthographic camera
    Orthographic,
}

impl Projection {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Perspective => "Perspective",
            Self::Orthographic => "Orthographic",
        }
    }
}

/// Lens settings of a shot's camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lens {
    /// Projection type
    pub projection: Projection,
    /// Focal length in millimeters (perspective)
    pub focal_length: f32,
    /// View scale (orthographic)
    pub ortho_scale: f32,
    /// Near clip distance
    pub clip_start: f32,
    /// Far clip distance
    pub clip_end: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            focal_length: 50.0,
            ortho_scale: 6.0,
            clip_start: 0.1,
            clip_end: 1000.0,
        }
    }
}

/// Animation attached to a shot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationData {
    /// Name of the assigned action, if any
    pub action: Option<String>,
    /// Number of keyframes across all curves
    pub keyframe_count: usize,
}

/// A camera-like entity with a visible time range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Host lookup key
    pub id: ShotId,
    /// Frames this shot covers
    pub range: FrameRange,
    /// Camera lens
    pub lens: Lens,
    /// Animation data (None when the shot was never animated)
    pub animation: Option<AnimationData>,
}

impl Shot {
    /// Create a shot with default lens and range
    pub fn new(id: ShotId) -> Self {
        Self {
            id,
            range: FrameRange::default(),
            lens: Lens::default(),
            animation: None,
        }
    }

    /// Set the range, clamping both ends to frame 1
    pub fn set_range(&mut self, start: Frame, end: Frame) {
        self.range = FrameRange::for_shot(start, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_range_clamps_to_first_frame() {
        let mut shot = Shot::new(ShotId::from("Camera"));
        shot.set_range(-5, 0);
        assert_eq!(shot.range, FrameRange::new(1, 1));

        shot.set_range(10, 48);
        assert_eq!(shot.range.len(), 39);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = FrameRange::new(20, 10);
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
    }

    #[test]
    fn test_shot_id_serializes_as_name() {
        let json = serde_json::to_string(&ShotId::from("Camera.001")).unwrap();
        assert_eq!(json, "\"Camera.001\"");
    }
}
