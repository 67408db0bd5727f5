// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lens control for the active shot.

use compositor_host::{Projection, ShotId, ShotStore, Viewport};

/// Shortest focal length accepted, in millimeters
pub const MIN_FOCAL_LENGTH: f32 = 1.0;

/// Orthographic scale given to shots created from the lens controls
pub const DEFAULT_ORTHO_SCALE: f32 = 6.0;

/// Scene-level camera type and lens edits on the active shot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LensController {
    projection: Projection,
}

impl LensController {
    /// Create a controller with a scene camera type
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    /// Scene camera type
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Set the scene camera type and apply it to the active shot.
    ///
    /// Returns true if an active shot was updated.
    pub fn set_projection<H>(&mut self, host: &mut H, projection: Projection) -> bool
    where
        H: ShotStore + Viewport + ?Sized,
    {
        self.projection = projection;

        let Some(id) = host.active_shot() else {
            return false;
        };
        let Some(shot) = host.shot_mut(&id) else {
            return false;
        };
        shot.lens.projection = projection;
        tracing::debug!("Shot {} uses {} projection", id, projection.name());
        true
    }

    /// Set the focal length of the active shot, creating a shot if none is active.
    ///
    /// An existing shot is switched to perspective. A created shot takes the
    /// scene camera type and is not added to the shot list.
    pub fn set_focal_length<H>(&self, host: &mut H, focal_length: f32) -> ShotId
    where
        H: ShotStore + Viewport + ?Sized,
    {
        let focal_length = focal_length.max(MIN_FOCAL_LENGTH);

        let active = host.active_shot().filter(|id| host.contains_shot(id));
        let id = match active {
            Some(id) => {
                if let Some(shot) = host.shot_mut(&id) {
                    shot.lens.projection = Projection::Perspective;
                    shot.lens.focal_length = focal_length;
                }
                id
            }
            None => {
                let id = host.create_shot();
                let range = host.frame_range();
                let projection = self.projection;
                if let Some(shot) = host.shot_mut(&id) {
                    shot.set_range(range.start, range.end);
                    shot.lens.projection = projection;
                    match projection {
                        Projection::Perspective => shot.lens.focal_length = focal_length,
                        Projection::Orthographic => shot.lens.ortho_scale = DEFAULT_ORTHO_SCALE,
                    }
                }
                host.set_active_shot(Some(id.clone()));
                tracing::info!("Created shot {} for lens edit", id);
                id
            }
        };

        host.switch_to_shot_preview();
        id
    }

    /// Set the clip distances of the active shot
    pub fn set_clip_range<H>(&self, host: &mut H, clip_start: f32, clip_end: f32) -> bool
    where
        H: ShotStore + Viewport + ?Sized,
    {
        if !(clip_start > 0.0 && clip_end > clip_start) {
            tracing::warn!("Clip range {}..{} rejected", clip_start, clip_end);
            return false;
        }
        let Some(id) = host.active_shot() else {
            return false;
        };
        let Some(shot) = host.shot_mut(&id) else {
            return false;
        };
        shot.lens.clip_start = clip_start;
        shot.lens.clip_end = clip_end;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compositor_host::{MemoryHost, ViewMode};

    #[test]
    fn test_focal_length_creates_shot_when_none_active() {
        let mut host = MemoryHost::new().with_frame_range(1, 60);
        let lens = LensController::default();

        let id = lens.set_focal_length(&mut host, 35.0);
        let shot = host.shot(&id).unwrap();
        assert_eq!(shot.lens.focal_length, 35.0);
        assert_eq!(shot.range.end, 60);
        assert_eq!(host.active_shot(), Some(id));
        assert_eq!(host.view_mode(), Some(ViewMode::ShotPreview));
    }

    #[test]
    fn test_focal_length_forces_perspective() {
        let mut host = MemoryHost::new();
        let mut lens = LensController::default();
        let id = host.create_shot();
        host.set_active_shot(Some(id.clone()));
        assert!(lens.set_projection(&mut host, Projection::Orthographic));

        assert_eq!(lens.set_focal_length(&mut host, 0.2), id);
        let shot = host.shot(&id).unwrap();
        assert_eq!(shot.lens.projection, Projection::Perspective);
        assert_eq!(shot.lens.focal_length, MIN_FOCAL_LENGTH);
    }

    #[test]
    fn test_orthographic_shot_from_lens_controls() {
        let mut host = MemoryHost::new();
        let mut lens = LensController::default();
        assert!(!lens.set_projection(&mut host, Projection::Orthographic));

        let id = lens.set_focal_length(&mut host, 85.0);
        let shot = host.shot(&id).unwrap();
        assert_eq!(shot.lens.projection, Projection::Orthographic);
        assert_eq!(shot.lens.ortho_scale, DEFAULT_ORTHO_SCALE);
    }

    #[test]
    fn test_clip_range_validation() {
        let mut host = MemoryHost::new();
        let lens = LensController::default();
        let id = host.create_shot();
        host.set_active_shot(Some(id.clone()));

        assert!(!lens.set_clip_range(&mut host, 10.0, 5.0));
        assert!(!lens.set_clip_range(&mut host, 0.0, 5.0));
        assert!(lens.set_clip_range(&mut host, 0.5, 500.0));
        assert_eq!(host.shot(&id).unwrap().lens.clip_end, 500.0);
    }
}
