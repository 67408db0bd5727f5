// SPDX-License-Identifier: MIT OR Apache-2.0
//! Start/end timeline markers for shots.

use compositor_host::{MarkerId, MarkerStore, ShotId, ShotStore};

/// Name of the marker placed on a shot's first frame
pub fn start_marker_name(id: &ShotId) -> String {
    format!("{id}_start")
}

/// Name of the marker placed on a shot's last frame
pub fn end_marker_name(id: &ShotId) -> String {
    format!("{id}_end")
}

/// Replace a shot's markers with a fresh start/end pair.
///
/// Every marker bound to the shot is removed first, so repeated calls never
/// accumulate markers. Returns false if the shot does not resolve.
pub fn regenerate_shot_markers<H>(host: &mut H, id: &ShotId) -> bool
where
    H: ShotStore + MarkerStore + ?Sized,
{
    let Some(range) = host.shot(id).map(|shot| shot.range) else {
        return false;
    };

    let stale: Vec<MarkerId> = host
        .markers()
        .iter()
        .filter(|marker| marker.belongs_to(id))
        .map(|marker| marker.id)
        .collect();
    for marker in &stale {
        host.remove_marker(*marker);
    }

    let start = host.add_marker(&start_marker_name(id), range.start);
    host.set_marker_shot(start, Some(id.clone()));
    let end = host.add_marker(&end_marker_name(id), range.end);
    host.set_marker_shot(end, Some(id.clone()));

    tracing::debug!(
        "Markers for {} at {}..{} (replaced {})",
        id,
        range.start,
        range.end,
        stale.len()
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use compositor_host::MemoryHost;

    #[test]
    fn test_regenerate_replaces_bound_markers() {
        let mut host = MemoryHost::new();
        let id = host.create_shot();
        host.shot_mut(&id).unwrap().set_range(10, 40);
        host.add_marker("unrelated", 5);

        assert!(regenerate_shot_markers(&mut host, &id));
        host.shot_mut(&id).unwrap().set_range(12, 30);
        assert!(regenerate_shot_markers(&mut host, &id));

        let markers = host.markers();
        assert_eq!(markers.len(), 3);
        let bound: Vec<_> = markers.iter().filter(|m| m.belongs_to(&id)).collect();
        assert_eq!(bound.len(), 2);
        assert_eq!(bound[0].name, "Camera_start");
        assert_eq!(bound[0].frame, 12);
        assert_eq!(bound[1].name, "Camera_end");
        assert_eq!(bound[1].frame, 30);
    }

    #[test]
    fn test_regenerate_unknown_shot() {
        let mut host = MemoryHost::new();
        assert!(!regenerate_shot_markers(&mut host, &ShotId::from("Ghost")));
        assert_eq!(host.marker_count(), 0);
    }
}
