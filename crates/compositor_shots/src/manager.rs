// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shot list commands.
//!
//! Every write to the selection immediately makes the selected shot the
//! active one and switches the viewport to preview it. Commands never fail:
//! an unmet precondition leaves the list untouched and returns `false`.

use crate::list::{Direction, ShotList, ShotRow};
use crate::markers::regenerate_shot_markers;
use compositor_host::{Frame, MarkerStore, ShotId, ShotStore, Viewport};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts reported by [`ShotListManager::erase_all_keyframes`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraseReport {
    /// Markers removed from the timeline
    pub markers_cleared: usize,
    /// Shots whose range was reset
    pub shots_processed: usize,
    /// Shots that had animation data cleared
    pub animations_cleared: usize,
    /// Keyframes dropped with that animation data
    pub keyframes_removed: usize,
}

impl fmt::Display for EraseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cleared {} timeline markers, processed {} shots ({} animated, {} keyframes removed)",
            self.markers_cleared,
            self.shots_processed,
            self.animations_cleared,
            self.keyframes_removed
        )
    }
}

/// Owner of the scene's shot list
#[derive(Debug, Clone, Default)]
pub struct ShotListManager {
    list: ShotList,
}

impl ShotListManager {
    /// Create a manager with an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager around a restored list
    pub fn from_list(list: ShotList) -> Self {
        Self { list }
    }

    /// The list
    pub fn list(&self) -> &ShotList {
        &self.list
    }

    /// Selected position
    pub fn selected_index(&self) -> Option<usize> {
        self.list.selected()
    }

    /// Selected entry
    pub fn selected_shot(&self) -> Option<&ShotId> {
        self.list.selected_shot()
    }

    /// Resolve every entry for display
    pub fn rows<H: ShotStore + ?Sized>(&self, host: &H) -> Vec<ShotRow> {
        self.list.rows(host)
    }

    /// Create a shot covering the scene range, append it and select it
    pub fn add_shot<H>(&mut self, host: &mut H) -> ShotId
    where
        H: ShotStore + Viewport + ?Sized,
    {
        let id = host.create_shot();
        let range = host.frame_range();
        if let Some(shot) = host.shot_mut(&id) {
            shot.set_range(range.start, range.end);
        }

        self.list.entries_mut().push(id.clone());
        let index = self.list.len() - 1;
        self.set_selection(host, Some(index));

        tracing::info!("Added shot {} ({}..{})", id, range.start, range.end);
        id
    }

    /// Destroy the selected shot and drop its entry.
    ///
    /// The selection moves to the previous entry (or stays at the top).
    pub fn remove_selected<H>(&mut self, host: &mut H) -> bool
    where
        H: ShotStore + Viewport + ?Sized,
    {
        let Some(index) = self.list.selected().filter(|index| *index < self.list.len()) else {
            tracing::debug!("Remove skipped: no shot selected");
            return false;
        };

        let id = self.list.entries_mut().remove(index);
        if !host.destroy_shot(&id) {
            tracing::debug!("Shot {} was already gone from the scene", id);
        }

        let next = if self.list.is_empty() {
            None
        } else {
            Some(index.saturating_sub(1).min(self.list.len() - 1))
        };
        self.set_selection(host, next);

        tracing::info!("Removed shot {}", id);
        true
    }

    /// Swap the selected entry with its neighbor; the selection follows it
    pub fn move_selected<H>(&mut self, host: &mut H, direction: Direction) -> bool
    where
        H: ShotStore + Viewport + ?Sized,
    {
        let len = self.list.len();
        if len <= 1 {
            return false;
        }
        let Some(index) = self.list.selected().filter(|index| *index < len) else {
            return false;
        };

        let neighbor = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|next| *next < len),
        };
        let Some(neighbor) = neighbor else {
            tracing::debug!("Move {:?} skipped: shot {} is at the edge", direction, index);
            return false;
        };

        self.list.entries_mut().swap(index, neighbor);
        self.set_selection(host, Some(neighbor));
        true
    }

    /// Stable sort by start frame. Dangling entries sink to the end.
    ///
    /// The selection stays on the shot that was selected before sorting.
    pub fn sort_by_start_frame<H>(&mut self, host: &mut H)
    where
        H: ShotStore + Viewport + ?Sized,
    {
        let selected = self.list.selected_shot().cloned();

        self.list
            .entries_mut()
            .sort_by_key(|id| host.shot(id).map_or(Frame::MAX, |shot| shot.range.start));

        let position = selected.and_then(|id| self.list.position(&id));
        if position != self.list.selected() {
            self.set_selection(host, position);
        }
    }

    /// Regenerate start/end markers for every live shot in the scene.
    ///
    /// Returns how many shots got markers.
    pub fn update_all_timeline_markers<H>(&self, host: &mut H) -> usize
    where
        H: ShotStore + MarkerStore + ?Sized,
    {
        let mut updated = 0;
        for id in host.shot_ids() {
            if regenerate_shot_markers(host, &id) {
                updated += 1;
            }
        }
        tracing::debug!("Updated timeline markers for {} shots", updated);
        updated
    }

    /// Reset the scene's shots and rebuild the list from them.
    ///
    /// Clears every timeline marker, drops animation data, resets each shot
    /// to the scene range and relists all live shots in scene order.
    pub fn erase_all_keyframes<H>(&mut self, host: &mut H) -> EraseReport
    where
        H: ShotStore + MarkerStore + Viewport + ?Sized,
    {
        let mut report = EraseReport {
            markers_cleared: host.clear_markers(),
            ..EraseReport::default()
        };
        tracing::info!("Cleared {} timeline markers", report.markers_cleared);

        let range = host.frame_range();
        if range.is_empty() {
            tracing::warn!("Scene range {}..{} covers no frames", range.start, range.end);
        }
        for id in host.shot_ids() {
            let Some(shot) = host.shot_mut(&id) else {
                continue;
            };
            report.shots_processed += 1;
            tracing::info!("Processing shot: {}", id);

            if let Some(animation) = shot.animation.take() {
                report.animations_cleared += 1;
                report.keyframes_removed += animation.keyframe_count;
                tracing::info!(
                    "Cleared animation data for {} ({} keyframes)",
                    id,
                    animation.keyframe_count
                );
            }

            shot.set_range(range.start, range.end);
            tracing::info!("Reset range for {}", id);
        }

        *self.list.entries_mut() = host.shot_ids();
        let selection = if self.list.is_empty() { None } else { Some(0) };
        self.set_selection(host, selection);

        tracing::info!("{}", report);
        report
    }

    /// Make the selected shot active and preview it
    pub fn view_selected<H>(&self, host: &mut H) -> bool
    where
        H: ShotStore + Viewport + ?Sized,
    {
        self.activate_selected(host)
    }

    /// Select a position (or clear the selection). Out-of-range is ignored.
    pub fn select<H>(&mut self, host: &mut H, index: Option<usize>) -> bool
    where
        H: ShotStore + Viewport + ?Sized,
    {
        if let Some(index) = index {
            if index >= self.list.len() {
                tracing::warn!(
                    "Selection {} ignored: list has {} shots",
                    index,
                    self.list.len()
                );
                return false;
            }
        }
        self.set_selection(host, index);
        true
    }

    /// Set a shot's range and refresh the timeline markers
    pub fn set_shot_range<H>(&self, host: &mut H, id: &ShotId, start: Frame, end: Frame) -> bool
    where
        H: ShotStore + MarkerStore + ?Sized,
    {
        let Some(shot) = host.shot_mut(id) else {
            tracing::warn!("Range change skipped: shot {} not found", id);
            return false;
        };
        shot.set_range(start, end);
        self.update_all_timeline_markers(host);
        true
    }

    fn set_selection<H>(&mut self, host: &mut H, selection: Option<usize>)
    where
        H: ShotStore + Viewport + ?Sized,
    {
        self.list.set_selected(selection);
        self.on_selection_changed(host);
    }

    fn on_selection_changed<H>(&self, host: &mut H)
    where
        H: ShotStore + Viewport + ?Sized,
    {
        self.activate_selected(host);
    }

    fn activate_selected<H>(&self, host: &mut H) -> bool
    where
        H: ShotStore + Viewport + ?Sized,
    {
        let Some(id) = self.list.selected_shot() else {
            return false;
        };
        if !host.contains_shot(id) {
            tracing::debug!("Selected shot {} no longer resolves", id);
            return false;
        }

        host.set_active_shot(Some(id.clone()));
        if !host.switch_to_shot_preview() {
            tracing::debug!("No viewport to switch to shot preview");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compositor_host::{AnimationData, MemoryHost, Shot, ViewMode};

    fn host_with_shots(count: usize) -> (MemoryHost, ShotListManager) {
        let mut host = MemoryHost::new().with_frame_range(1, 100);
        let mut manager = ShotListManager::new();
        for _ in 0..count {
            manager.add_shot(&mut host);
        }
        (host, manager)
    }

    fn names(manager: &ShotListManager) -> Vec<&str> {
        manager.list().entries().iter().map(ShotId::as_str).collect()
    }

    #[test]
    fn test_add_shot_selects_and_previews() {
        let (host, manager) = host_with_shots(2);

        assert_eq!(names(&manager), ["Camera", "Camera.001"]);
        assert_eq!(manager.selected_index(), Some(1));
        assert_eq!(host.active_shot(), Some(ShotId::from("Camera.001")));
        assert_eq!(host.view_mode(), Some(ViewMode::ShotPreview));

        let shot = host.shot(&ShotId::from("Camera")).unwrap();
        assert_eq!((shot.range.start, shot.range.end), (1, 100));
    }

    #[test]
    fn test_add_shot_without_viewport() {
        let mut host = MemoryHost::new().without_viewport();
        let mut manager = ShotListManager::new();
        let id = manager.add_shot(&mut host);
        assert_eq!(host.active_shot(), Some(id));
        assert_eq!(host.view_mode(), None);
    }

    #[test]
    fn test_remove_selected_clamps_selection() {
        for len in 1..=4 {
            for selected in 0..len {
                let (mut host, mut manager) = host_with_shots(len);
                manager.select(&mut host, Some(selected));

                assert!(manager.remove_selected(&mut host));
                assert_eq!(manager.list().len(), len - 1);
                assert_eq!(host.shot_count(), len - 1);

                let expected = if len == 1 {
                    None
                } else {
                    Some(selected.saturating_sub(1).min(len - 2))
                };
                assert_eq!(manager.selected_index(), expected);

                let stored = manager.list().selected_index_i64();
                let new_len = len as i64 - 1;
                assert!(stored == -1 || (0..new_len).contains(&stored));
            }
        }
    }

    #[test]
    fn test_remove_without_selection_is_noop() {
        let mut host = MemoryHost::new();
        let mut manager = ShotListManager::new();
        assert!(!manager.remove_selected(&mut host));

        let (mut host, mut manager) = host_with_shots(2);
        manager.select(&mut host, None);
        assert!(!manager.remove_selected(&mut host));
        assert_eq!(manager.list().len(), 2);
    }

    #[test]
    fn test_stored_list_with_stale_selection() {
        let mut host = MemoryHost::new();
        host.create_shot();
        host.create_shot();
        let list: ShotList =
            serde_json::from_str(r#"{"entries":["Camera","Camera.001"],"selected":3}"#).unwrap();
        let mut manager = ShotListManager::from_list(list);

        assert!(!manager.remove_selected(&mut host));
        assert!(!manager.move_selected(&mut host, Direction::Down));
        assert_eq!(names(&manager), ["Camera", "Camera.001"]);
        assert_eq!(host.shot_count(), 2);
    }

    #[test]
    fn test_remove_dangling_entry() {
        let (mut host, mut manager) = host_with_shots(2);
        host.destroy_shot(&ShotId::from("Camera.001"));

        assert!(manager.remove_selected(&mut host));
        assert_eq!(names(&manager), ["Camera"]);
        assert_eq!(manager.selected_index(), Some(0));
        assert_eq!(host.active_shot(), Some(ShotId::from("Camera")));
    }

    #[test]
    fn test_move_round_trip() {
        let (mut host, mut manager) = host_with_shots(3);
        manager.select(&mut host, Some(1));
        let before = manager.list().entries().to_vec();

        assert!(manager.move_selected(&mut host, Direction::Up));
        assert_eq!(names(&manager), ["Camera.001", "Camera", "Camera.002"]);
        assert_eq!(manager.selected_index(), Some(0));
        assert_eq!(host.active_shot(), Some(ShotId::from("Camera.001")));

        assert!(manager.move_selected(&mut host, Direction::Down));
        assert_eq!(manager.list().entries(), before.as_slice());
        assert_eq!(manager.selected_index(), Some(1));
    }

    #[test]
    fn test_move_past_edges_is_noop() {
        let (mut host, mut manager) = host_with_shots(3);
        let before = manager.list().entries().to_vec();

        manager.select(&mut host, Some(0));
        assert!(!manager.move_selected(&mut host, Direction::Up));
        manager.select(&mut host, Some(2));
        assert!(!manager.move_selected(&mut host, Direction::Down));
        assert_eq!(manager.list().entries(), before.as_slice());

        let (mut host, mut manager) = host_with_shots(1);
        assert!(!manager.move_selected(&mut host, Direction::Down));
    }

    #[test]
    fn test_sort_is_stable() {
        let (mut host, mut manager) = host_with_shots(4);
        let starts = [("Camera", 50), ("Camera.001", 10), ("Camera.002", 50), ("Camera.003", 10)];
        for (name, start) in starts {
            host.shot_mut(&ShotId::from(name)).unwrap().set_range(start, start + 20);
        }
        manager.select(&mut host, Some(0));

        manager.sort_by_start_frame(&mut host);

        assert_eq!(names(&manager), ["Camera.001", "Camera.003", "Camera", "Camera.002"]);
        assert_eq!(manager.selected_shot(), Some(&ShotId::from("Camera")));
        assert_eq!(manager.selected_index(), Some(2));
    }

    #[test]
    fn test_sort_moves_dangling_last() {
        let (mut host, mut manager) = host_with_shots(3);
        host.shot_mut(&ShotId::from("Camera.002")).unwrap().set_range(5, 9);
        host.destroy_shot(&ShotId::from("Camera"));

        manager.sort_by_start_frame(&mut host);
        assert_eq!(names(&manager), ["Camera.001", "Camera.002", "Camera"]);
    }

    #[test]
    fn test_update_markers_is_idempotent() {
        let (mut host, manager) = host_with_shots(2);
        // Live but unlisted shots get markers too
        host.create_shot();

        assert_eq!(manager.update_all_timeline_markers(&mut host), 3);
        let once: Vec<_> = host.markers().into_iter().map(|m| (m.name, m.frame, m.shot)).collect();
        manager.update_all_timeline_markers(&mut host);
        let twice: Vec<_> = host.markers().into_iter().map(|m| (m.name, m.frame, m.shot)).collect();

        assert_eq!(once.len(), 6);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_shot_range_refreshes_markers() {
        let (mut host, manager) = host_with_shots(1);
        let id = ShotId::from("Camera");

        assert!(manager.set_shot_range(&mut host, &id, 0, 48));
        let markers = host.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!((markers[0].frame, markers[1].frame), (1, 48));

        assert!(!manager.set_shot_range(&mut host, &ShotId::from("Ghost"), 1, 2));
    }

    #[test]
    fn test_erase_all_keyframes_rebuilds_list() {
        let mut host = MemoryHost::new().with_frame_range(1, 120);
        for (name, start) in [("Wide", 10), ("Close", 40), ("Over", 80)] {
            let mut shot = Shot::new(ShotId::from(name));
            shot.set_range(start, start + 15);
            if name == "Close" {
                shot.animation = Some(AnimationData {
                    action: Some("CloseAction".to_string()),
                    keyframe_count: 7,
                });
            }
            host.insert_shot(shot);
        }
        for frame in 0..5 {
            host.add_marker("stray", frame * 10);
        }
        let mut manager = ShotListManager::from_list(ShotList::from_parts(
            vec![ShotId::from("Gone"), ShotId::from("Over")],
            Some(1),
        ));

        let report = manager.erase_all_keyframes(&mut host);

        assert_eq!(report.markers_cleared, 5);
        assert_eq!(report.shots_processed, 3);
        assert_eq!(report.animations_cleared, 1);
        assert_eq!(report.keyframes_removed, 7);
        assert_eq!(host.marker_count(), 0);
        assert_eq!(names(&manager), ["Wide", "Close", "Over"]);
        assert_eq!(manager.selected_index(), Some(0));
        assert_eq!(host.active_shot(), Some(ShotId::from("Wide")));
        for id in host.shot_ids() {
            let shot = host.shot(&id).unwrap();
            assert_eq!((shot.range.start, shot.range.end), (1, 120));
            assert!(shot.animation.is_none());
        }
    }

    #[test]
    fn test_erase_all_keyframes_empty_scene() {
        let mut host = MemoryHost::new();
        let list = ShotList::from_parts(vec![ShotId::from("Gone")], Some(0));
        let mut manager = ShotListManager::from_list(list);

        let report = manager.erase_all_keyframes(&mut host);
        assert_eq!(report, EraseReport::default());
        assert!(manager.list().is_empty());
        assert_eq!(manager.selected_index(), None);
    }

    #[test]
    fn test_view_selected() {
        let (mut host, manager) = host_with_shots(2);
        host.set_active_shot(None);
        assert!(manager.view_selected(&mut host));
        assert_eq!(host.active_shot(), Some(ShotId::from("Camera.001")));

        host.destroy_shot(&ShotId::from("Camera.001"));
        assert!(!manager.view_selected(&mut host));
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let (mut host, mut manager) = host_with_shots(2);
        assert!(!manager.select(&mut host, Some(5)));
        assert_eq!(manager.selected_index(), Some(1));

        assert!(manager.select(&mut host, Some(0)));
        assert_eq!(host.active_shot(), Some(ShotId::from("Camera")));
    }
}
