// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered shot references with a selection cursor.

use compositor_host::{FrameRange, ShotId, ShotStore};
use serde::{Deserialize, Serialize};

/// Direction to move the selected entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the start of the list
    Up,
    /// Towards the end of the list
    Down,
}

/// Ordered shot references and the selected position.
///
/// Order is meaningful: it is the order shots are shown and reviewed in.
/// The selection is always `None` or a valid index, including after
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredShotList")]
pub struct ShotList {
    entries: Vec<ShotId>,
    selected: Option<usize>,
}

#[derive(Deserialize)]
struct StoredShotList {
    #[serde(default)]
    entries: Vec<ShotId>,
    #[serde(default)]
    selected: Option<usize>,
}

impl From<StoredShotList> for ShotList {
    fn from(stored: StoredShotList) -> Self {
        Self::from_parts(stored.entries, stored.selected)
    }
}

impl ShotList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from stored parts. An out-of-range selection is dropped.
    pub fn from_parts(entries: Vec<ShotId>, selected: Option<usize>) -> Self {
        let selected = selected.filter(|index| *index < entries.len());
        Self { entries, selected }
    }

    /// All entries in order
    pub fn entries(&self) -> &[ShotId] {
        &self.entries
    }

    /// Entry at a position
    pub fn get(&self, index: usize) -> Option<&ShotId> {
        self.entries.get(index)
    }

    /// Position of a shot in the list
    pub fn position(&self, id: &ShotId) -> Option<usize> {
        self.entries.iter().position(|entry| entry == id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected position
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selected entry
    pub fn selected_shot(&self) -> Option<&ShotId> {
        self.selected.and_then(|index| self.entries.get(index))
    }

    /// Selected position as stored by hosts, `-1` when nothing is selected
    pub fn selected_index_i64(&self) -> i64 {
        self.selected
            .and_then(|index| i64::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// Resolve every entry for display
    pub fn rows<H: ShotStore + ?Sized>(&self, host: &H) -> Vec<ShotRow> {
        self.entries
            .iter()
            .map(|id| match host.shot(id) {
                Some(shot) => ShotRow::Live {
                    id: id.clone(),
                    range: shot.range,
                },
                None => ShotRow::Dangling { id: id.clone() },
            })
            .collect()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<ShotId> {
        &mut self.entries
    }

    pub(crate) fn set_selected(&mut self, selected: Option<usize>) {
        debug_assert!(selected.map_or(true, |index| index < self.entries.len()));
        self.selected = selected;
    }
}

/// One resolved list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotRow {
    /// The shot resolves in the host
    Live {
        /// Shot key
        id: ShotId,
        /// Current range
        range: FrameRange,
    },
    /// The shot no longer exists in the host
    Dangling {
        /// Stale shot key
        id: ShotId,
    },
}

impl ShotRow {
    /// Shot key of this row
    pub fn id(&self) -> &ShotId {
        match self {
            Self::Live { id, .. } | Self::Dangling { id } => id,
        }
    }

    /// Whether the entry failed to resolve
    pub fn is_dangling(&self) -> bool {
        matches!(self, Self::Dangling { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compositor_host::MemoryHost;

    #[test]
    fn test_from_parts_drops_invalid_selection() {
        let ids = vec![ShotId::from("Camera"), ShotId::from("Camera.001")];
        assert_eq!(ShotList::from_parts(ids.clone(), Some(1)).selected(), Some(1));
        assert_eq!(ShotList::from_parts(ids, Some(2)).selected(), None);
        assert_eq!(ShotList::from_parts(Vec::new(), Some(0)).selected_index_i64(), -1);
    }

    #[test]
    fn test_deserialize_drops_invalid_selection() {
        let list: ShotList =
            serde_json::from_str(r#"{"entries":["Camera"],"selected":3}"#).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.selected(), None);

        let list: ShotList =
            serde_json::from_str(r#"{"entries":["Camera","Camera.001"],"selected":1}"#).unwrap();
        assert_eq!(list.selected_shot(), Some(&ShotId::from("Camera.001")));
    }

    #[test]
    fn test_rows_mark_dangling_entries() {
        let mut host = MemoryHost::new();
        let live = host.create_shot();
        let list = ShotList::from_parts(vec![live.clone(), ShotId::from("Deleted")], Some(0));

        let rows = list.rows(&host);
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].is_dangling());
        assert_eq!(rows[0].id(), &live);
        assert!(rows[1].is_dangling());
    }
}
