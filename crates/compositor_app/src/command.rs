// SPDX-License-Identifier: MIT OR Apache-2.0
//! Commands the UI layer can invoke on a session.

use compositor_host::{Frame, Projection, ShotId};
use compositor_resolution::{Axis, Orientation, PresetKind};
use compositor_shots::{Direction, EraseReport};
use serde::{Deserialize, Serialize};

/// One user command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Create a shot and append it to the list
    AddShot,
    /// Destroy the selected shot
    RemoveSelected,
    /// Move the selected shot up or down
    MoveSelected(Direction),
    /// Sort shots by start frame
    SortByStartFrame,
    /// Regenerate start/end markers for every shot
    UpdateTimelineMarkers,
    /// Reset animation, markers and ranges of every shot
    EraseAllKeyframes,
    /// Preview the selected shot
    ViewSelected,
    /// Select a list position (None clears the selection)
    Select(Option<usize>),
    /// Change a shot's frame range
    SetShotRange {
        /// Shot to edit
        shot: ShotId,
        /// First frame
        start: Frame,
        /// Last frame
        end: Frame,
    },
    /// Edit one resolution axis
    SetAxis {
        /// Axis to edit
        axis: Axis,
        /// New pixel count
        value: i64,
    },
    /// Edit both resolution axes
    SetResolution {
        /// Horizontal pixels
        x: i64,
        /// Vertical pixels
        y: i64,
    },
    /// Turn the aspect link on or off
    ToggleLink,
    /// Apply a cinema or print preset by ID
    ApplyPreset {
        /// Preset table
        kind: PresetKind,
        /// Preset ID, such as `4K_DCI` or `A4`
        id: String,
    },
    /// Set the output frame rate
    SetFrameRate(f32),
    /// Set the preset orientation
    SetOrientation(Orientation),
    /// Set the print density
    SetPrintDpi(i64),
    /// Set the scene camera type
    SetProjection(Projection),
    /// Set the active shot's focal length
    SetFocalLength(f32),
    /// Set the active shot's clip distances
    SetClipRange {
        /// Near clip distance
        start: f32,
        /// Far clip distance
        end: f32,
    },
}

impl Command {
    /// Human-readable description for logs
    pub fn description(&self) -> &'static str {
        match self {
            Self::AddShot => "Add Shot",
            Self::RemoveSelected => "Remove Shot",
            Self::MoveSelected(_) => "Move Shot",
            Self::SortByStartFrame => "Sort Shots",
            Self::UpdateTimelineMarkers => "Update Timeline",
            Self::EraseAllKeyframes => "Erase All Keyframes",
            Self::ViewSelected => "View Selected Shot",
            Self::Select(_) => "Select Shot",
            Self::SetShotRange { .. } => "Set Shot Range",
            Self::SetAxis { .. } => "Set Resolution Axis",
            Self::SetResolution { .. } => "Set Render Resolution",
            Self::ToggleLink => "Toggle Resolution Link",
            Self::ApplyPreset { kind: PresetKind::Cinema, .. } => "Set Cinema Resolution",
            Self::ApplyPreset { kind: PresetKind::Print, .. } => "Set Print Resolution",
            Self::SetFrameRate(_) => "Set Frame Rate",
            Self::SetOrientation(_) => "Set Orientation",
            Self::SetPrintDpi(_) => "Set Print DPI",
            Self::SetProjection(_) => "Set Camera Type",
            Self::SetFocalLength(_) => "Set Focal Length",
            Self::SetClipRange { .. } => "Set Clip Range",
        }
    }
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    /// The command changed state
    Applied,
    /// A precondition was not met; nothing changed
    Skipped,
    /// A shot was created
    ShotCreated(ShotId),
    /// Shots were reset
    Erased(EraseReport),
}

impl CommandOutcome {
    /// Map an applied flag to an outcome
    pub fn applied_if(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Skipped
        }
    }

    /// Whether the command was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}
