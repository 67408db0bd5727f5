// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document sessions.
//!
//! A [`Session`] owns the scene-scoped state of one open document: the shot
//! list, the resolution settings and the scene camera type. Opening a session
//! registers that state as host scene properties (restoring any stored
//! values), every command writes it back, and closing unregisters it.
//!
//! Host faults during registration, persistence or teardown are logged and
//! the remaining steps still run.

use crate::command::{Command, CommandOutcome};
use crate::settings::CompositorSettings;
use compositor_host::{HostError, Marker, Projection, SceneHost, ShotId};
use compositor_resolution::{ResolutionResolver, ResolutionState};
use compositor_shots::{LensController, ShotList, ShotListManager, ShotRow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Scene property holding the ordered shot keys
pub const PROP_SHOT_LIST: &str = "shot_list";
/// Scene property holding the selected position (`-1` for none)
pub const PROP_SHOT_LIST_INDEX: &str = "shot_list_index";
/// Scene property holding the resolution settings
pub const PROP_RESOLUTION: &str = "resolution";
/// Scene property holding the camera type
pub const PROP_CAMERA_TYPE: &str = "camera_type";

/// Every scene property a session registers, in registration order
pub const PROPERTY_KEYS: [&str; 4] = [
    PROP_SHOT_LIST,
    PROP_SHOT_LIST_INDEX,
    PROP_RESOLUTION,
    PROP_CAMERA_TYPE,
];

/// One open document bound to its host
pub struct Session<H: SceneHost> {
    host: H,
    shots: ShotListManager,
    resolution: ResolutionResolver,
    lens: LensController,
}

impl<H: SceneHost> Session<H> {
    /// Open a session, restoring state stored in the host's scene properties
    pub fn open(mut host: H, settings: &CompositorSettings) -> Self {
        let defaults = settings.initial_resolution();
        register_properties(&mut host, &defaults, settings.camera_type);

        let entries: Vec<ShotId> = restore(&host, PROP_SHOT_LIST).unwrap_or_default();
        let index: i64 = restore(&host, PROP_SHOT_LIST_INDEX).unwrap_or(-1);
        let list = ShotList::from_parts(entries, usize::try_from(index).ok());

        let resolution: ResolutionState = restore(&host, PROP_RESOLUTION).unwrap_or(defaults);
        let projection: Projection =
            restore(&host, PROP_CAMERA_TYPE).unwrap_or(settings.camera_type);

        let mut session = Self {
            host,
            shots: ShotListManager::from_list(list),
            resolution: ResolutionResolver::from_state(resolution),
            lens: LensController::new(projection),
        };
        session.resolution.publish(&mut session.host);
        session.persist();

        tracing::info!(
            "Opened session: {} shots, {}x{}",
            session.shots.list().len(),
            session.resolution.state().x,
            session.resolution.state().y
        );
        session
    }

    /// Run one command, then store the resulting state in the host
    pub fn execute(&mut self, command: &Command) -> CommandOutcome {
        let outcome = self.dispatch(command);
        self.persist();

        if outcome.is_skipped() {
            tracing::debug!("{}: skipped", command.description());
        } else {
            tracing::info!("{}: done", command.description());
        }
        outcome
    }

    /// Close the session, unregister its properties and hand back the host
    pub fn close(mut self) -> H {
        for key in PROPERTY_KEYS.iter().rev() {
            if let Err(e) = self.host.unregister_property(key) {
                tracing::error!("Error unregistering property {}: {}", key, e);
            }
        }
        tracing::info!("Closed session");
        self.host
    }

    /// The host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access for edits made outside the compositor
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The shot list
    pub fn shots(&self) -> &ShotListManager {
        &self.shots
    }

    /// The resolution settings
    pub fn resolution(&self) -> &ResolutionResolver {
        &self.resolution
    }

    /// The lens controls
    pub fn lens(&self) -> &LensController {
        &self.lens
    }

    /// Everything the UI layer shows, resolved against the host
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            shots: self.shots.rows(&self.host),
            selected: self.shots.selected_index(),
            active_shot: self.host.active_shot(),
            markers: self.host.markers(),
            resolution: *self.resolution.state(),
            camera_type: self.lens.projection(),
        }
    }

    fn dispatch(&mut self, command: &Command) -> CommandOutcome {
        let host = &mut self.host;
        match command {
            Command::AddShot => CommandOutcome::ShotCreated(self.shots.add_shot(host)),
            Command::RemoveSelected => {
                CommandOutcome::applied_if(self.shots.remove_selected(host))
            }
            Command::MoveSelected(direction) => {
                CommandOutcome::applied_if(self.shots.move_selected(host, *direction))
            }
            Command::SortByStartFrame => {
                self.shots.sort_by_start_frame(host);
                CommandOutcome::Applied
            }
            Command::UpdateTimelineMarkers => {
                self.shots.update_all_timeline_markers(host);
                CommandOutcome::Applied
            }
            Command::EraseAllKeyframes => {
                CommandOutcome::Erased(self.shots.erase_all_keyframes(host))
            }
            Command::ViewSelected => CommandOutcome::applied_if(self.shots.view_selected(host)),
            Command::Select(index) => CommandOutcome::applied_if(self.shots.select(host, *index)),
            Command::SetShotRange { shot, start, end } => {
                CommandOutcome::applied_if(self.shots.set_shot_range(host, shot, *start, *end))
            }
            Command::SetAxis { axis, value } => {
                self.resolution.set_axis(host, *axis, *value);
                CommandOutcome::Applied
            }
            Command::SetResolution { x, y } => {
                self.resolution.set_resolution(host, *x, *y);
                CommandOutcome::Applied
            }
            Command::ToggleLink => {
                self.resolution.toggle_link(host);
                CommandOutcome::Applied
            }
            Command::ApplyPreset { kind, id } => {
                CommandOutcome::applied_if(self.resolution.apply_preset(host, *kind, id))
            }
            Command::SetFrameRate(fps) => {
                self.resolution.set_frame_rate(host, *fps);
                CommandOutcome::Applied
            }
            Command::SetOrientation(orientation) => {
                self.resolution.set_orientation(host, *orientation);
                CommandOutcome::Applied
            }
            Command::SetPrintDpi(dpi) => {
                self.resolution.set_print_dpi(host, *dpi);
                CommandOutcome::Applied
            }
            Command::SetProjection(projection) => {
                self.lens.set_projection(host, *projection);
                CommandOutcome::Applied
            }
            Command::SetFocalLength(focal_length) => {
                self.lens.set_focal_length(host, *focal_length);
                CommandOutcome::Applied
            }
            Command::SetClipRange { start, end } => {
                CommandOutcome::applied_if(self.lens.set_clip_range(host, *start, *end))
            }
        }
    }

    fn persist(&mut self) {
        let list = self.shots.list();
        let values = [
            (PROP_SHOT_LIST, serde_json::to_value(list.entries())),
            (PROP_SHOT_LIST_INDEX, Ok(json!(list.selected_index_i64()))),
            (PROP_RESOLUTION, serde_json::to_value(self.resolution.state())),
            (PROP_CAMERA_TYPE, serde_json::to_value(self.lens.projection())),
        ];

        for (key, value) in values {
            let result = match value {
                Ok(value) => self.host.set_property(key, value),
                Err(e) => Err(HostError::Rejected(e.to_string())),
            };
            if let Err(e) = result {
                tracing::warn!("Could not store property {}: {}", key, e);
            }
        }
    }
}

fn register_properties<H: SceneHost>(
    host: &mut H,
    resolution: &ResolutionState,
    projection: Projection,
) {
    let defaults = [
        (PROP_SHOT_LIST, json!([])),
        (PROP_SHOT_LIST_INDEX, json!(-1)),
        (PROP_RESOLUTION, serde_json::to_value(resolution).unwrap_or(Value::Null)),
        (PROP_CAMERA_TYPE, serde_json::to_value(projection).unwrap_or(Value::Null)),
    ];

    for (key, default) in defaults {
        match host.register_property(key, default) {
            Ok(()) => {}
            Err(HostError::AlreadyRegistered(_)) => {
                tracing::debug!("Property {} already registered, keeping stored value", key);
            }
            Err(e) => tracing::error!("Error registering property {}: {}", key, e),
        }
    }
}

fn restore<H: SceneHost, T: DeserializeOwned>(host: &H, key: &str) -> Option<T> {
    let value = host.property(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(restored) => Some(restored),
        Err(e) => {
            tracing::warn!("Ignoring stored property {}: {}", key, e);
            None
        }
    }
}

/// Display state of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Shot list rows
    pub shots: Vec<ShotRow>,
    /// Selected row
    pub selected: Option<usize>,
    /// Scene active shot
    pub active_shot: Option<ShotId>,
    /// Timeline markers
    pub markers: Vec<Marker>,
    /// Resolution settings
    pub resolution: ResolutionState,
    /// Scene camera type
    pub camera_type: Projection,
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shots ({}):", self.shots.len())?;
        for (index, row) in self.shots.iter().enumerate() {
            let cursor = if self.selected == Some(index) { '>' } else { ' ' };
            match row {
                ShotRow::Live { id, range } => {
                    writeln!(
                        f,
                        "  {cursor} {:<16} {}..{} ({} frames)",
                        id.as_str(),
                        range.start,
                        range.end,
                        range.len()
                    )?;
                }
                ShotRow::Dangling { id } => {
                    writeln!(f, "  {cursor} {:<16} ERROR", id.as_str())?;
                }
            }
        }

        match &self.active_shot {
            Some(id) => writeln!(f, "Active shot: {id}")?,
            None => writeln!(f, "Active shot: none")?,
        }
        writeln!(f, "Markers: {}", self.markers.len())?;

        let resolution = &self.resolution;
        write!(f, "Resolution: {}x{}", resolution.x, resolution.y)?;
        if resolution.linked {
            write!(
                f,
                " (linked at {:.3}, follows {:?})",
                resolution.aspect_ratio, resolution.last_edited
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Presets: {}, {} at {} dpi",
            resolution.cinema_format.id(),
            resolution.print_format.id(),
            resolution.print_dpi
        )?;
        writeln!(f, "Frame rate: {} fps", resolution.frame_rate)?;
        write!(f, "Camera type: {}", self.camera_type.name())
    }
}
