// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compositor application layer.
//!
//! Ties the shot list, resolution and lens controls to a host scene:
//! - [`Session`] opens a document, runs [`Command`]s and stores their state
//! - [`CompositorSettings`] loads runner and resolution defaults from RON
//! - [`parse_script`] reads command scripts for the `compositor` binary

pub mod command;
pub mod script;
pub mod session;
pub mod settings;

pub use command::{Command, CommandOutcome};
pub use script::{load_script, parse_script, ScriptError};
pub use session::{
    Session, SessionSnapshot, PROPERTY_KEYS, PROP_CAMERA_TYPE, PROP_RESOLUTION, PROP_SHOT_LIST,
    PROP_SHOT_LIST_INDEX,
};
pub use settings::{CompositorSettings, SettingsError, DEFAULT_LOG_FILTER};
