// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command scripts.
//!
//! A script is a RON list of [`Command`]s, run in order against one session.

use crate::command::Command;
use std::path::Path;
use thiserror::Error;

/// Errors while loading a script
#[derive(Debug, Error)]
pub enum ScriptError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a valid command list
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Parse a script from RON text
pub fn parse_script(content: &str) -> Result<Vec<Command>, ScriptError> {
    Ok(ron::from_str(content)?)
}

/// Load a script from a file
pub fn load_script(path: &Path) -> Result<Vec<Command>, ScriptError> {
    let content = std::fs::read_to_string(path)?;
    let commands = parse_script(&content)?;
    tracing::debug!("Loaded {} commands from {:?}", commands.len(), path);
    Ok(commands)
}
