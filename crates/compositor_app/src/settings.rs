// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compositor settings.
//!
//! Settings are stored as RON and provide:
//! - The scene the command runner builds (frame range, viewport)
//! - Resolution defaults for new documents
//! - The default camera type
//! - The log filter

use compositor_host::{Frame, MemoryHost, Projection};
use compositor_resolution::{CinemaFormat, Orientation, PrintFormat, ResolutionState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "compositor.ron";

/// Log filter used when neither the environment nor the settings name one
pub const DEFAULT_LOG_FILTER: &str =
    "compositor_app=info,compositor_shots=info,compositor_resolution=info,compositor_host=warn";

/// Errors while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid settings RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Settings could not be written as RON
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// File was written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },
}

/// Scene built by the command runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// First frame of the scene
    pub frame_start: Frame,
    /// Last frame of the scene
    pub frame_end: Frame,
    /// Whether the scene has a viewport to preview shots in
    pub has_viewport: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            frame_start: 1,
            frame_end: 250,
            has_viewport: true,
        }
    }
}

/// Resolution settings for new documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionDefaults {
    /// Horizontal pixels
    pub x: u32,
    /// Vertical pixels
    pub y: u32,
    /// Preset orientation
    pub orientation: Orientation,
    /// Initial cinema format
    pub cinema_format: CinemaFormat,
    /// Initial print format
    pub print_format: PrintFormat,
    /// Print density
    pub print_dpi: u32,
    /// Output frame rate
    pub frame_rate: f32,
}

impl Default for ResolutionDefaults {
    fn default() -> Self {
        let state = ResolutionState::default();
        Self {
            x: state.x,
            y: state.y,
            orientation: state.orientation,
            cinema_format: state.cinema_format,
            print_format: state.print_format,
            print_dpi: state.print_dpi,
            frame_rate: state.frame_rate,
        }
    }
}

/// Complete compositor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorSettings {
    /// Settings format version
    pub version: u32,
    /// Runner scene
    pub scene: SceneSettings,
    /// Resolution defaults
    pub resolution: ResolutionDefaults,
    /// Default camera type
    pub camera_type: Projection,
    /// Tracing filter directives
    pub log_filter: String,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            scene: SceneSettings::default(),
            resolution: ResolutionDefaults::default(),
            camera_type: Projection::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CompositorSettings {
    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_ron_str(&content)?;
        tracing::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Parse settings from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, SettingsError> {
        let settings: CompositorSettings = ron::from_str(content)?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(SettingsError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        Ok(settings)
    }

    /// Render settings as pretty RON
    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// Settings file path inside a directory
    pub fn settings_file_path(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_FILE_NAME)
    }

    /// Resolution state a new document starts with
    pub fn initial_resolution(&self) -> ResolutionState {
        let defaults = &self.resolution;
        ResolutionState {
            x: defaults.x,
            y: defaults.y,
            orientation: defaults.orientation,
            cinema_format: defaults.cinema_format,
            print_format: defaults.print_format,
            print_dpi: defaults.print_dpi,
            frame_rate: defaults.frame_rate,
            ..ResolutionState::default()
        }
        .sanitized()
    }

    /// Build the in-memory scene the runner drives
    pub fn build_host(&self) -> MemoryHost {
        let host = MemoryHost::new().with_frame_range(self.scene.frame_start, self.scene.frame_end);
        if self.scene.has_viewport {
            host
        } else {
            host.without_viewport()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compositor_host::ShotStore;

    #[test]
    fn test_default_settings() {
        let settings = CompositorSettings::default();
        assert_eq!(settings.version, SETTINGS_FORMAT_VERSION);
        assert_eq!(settings.resolution.print_dpi, 300);
        assert_eq!(settings.camera_type, Projection::Perspective);
    }

    #[test]
    fn test_default_log_filter_parses() {
        let settings = CompositorSettings::default();
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
        assert!(tracing_subscriber::EnvFilter::try_new(&settings.log_filter).is_ok());
    }

    #[test]
    fn test_serialization() {
        let mut settings = CompositorSettings::default();
        settings.scene.frame_end = 96;
        settings.resolution.cinema_format = CinemaFormat::Imax;

        let ron_str = settings.to_ron_string().unwrap();
        let loaded = CompositorSettings::from_ron_str(&ron_str).unwrap();
        assert_eq!(loaded.scene.frame_end, 96);
        assert_eq!(loaded.resolution.cinema_format, CinemaFormat::Imax);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings = CompositorSettings::from_ron_str(
            "(scene: (frame_end: 48), resolution: (orientation: Vertical, print_dpi: 9000))",
        )
        .unwrap();
        assert_eq!(settings.scene.frame_start, 1);
        assert_eq!(settings.scene.frame_end, 48);

        let state = settings.initial_resolution();
        assert_eq!(state.orientation, Orientation::Vertical);
        assert_eq!(state.print_dpi, compositor_resolution::MAX_PRINT_DPI);
        assert_eq!(settings.build_host().frame_range().end, 48);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("compositor-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = CompositorSettings::settings_file_path(&dir);

        let mut settings = CompositorSettings::default();
        settings.scene.has_viewport = false;
        settings.save(&path).unwrap();

        let loaded = CompositorSettings::load(&path).unwrap();
        assert!(!loaded.scene.has_viewport);
        assert_eq!(loaded.build_host().view_mode(), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let result = CompositorSettings::from_ron_str("(version: 99)");
        assert!(matches!(
            result,
            Err(SettingsError::UnsupportedVersion { found: 99, .. })
        ));
    }
}
