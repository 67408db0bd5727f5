// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolution state and its limits.

use crate::preset::{CinemaFormat, PrintFormat};
use serde::{Deserialize, Serialize};

/// Smallest resolution on either axis
pub const MIN_RESOLUTION: u32 = 4;
/// Largest resolution on either axis
pub const MAX_RESOLUTION: u32 = 65536;
/// Lowest print density
pub const MIN_PRINT_DPI: u32 = 72;
/// Highest print density
pub const MAX_PRINT_DPI: u32 = 1200;
/// Lowest frame rate
pub const MIN_FRAME_RATE: f32 = 1.0;
/// Highest frame rate
pub const MAX_FRAME_RATE: f32 = 120.0;

/// Resolution axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal pixels
    X,
    /// Vertical pixels
    Y,
}

/// Output orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Presets keep their native width and height
    #[default]
    Horizontal,
    /// Landscape presets are turned on their side
    Vertical,
}

impl Orientation {
    /// Orient a preset size. Vertical swaps only sizes wider than tall.
    pub fn orient(self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Self::Vertical if width > height => (height, width),
            _ => (width, height),
        }
    }
}

/// Render resolution settings of a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionState {
    /// Horizontal pixels
    pub x: u32,
    /// Vertical pixels
    pub y: u32,
    /// Whether one axis follows the other
    pub linked: bool,
    /// Width over height, captured when the link is enabled
    pub aspect_ratio: f64,
    /// Axis the user edited last
    pub last_edited: Axis,
    /// Preset orientation
    pub orientation: Orientation,
    /// Last cinema format chosen
    pub cinema_format: CinemaFormat,
    /// Last print format chosen
    pub print_format: PrintFormat,
    /// Print density in dots per inch
    pub print_dpi: u32,
    /// Output frame rate
    pub frame_rate: f32,
}

impl Default for ResolutionState {
    fn default() -> Self {
        Self {
            x: 1920,
            y: 1080,
            linked: false,
            aspect_ratio: 1.0,
            last_edited: Axis::Y,
            orientation: Orientation::Horizontal,
            cinema_format: CinemaFormat::FullHd,
            print_format: PrintFormat::A4,
            print_dpi: 300,
            frame_rate: 24.0,
        }
    }
}

impl ResolutionState {
    /// Bring every field back inside its limits
    pub fn sanitized(mut self) -> Self {
        self.x = clamp_resolution(i64::from(self.x));
        self.y = clamp_resolution(i64::from(self.y));
        self.print_dpi = self.print_dpi.clamp(MIN_PRINT_DPI, MAX_PRINT_DPI);
        self.frame_rate = clamp_frame_rate(self.frame_rate).unwrap_or(Self::default().frame_rate);
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            self.aspect_ratio = f64::from(self.x) / f64::from(self.y);
        }
        self
    }
}

/// Clamp a resolution value into `MIN_RESOLUTION..=MAX_RESOLUTION`
pub fn clamp_resolution(value: i64) -> u32 {
    value.clamp(i64::from(MIN_RESOLUTION), i64::from(MAX_RESOLUTION)) as u32
}

/// Clamp a frame rate, None if it is not a number
pub fn clamp_frame_rate(fps: f32) -> Option<f32> {
    fps.is_finite().then(|| fps.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orient() {
        assert_eq!(Orientation::Horizontal.orient(4096, 2160), (4096, 2160));
        assert_eq!(Orientation::Vertical.orient(4096, 2160), (2160, 4096));
        // Already portrait sizes stay as they are
        assert_eq!(Orientation::Vertical.orient(2480, 3508), (2480, 3508));
    }

    #[test]
    fn test_sanitized() {
        let state = ResolutionState {
            x: 1,
            y: 100_000,
            aspect_ratio: f64::NAN,
            print_dpi: 5000,
            frame_rate: f32::INFINITY,
            ..ResolutionState::default()
        }
        .sanitized();

        assert_eq!((state.x, state.y), (MIN_RESOLUTION, MAX_RESOLUTION));
        assert_eq!(state.print_dpi, MAX_PRINT_DPI);
        assert_eq!(state.frame_rate, 24.0);
        assert!(state.aspect_ratio > 0.0);
    }

    #[test]
    fn test_clamp_limits() {
        assert_eq!(clamp_resolution(-20), MIN_RESOLUTION);
        assert_eq!(clamp_resolution(70_000), MAX_RESOLUTION);
        assert_eq!(clamp_frame_rate(240.0), Some(MAX_FRAME_RATE));
        assert_eq!(clamp_frame_rate(f32::NAN), None);
    }
}
