// SPDX-License-Identifier: MIT OR Apache-2.0
//! Linked render resolution.
//!
//! While the link is on, the axis that was not edited last is derived from
//! the other one and the aspect ratio captured when the link was enabled.
//! Every mutation ends by pushing the resolution to the render output.

use crate::preset::{CinemaFormat, PresetKind, PrintFormat};
use crate::state::{
    clamp_frame_rate, clamp_resolution, Axis, Orientation, ResolutionState, MAX_PRINT_DPI,
    MIN_PRINT_DPI,
};
use compositor_host::RenderOutput;

// Absorbs the rounding error of the stored ratio, so that enabling the link
// on an exact size does not shave a pixel off the derived axis.
const FLOOR_TOLERANCE: f64 = 1e-9;

fn floor_pixels(value: f64) -> u32 {
    clamp_resolution((value + FLOOR_TOLERANCE).floor() as i64)
}

/// Owner of the scene's resolution settings
#[derive(Debug, Clone, Default)]
pub struct ResolutionResolver {
    state: ResolutionState,
}

impl ResolutionResolver {
    /// Create a resolver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver from restored settings
    pub fn from_state(state: ResolutionState) -> Self {
        Self {
            state: state.sanitized(),
        }
    }

    /// Current settings
    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Push the current resolution and frame rate to the output
    pub fn publish<O: RenderOutput + ?Sized>(&self, output: &mut O) {
        output.set_resolution(self.state.x, self.state.y);
        output.set_frame_rate(self.state.frame_rate);
    }

    /// Re-derive the follower axis if linked, then push the resolution
    pub fn recompute_linked<O: RenderOutput + ?Sized>(&mut self, output: &mut O) {
        let state = &mut self.state;
        if state.linked {
            match state.last_edited {
                Axis::X => state.y = floor_pixels(f64::from(state.x) / state.aspect_ratio),
                Axis::Y => state.x = floor_pixels(f64::from(state.y) * state.aspect_ratio),
            }
        }
        output.set_resolution(state.x, state.y);
    }

    /// Edit one axis. Out-of-range values are clamped.
    pub fn set_axis<O: RenderOutput + ?Sized>(&mut self, output: &mut O, axis: Axis, value: i64) {
        let value = clamp_resolution(value);
        self.state.last_edited = axis;
        match axis {
            Axis::X => self.state.x = value,
            Axis::Y => self.state.y = value,
        }
        self.recompute_linked(output);
    }

    /// Edit both axes, X first
    pub fn set_resolution<O: RenderOutput + ?Sized>(&mut self, output: &mut O, x: i64, y: i64) {
        self.set_axis(output, Axis::X, x);
        self.set_axis(output, Axis::Y, y);
    }

    /// Turn the aspect link on or off.
    ///
    /// Turning it on captures the current `x / y` as the aspect ratio. Both
    /// axes are at least `MIN_RESOLUTION`, so the ratio is always defined.
    pub fn toggle_link<O: RenderOutput + ?Sized>(&mut self, output: &mut O) {
        self.state.linked = !self.state.linked;
        if self.state.linked {
            self.state.aspect_ratio = f64::from(self.state.x) / f64::from(self.state.y);
            tracing::debug!("Resolution linked at aspect {:.4}", self.state.aspect_ratio);
        }
        self.recompute_linked(output);
    }

    /// Apply a preset by ID. Unknown IDs are logged and ignored.
    pub fn apply_preset<O: RenderOutput + ?Sized>(
        &mut self,
        output: &mut O,
        kind: PresetKind,
        id: &str,
    ) -> bool {
        let parsed = match kind {
            PresetKind::Cinema => id
                .parse::<CinemaFormat>()
                .map(|format| self.apply_cinema_format(output, format)),
            PresetKind::Print => id
                .parse::<PrintFormat>()
                .map(|format| self.apply_print_format(output, format)),
        };
        match parsed {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{}", e);
                false
            }
        }
    }

    /// Apply a cinema format and its frame rate.
    ///
    /// Does not touch the last edited axis, so an active link keeps deriving
    /// from whichever axis the user edited by hand.
    pub fn apply_cinema_format<O: RenderOutput + ?Sized>(
        &mut self,
        output: &mut O,
        format: CinemaFormat,
    ) {
        let preset = format.preset();
        let (x, y) = self.state.orientation.orient(preset.width, preset.height);

        self.state.cinema_format = format;
        self.state.x = clamp_resolution(i64::from(x));
        self.state.y = clamp_resolution(i64::from(y));
        self.state.frame_rate = preset.frame_rate;
        output.set_frame_rate(preset.frame_rate);
        tracing::info!(
            "Cinema format {}: {}x{} at {} fps",
            preset.name,
            x,
            y,
            preset.frame_rate
        );

        self.recompute_linked(output);
    }

    /// Apply a paper size at the current print density
    pub fn apply_print_format<O: RenderOutput + ?Sized>(
        &mut self,
        output: &mut O,
        format: PrintFormat,
    ) {
        let (width, height) = format.pixels_at(self.state.print_dpi);
        let (x, y) = self.state.orientation.orient(width, height);

        self.state.print_format = format;
        self.state.x = clamp_resolution(i64::from(x));
        self.state.y = clamp_resolution(i64::from(y));
        tracing::info!(
            "Print format {} at {} dpi: {}x{}",
            format.name(),
            self.state.print_dpi,
            x,
            y
        );

        self.recompute_linked(output);
    }

    /// Set and push the output frame rate, clamped to the supported range
    pub fn set_frame_rate<O: RenderOutput + ?Sized>(&mut self, output: &mut O, fps: f32) {
        let Some(fps) = clamp_frame_rate(fps) else {
            tracing::warn!("Frame rate {} ignored", fps);
            return;
        };
        self.state.frame_rate = fps;
        output.set_frame_rate(fps);
    }

    /// Change orientation and re-apply the current cinema format
    pub fn set_orientation<O: RenderOutput + ?Sized>(
        &mut self,
        output: &mut O,
        orientation: Orientation,
    ) {
        self.state.orientation = orientation;
        self.apply_cinema_format(output, self.state.cinema_format);
    }

    /// Change print density and re-apply the current print format
    pub fn set_print_dpi<O: RenderOutput + ?Sized>(&mut self, output: &mut O, dpi: i64) {
        self.state.print_dpi =
            dpi.clamp(i64::from(MIN_PRINT_DPI), i64::from(MAX_PRINT_DPI)) as u32;
        self.apply_print_format(output, self.state.print_format);
    }
}
