// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render resolution for the compositor.
//!
//! This crate keeps the output resolution consistent:
//! - X/Y edits with an optional aspect lock
//! - Cinema formats (with their frame rate)
//! - Print formats at a chosen density
//! - Horizontal/vertical orientation
//!
//! Every change is pushed to the host's
//! [`RenderOutput`](compositor_host::RenderOutput) before the call returns.

pub mod preset;
pub mod resolver;
pub mod state;

pub use preset::{
    mm_to_pixels, CinemaFormat, CinemaPreset, PresetError, PresetKind, PrintFormat, PrintPreset,
};
pub use resolver::ResolutionResolver;
pub use state::{
    Axis, Orientation, ResolutionState, MAX_FRAME_RATE, MAX_PRINT_DPI, MAX_RESOLUTION,
    MIN_FRAME_RATE, MIN_PRINT_DPI, MIN_RESOLUTION,
};
