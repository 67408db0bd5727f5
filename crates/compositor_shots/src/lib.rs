// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shot list management for the compositor.
//!
//! This crate keeps a user-curated list of shots in sync with the host scene:
//! - Ordered shot references with a selection cursor
//! - Active shot and viewport preview follow the selection
//! - Start/end timeline markers per shot
//! - Bulk reset of shot animation and ranges
//! - Lens control for the active shot
//!
//! ## Architecture
//!
//! The list holds only [`ShotId`](compositor_host::ShotId) keys. Shots are
//! resolved through the host on every access, so a removed shot shows up as a
//! [`ShotRow::Dangling`] entry instead of an error.

pub mod lens;
pub mod list;
pub mod manager;
pub mod markers;

pub use lens::LensController;
pub use list::{Direction, ShotList, ShotRow};
pub use manager::{EraseReport, ShotListManager};
pub use markers::{end_marker_name, regenerate_shot_markers, start_marker_name};
