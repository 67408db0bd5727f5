// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host contract for the compositor.
//!
//! The compositor never owns scene objects. Everything it touches lives in a
//! host application and is reached through the traits in [`scene`]:
//! - Shot store (camera-like entities with a frame range)
//! - Timeline marker store
//! - Viewport control (active shot, camera preview)
//! - Render output sink (resolution, frame rate)
//! - Scene-level key/value properties
//!
//! [`MemoryHost`] is a complete in-memory host used by tests and the
//! command-line runner.

pub mod error;
pub mod marker;
pub mod memory;
pub mod scene;
pub mod shot;

pub use error::{HostError, Result};
pub use marker::{Marker, MarkerId};
pub use memory::{MemoryHost, ViewMode};
pub use scene::{MarkerStore, PropertyStore, RenderOutput, SceneHost, ShotStore, Viewport};
pub use shot::{AnimationData, Frame, FrameRange, Lens, Projection, Shot, ShotId};
