//! Shared types for the Tactile input and movement crates.
//!
//! These are the plain values that cross the boundary between the host
//! engine and the controls: pointer events, lifecycle notifications, the
//! direction bitmask and a minimal rectangle.

pub mod direction;
pub mod lifecycle;
pub mod math;
pub mod pointer;

pub use direction::Direction;
pub use lifecycle::Lifecycle;
pub use math::Rect;
pub use pointer::{PointerEvent, PointerId};

/// Re-export of the vector type used throughout the workspace.
pub use glam::Vec2;
