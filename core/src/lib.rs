//! Tactile Core - touchscreen virtual controls
//!
//! Engine-agnostic D-pad, joystick and button controls. The host forwards
//! pointer events (already in each control's local space) and lifecycle
//! notifications, and drains the events each control queues.
//!
//! # Architecture
//!
//! - [`TouchControl`] - Input and lifecycle surface shared by every control
//! - [`TouchPad`] - Ownership, direction and deferred-release state shared by pads
//! - [`DPad`] - Square eight-way pad with a rectangular deadzone
//! - [`Joystick`] - Radial stick with optional [`SpeedMonitor`]
//! - [`TouchButton`] - Press/release button with optional action and held time
//! - [`ControlsConfig`] - TOML layout files

pub mod button;
pub mod classify;
pub mod config;
pub mod control;
pub mod dpad;
pub mod error;
pub mod event;
pub mod joystick;
pub mod ownership;
pub mod pad;

pub use button::TouchButton;
pub use classify::{classify_radial, classify_rect};
pub use config::{ButtonConfig, ControlsConfig, DPadConfig, JoystickConfig};
pub use control::TouchControl;
pub use dpad::DPad;
pub use error::ConfigError;
pub use event::{ButtonEvent, PadEvent};
pub use joystick::{Joystick, JoystickLayers, LayerRects, SpeedMonitor, TextureLayer};
pub use ownership::PointerOwnership;
pub use pad::{DirectionActions, TouchPad};

// Re-export the shared value types hosts need alongside the controls
pub use tactile_shared::{Direction, Lifecycle, PointerEvent, PointerId, Rect, Vec2};
