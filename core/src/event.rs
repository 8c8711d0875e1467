//! Events emitted by touch controls
//!
//! Controls queue events while handling input and the host drains them once
//! per frame, translating each into its own signal or action system.

use glam::Vec2;
use serde::Serialize;
use tactile_shared::{Direction, PointerId};

/// Event emitted by a pad (D-pad or joystick)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum PadEvent {
    /// Classified direction changed (pointer is `None` after a release)
    DirectionChanged {
        pointer: Option<PointerId>,
        direction: Direction,
    },
    /// Joystick direction together with the current drag speed and angle
    DirectionChangedWithSpeed {
        pointer: Option<PointerId>,
        direction: Direction,
        speed: Vec2,
        angle: f32,
    },
    /// Joystick stick angle moved (emitted on every owner drag)
    AngleChanged { angle: f32, speed: Vec2 },
    /// Joystick stick angle with the estimated rotation speed (rad/s)
    AngleChangedWithRotationSpeed {
        pointer: Option<PointerId>,
        angle: f32,
        rotation_speed: f32,
    },
    /// Named input action for the host's action map
    Action { name: String, pressed: bool },
}

/// Event emitted by a touch button
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ButtonEvent {
    Pressed,
    Released,
    /// Released after being held for the given number of seconds
    ReleasedWithHeldTime(f32),
    /// Named input action for the host's action map
    Action { name: String, pressed: bool },
}
