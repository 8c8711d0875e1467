//! Drag and rotation speed estimation
//!
//! A damped estimator: each tick moves the estimate all the way to the
//! finite-difference target, unless that would flip its sign or land on
//! zero, in which case only `1/e` of the step is applied. Discrete touch sampling produces
//! zero-delta ticks; the damping keeps those from flickering the estimate
//! through zero.

use glam::Vec2;
use std::f32::consts::E;

/// Per-tick speed estimate for the owning pointer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpeedMonitor {
    previous_offset: Vec2,
    drag_speed: Vec2,
    rotation_speed: f32,
}

fn damped_step(current: f32, target: f32) -> f32 {
    let mut adjust = target - current;
    if current != 0.0 && (current + adjust) * current <= 0.0 {
        adjust /= E;
    }
    current + adjust
}

impl SpeedMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking from `offset` with zeroed speeds
    pub fn start(&mut self, offset: Vec2) {
        *self = Self {
            previous_offset: offset,
            ..Self::default()
        };
    }

    /// Zero the estimates, keeping the monitor itself
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by one tick with the stick offset observed this tick.
    ///
    /// Non-positive `dt` leaves the estimate untouched.
    pub fn update(&mut self, offset: Vec2, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let target = (offset - self.previous_offset) / dt;
        self.drag_speed = Vec2::new(
            damped_step(self.drag_speed.x, target.x),
            damped_step(self.drag_speed.y, target.y),
        );

        let target_rotation = signed_angle(self.previous_offset, offset) / dt;
        self.rotation_speed = damped_step(self.rotation_speed, target_rotation);

        self.previous_offset = offset;
    }

    /// Estimated drag speed (units/s)
    pub fn drag_speed(&self) -> Vec2 {
        self.drag_speed
    }

    /// Estimated rotation speed around the reference center (rad/s)
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }
}

/// Angle from `from` to `to`, measured in the frame whose x axis is `from`
fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    let axis = from.normalize_or_zero();
    let dir = to.normalize_or_zero();
    if axis == Vec2::ZERO || dir == Vec2::ZERO {
        return 0.0;
    }
    let local = Vec2::new(dir.dot(axis), dir.dot(axis.perp()));
    local.y.atan2(local.x)
}
