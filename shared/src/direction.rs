//! Eight-way direction bitmask
//!
//! A direction is the OR of at most one horizontal bit and one vertical bit.
//! The numeric values match the ones exposed to scripts by the host engine
//! (`LEFT = 1`, `RIGHT = 2`, `DOWN = 4`, `UP = 8`), so diagonals such as
//! `DOWN_LEFT` are simply `5`.

use serde::{Deserialize, Serialize};
use std::fmt;

bitflags::bitflags! {
    /// Direction reported by a pad
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Direction: u8 {
        const LEFT = 0b0001;
        const RIGHT = 0b0010;
        const DOWN = 0b0100;
        const UP = 0b1000;

        const DOWN_LEFT = Self::DOWN.bits() | Self::LEFT.bits();
        const DOWN_RIGHT = Self::DOWN.bits() | Self::RIGHT.bits();
        const UP_LEFT = Self::UP.bits() | Self::LEFT.bits();
        const UP_RIGHT = Self::UP.bits() | Self::RIGHT.bits();
    }
}

impl Direction {
    /// No direction (inside the deadzone or released)
    pub const NEUTRAL: Self = Self::empty();

    /// Horizontal bit selected by the sign of `x` (screen space, +x is right)
    pub fn from_x(x: f32) -> Self {
        if x > 0.0 { Self::RIGHT } else { Self::LEFT }
    }

    /// Vertical bit selected by the sign of `y` (screen space, +y is down)
    pub fn from_y(y: f32) -> Self {
        if y > 0.0 { Self::DOWN } else { Self::UP }
    }

    /// Horizontal component only
    pub fn horizontal(self) -> Self {
        self & (Self::LEFT | Self::RIGHT)
    }

    /// Vertical component only
    pub fn vertical(self) -> Self {
        self & (Self::UP | Self::DOWN)
    }

    pub fn is_neutral(self) -> bool {
        self.is_empty()
    }

    /// True when both a horizontal and a vertical bit are set
    pub fn is_diagonal(self) -> bool {
        !self.horizontal().is_empty() && !self.vertical().is_empty()
    }

    /// Unit-ish vector for this direction (components in {-1, 0, 1})
    pub fn to_vec2(self) -> glam::Vec2 {
        let x = if self.contains(Self::RIGHT) {
            1.0
        } else if self.contains(Self::LEFT) {
            -1.0
        } else {
            0.0
        };
        let y = if self.contains(Self::DOWN) {
            1.0
        } else if self.contains(Self::UP) {
            -1.0
        } else {
            0.0
        };
        glam::Vec2::new(x, y)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertical = if self.contains(Self::UP) {
            Some("up")
        } else if self.contains(Self::DOWN) {
            Some("down")
        } else {
            None
        };
        let horizontal = if self.contains(Self::LEFT) {
            Some("left")
        } else if self.contains(Self::RIGHT) {
            Some("right")
        } else {
            None
        };
        match (vertical, horizontal) {
            (Some(v), Some(h)) => write!(f, "{}_{}", v, h),
            (Some(v), None) => f.write_str(v),
            (None, Some(h)) => f.write_str(h),
            (None, None) => f.write_str("neutral"),
        }
    }
}

// Serialized as the raw bitmask so hosts can read it as an integer
impl Serialize for Direction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Direction::from_bits_truncate(bits))
    }
}
