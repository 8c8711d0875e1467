//! Pointer (touch) events
//!
//! Positions are already transformed into the receiving control's local
//! space by the host. A pointer is identified by the index the host assigns
//! to a finger for the duration of one touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::TryFromIntError;

/// Identifier of a touch for its whole press-drag-release lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(pub u32);

impl PointerId {
    /// Integer form used by hosts that encode "no pointer" as `-1`.
    ///
    /// Fails for indices beyond `i32::MAX`.
    pub fn raw_index(id: Option<PointerId>) -> Result<i32, TryFromIntError> {
        match id {
            Some(PointerId(index)) => i32::try_from(index),
            None => Ok(-1),
        }
    }

    /// Inverse of [`PointerId::raw_index`]; negative values mean no pointer
    pub fn from_raw_index(index: i32) -> Option<PointerId> {
        u32::try_from(index).ok().map(PointerId)
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single pointer event, delivered one at a time by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Finger touched down
    Down { id: PointerId, position: Vec2 },
    /// Finger moved while touching
    Move { id: PointerId, position: Vec2 },
    /// Finger lifted (position of the last contact)
    Up { id: PointerId, position: Vec2 },
}

impl PointerEvent {
    pub fn id(&self) -> PointerId {
        match *self {
            PointerEvent::Down { id, .. }
            | PointerEvent::Move { id, .. }
            | PointerEvent::Up { id, .. } => id,
        }
    }

    pub fn position(&self) -> Vec2 {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => position,
        }
    }

    /// Events with non-finite coordinates are dropped by every control
    pub fn is_well_formed(&self) -> bool {
        self.position().is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_index() {
        assert_eq!(PointerId::raw_index(Some(PointerId(3))), Ok(3));
        assert_eq!(PointerId::raw_index(None), Ok(-1));
        assert_eq!(PointerId::from_raw_index(-1), None);
        assert_eq!(PointerId::from_raw_index(2), Some(PointerId(2)));
    }

    #[test]
    fn test_raw_index_out_of_range() {
        assert_eq!(PointerId::raw_index(Some(PointerId(i32::MAX as u32))), Ok(i32::MAX));
        assert!(PointerId::raw_index(Some(PointerId(i32::MAX as u32 + 1))).is_err());
        assert!(PointerId::raw_index(Some(PointerId(u32::MAX))).is_err());
    }

    #[test]
    fn test_accessors() {
        let e = PointerEvent::Move {
            id: PointerId(1),
            position: Vec2::new(4.0, 5.0),
        };
        assert_eq!(e.id(), PointerId(1));
        assert_eq!(e.position(), Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_malformed_positions() {
        let nan = PointerEvent::Down {
            id: PointerId(0),
            position: Vec2::new(f32::NAN, 0.0),
        };
        let inf = PointerEvent::Up {
            id: PointerId(0),
            position: Vec2::new(0.0, f32::INFINITY),
        };
        let ok = PointerEvent::Down {
            id: PointerId(0),
            position: Vec2::ZERO,
        };
        assert!(!nan.is_well_formed());
        assert!(!inf.is_well_formed());
        assert!(ok.is_well_formed());
    }
}
