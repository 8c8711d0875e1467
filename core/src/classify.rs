//! Direction classification
//!
//! Both classifiers take an offset from the pad's reference center and
//! return an eight-way [`Direction`]. The sign of each axis picks the side
//! (+x right, +y down); the deadzone and cardinal span decide which axes are
//! reported at all.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;
use tactile_shared::Direction;

/// Rectangular (D-pad) classification.
///
/// `deadzone` and `span` are fractions of `half_extent`. With
/// `w = span * half_extent` and `l = deadzone * half_extent` the horizontal
/// bit is set when `|x| >= l - clamp(|y| - w, 0, w)` and the vertical bit
/// symmetrically. The neutral region is a plus shape for small spans, a
/// square when the span reaches the deadzone, and an octagon in between.
pub fn classify_rect(offset: Vec2, half_extent: f32, deadzone: f32, span: f32) -> Direction {
    let abs = offset.abs();
    let w = span * half_extent;
    let l = deadzone * half_extent;

    let mut result = Direction::NEUTRAL;
    if abs.x >= l - (abs.y - w).clamp(0.0, w.max(0.0)) {
        result |= Direction::from_x(offset.x);
    }
    if abs.y >= l - (abs.x - w).clamp(0.0, w.max(0.0)) {
        result |= Direction::from_y(offset.y);
    }
    result
}

/// Radial (joystick) classification.
///
/// Offsets no longer than `deadzone` are neutral. Otherwise the offset is
/// folded into the first quadrant and its angle compared against
/// `half_gap = (π/2 - span) / 2`: below it only the horizontal bit is set,
/// above `π/2 - half_gap` only the vertical bit, and both in between.
pub fn classify_radial(offset: Vec2, deadzone: f32, span: f32) -> Direction {
    if offset.length() <= deadzone {
        return Direction::NEUTRAL;
    }

    let span = span.clamp(0.0, FRAC_PI_2);
    let half_gap = (FRAC_PI_2 - span) * 0.5;
    let abs = offset.abs();
    let theta = abs.y.atan2(abs.x);

    let horizontal = Direction::from_x(offset.x);
    let vertical = Direction::from_y(offset.y);
    if theta < half_gap {
        horizontal
    } else if theta > FRAC_PI_2 - half_gap {
        vertical
    } else {
        horizontal | vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn polar(distance: f32, degrees: f32) -> Vec2 {
        let r = degrees.to_radians();
        Vec2::new(r.cos(), r.sin()) * distance
    }

    // =============================================================
    // Rectangular
    // =============================================================

    #[test]
    fn test_rect_center_is_neutral() {
        assert_eq!(classify_rect(Vec2::ZERO, 50.0, 0.65, 0.35), Direction::NEUTRAL);
        assert_eq!(
            classify_rect(Vec2::new(10.0, 5.0), 50.0, 0.65, 0.35),
            Direction::NEUTRAL
        );
    }

    #[test]
    fn test_rect_pure_axes() {
        assert_eq!(
            classify_rect(Vec2::new(40.0, 0.0), 50.0, 0.65, 0.35),
            Direction::RIGHT
        );
        assert_eq!(
            classify_rect(Vec2::new(-40.0, 3.0), 50.0, 0.65, 0.35),
            Direction::LEFT
        );
        assert_eq!(
            classify_rect(Vec2::new(0.0, -45.0), 50.0, 0.65, 0.35),
            Direction::UP
        );
    }

    #[test]
    fn test_rect_diagonal() {
        assert_eq!(
            classify_rect(Vec2::new(30.0, 30.0), 50.0, 0.65, 0.35),
            Direction::DOWN_RIGHT
        );
        assert_eq!(
            classify_rect(Vec2::new(-30.0, -30.0), 50.0, 0.65, 0.35),
            Direction::UP_LEFT
        );
    }

    #[test]
    fn test_rect_square_deadzone_when_span_equals_deadzone() {
        // w == l: the neutral region is a square of half side l
        let d = classify_rect(Vec2::new(26.0, 26.0), 50.0, 0.5, 0.5);
        assert_eq!(d, Direction::DOWN_RIGHT);
        let d = classify_rect(Vec2::new(20.0, 20.0), 50.0, 0.5, 0.5);
        assert_eq!(d, Direction::NEUTRAL);
    }

    // =============================================================
    // Radial
    // =============================================================

    #[test]
    fn test_radial_deadzone_inclusive() {
        assert_eq!(classify_radial(polar(10.0, 0.0), 10.0, FRAC_PI_4), Direction::NEUTRAL);
        assert_eq!(classify_radial(polar(10.5, 0.0), 10.0, FRAC_PI_4), Direction::RIGHT);
    }

    #[test]
    fn test_radial_pure_horizontal_zone() {
        // half_gap is 22.5 degrees for a 45 degree span
        assert_eq!(classify_radial(polar(50.0, 10.0), 10.0, FRAC_PI_4), Direction::RIGHT);
        assert_eq!(classify_radial(polar(50.0, 170.0), 10.0, FRAC_PI_4), Direction::LEFT);
        assert_eq!(classify_radial(polar(50.0, -10.0), 10.0, FRAC_PI_4), Direction::RIGHT);
    }

    #[test]
    fn test_radial_diagonal_and_vertical() {
        assert_eq!(classify_radial(polar(50.0, 45.0), 10.0, FRAC_PI_4), Direction::DOWN_RIGHT);
        assert_eq!(classify_radial(polar(50.0, -135.0), 10.0, FRAC_PI_4), Direction::UP_LEFT);
        assert_eq!(classify_radial(polar(50.0, 80.0), 10.0, FRAC_PI_4), Direction::DOWN);
        assert_eq!(classify_radial(polar(50.0, -90.0), 10.0, FRAC_PI_4), Direction::UP);
    }

    #[test]
    fn test_radial_zero_span_is_four_way() {
        assert_eq!(classify_radial(polar(50.0, 40.0), 0.0, 0.0), Direction::RIGHT);
        assert_eq!(classify_radial(polar(50.0, 50.0), 0.0, 0.0), Direction::DOWN);
    }

    #[test]
    fn test_radial_span_is_clamped() {
        let a = classify_radial(polar(50.0, 30.0), 0.0, 10.0);
        let b = classify_radial(polar(50.0, 30.0), 0.0, FRAC_PI_2);
        assert_eq!(a, b);
    }
}
