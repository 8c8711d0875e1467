//! Movement profiles
//!
//! A profile turns the previous velocity into the next one, either in
//! steady state (integrated every tick while a state is active) or in
//! transitioning mode (applied once, on the tick a state is entered).
//!
//! Profiles are authored once and then shared read-only between characters.

use glam::Vec2;

/// Velocity model for one locomotion state
pub trait MovementProfile: std::fmt::Debug {
    fn velocity(&self, previous: Vec2, dt: f32, transitioning: bool) -> Vec2;
}

/// Horizontal movement on the ground (y is always 0).
///
/// Setters keep `min_speed <= speed <= max_speed`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundedMovementData1D {
    speed: f32,
    acceleration: f32,
    max_speed: f32,
    min_speed: f32,
    scale_inherited_speed: f32,
}

impl GroundedMovementData1D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Widens the bounds if `speed` falls outside them
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.max_speed = self.max_speed.max(speed);
        self.min_speed = self.min_speed.min(speed);
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = acceleration;
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Never below the cruise speed
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed.max(self.speed);
    }

    pub fn min_speed(&self) -> f32 {
        self.min_speed
    }

    /// Never above the cruise speed
    pub fn set_min_speed(&mut self, min_speed: f32) {
        self.min_speed = min_speed.min(self.speed);
    }

    pub fn scale_inherited_speed(&self) -> f32 {
        self.scale_inherited_speed
    }

    pub fn set_scale_inherited_speed(&mut self, scale: f32) {
        self.scale_inherited_speed = scale;
    }

    fn bound(&self, v: f32) -> f32 {
        v.min(self.max_speed).max(self.min_speed)
    }

    /// Steady state: accelerate within bounds. Zero acceleration leaves the
    /// speed exactly as it was, even outside the bounds.
    fn update_speed(&self, previous: f32, dt: f32) -> f32 {
        if self.acceleration == 0.0 {
            return previous;
        }
        self.bound(previous + self.acceleration * dt)
    }

    /// Transitioning: cruise speed plus a share of the incoming speed
    fn assign_speed(&self, previous: f32, dt: f32) -> f32 {
        self.bound(self.speed + previous * self.scale_inherited_speed + self.acceleration * dt * 0.5)
    }

    fn horizontal(&self, previous: f32, dt: f32, transitioning: bool) -> f32 {
        if transitioning {
            self.assign_speed(previous, dt)
        } else {
            self.update_speed(previous, dt)
        }
    }
}

impl MovementProfile for GroundedMovementData1D {
    fn velocity(&self, previous: Vec2, dt: f32, transitioning: bool) -> Vec2 {
        Vec2::new(self.horizontal(previous.x, dt, transitioning), 0.0)
    }
}

/// Airborne movement: the 1D model on x plus a jump arc on y.
///
/// Gravity and initial jump velocity are derived from the jump height `h`
/// and duration `T` (takeoff to landing): `v0 = 4h / T`, `g = 8h / T²`.
/// Screen space, so the jump velocity points up (negative y).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementData2D {
    horizontal: GroundedMovementData1D,
    jump_height: f32,
    jump_duration: f32,
    gravity: f32,
    initial_jump_velocity: f32,
    x_to_y_velocity_ratio: f32,
    scale_inherited_y_speed: f32,
}

impl MovementData2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal part of the profile
    pub fn horizontal(&self) -> &GroundedMovementData1D {
        &self.horizontal
    }

    pub fn horizontal_mut(&mut self) -> &mut GroundedMovementData1D {
        &mut self.horizontal
    }

    pub fn jump_height(&self) -> f32 {
        self.jump_height
    }

    pub fn set_jump_height(&mut self, height: f32) {
        self.jump_height = height;
        self.update_jump_cache();
    }

    pub fn jump_duration(&self) -> f32 {
        self.jump_duration
    }

    pub fn set_jump_duration(&mut self, duration: f32) {
        self.jump_duration = duration;
        self.update_jump_cache();
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn initial_jump_velocity(&self) -> f32 {
        self.initial_jump_velocity
    }

    /// Set gravity directly and back-solve the arc.
    ///
    /// With `keep_jump_duration` and a positive duration, the duration stays
    /// and the height becomes `g·T²/8`. Otherwise the height stays and the
    /// duration becomes `√(8h/g)`. Negative gravity clamps to 0. When the arc is degenerate
    /// (no height or no duration) gravity is kept as given and the jump
    /// velocity is 0, which is how a plain falling profile is expressed.
    pub fn set_gravity(&mut self, gravity: f32, keep_jump_duration: bool) {
        let gravity = gravity.max(0.0);
        if gravity > 0.0 {
            if keep_jump_duration && self.jump_duration > 0.0 {
                self.jump_height = gravity * self.jump_duration * self.jump_duration / 8.0;
            } else if self.jump_height > 0.0 {
                self.jump_duration = (8.0 * self.jump_height / gravity).sqrt();
            }
        }

        if self.has_arc() {
            self.update_jump_cache();
        } else {
            self.gravity = gravity;
            self.initial_jump_velocity = 0.0;
        }
    }

    pub fn x_to_y_velocity_ratio(&self) -> f32 {
        self.x_to_y_velocity_ratio
    }

    /// Extra jump velocity per unit of horizontal speed at takeoff
    pub fn set_x_to_y_velocity_ratio(&mut self, ratio: f32) {
        self.x_to_y_velocity_ratio = ratio;
    }

    pub fn scale_inherited_y_speed(&self) -> f32 {
        self.scale_inherited_y_speed
    }

    pub fn set_scale_inherited_y_speed(&mut self, scale: f32) {
        self.scale_inherited_y_speed = scale;
    }

    fn has_arc(&self) -> bool {
        self.jump_height > 0.0 && self.jump_duration > 0.0
    }

    fn update_jump_cache(&mut self) {
        if !self.has_arc() {
            self.gravity = 0.0;
            self.initial_jump_velocity = 0.0;
            return;
        }
        // T / 2^(1 + log4(h)) == T / (2√h)
        let effective = self.jump_duration / (2.0 * self.jump_height.sqrt());
        self.initial_jump_velocity = 2.0 * self.jump_height.sqrt() / effective;
        self.gravity = 2.0 / (effective * effective);
    }
}

impl MovementProfile for MovementData2D {
    fn velocity(&self, previous: Vec2, dt: f32, transitioning: bool) -> Vec2 {
        let x = self.horizontal.horizontal(previous.x, dt, transitioning);
        let y = if transitioning {
            -self.initial_jump_velocity - previous.x.abs() * self.x_to_y_velocity_ratio
                + previous.y * self.scale_inherited_y_speed
                + self.gravity * dt * 0.5
        } else {
            previous.y + self.gravity * dt
        };
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn walker() -> GroundedMovementData1D {
        let mut p = GroundedMovementData1D::new();
        p.set_speed(200.0);
        p.set_max_speed(300.0);
        p.set_min_speed(0.0);
        p
    }

    fn ordered(p: &GroundedMovementData1D) -> bool {
        p.min_speed() <= p.speed() && p.speed() <= p.max_speed()
    }

    // =============================================================
    // 1D profile
    // =============================================================

    #[test]
    fn test_speed_ordering_holds_after_every_setter() {
        let mut p = GroundedMovementData1D::new();
        let calls: [(u8, f32); 9] = [
            (0, 50.0),
            (1, 10.0),
            (2, 80.0),
            (0, 120.0),
            (2, -5.0),
            (0, -20.0),
            (1, 500.0),
            (2, 0.0),
            (0, 600.0),
        ];
        for (which, value) in calls {
            match which {
                0 => p.set_speed(value),
                1 => p.set_max_speed(value),
                _ => p.set_min_speed(value),
            }
            assert!(ordered(&p), "broken after {which}={value}: {p:?}");
        }
    }

    #[test]
    fn test_bounds_clamp_toward_speed() {
        let mut p = walker();
        p.set_max_speed(100.0);
        assert_eq!(p.max_speed(), 200.0);
        p.set_min_speed(250.0);
        assert_eq!(p.min_speed(), 200.0);
    }

    #[test]
    fn test_zero_acceleration_keeps_velocity() {
        let p = walker();
        for dt in [0.0, 0.016, 1.0, 100.0] {
            assert_eq!(p.velocity(Vec2::new(150.0, 7.0), dt, false), Vec2::new(150.0, 0.0));
        }
    }

    #[test]
    fn test_steady_acceleration_is_bounded() {
        let mut p = walker();
        p.set_acceleration(100.0);
        assert_eq!(p.velocity(Vec2::new(150.0, 0.0), 0.5, false).x, 200.0);
        assert_eq!(p.velocity(Vec2::new(290.0, 0.0), 1.0, false).x, 300.0);
        p.set_acceleration(-1000.0);
        assert_eq!(p.velocity(Vec2::new(100.0, 0.0), 1.0, false).x, 0.0);
    }

    #[test]
    fn test_transitioning_assigns_cruise_speed() {
        let mut p = walker();
        p.set_scale_inherited_speed(0.5);
        p.set_acceleration(20.0);
        // 200 + 40 * 0.5 + 20 * 1 / 2
        assert_eq!(p.velocity(Vec2::new(40.0, 0.0), 1.0, true).x, 230.0);
        // Bounded by max speed
        assert_eq!(p.velocity(Vec2::new(400.0, 0.0), 1.0, true).x, 300.0);
    }

    // =============================================================
    // 2D profile
    // =============================================================

    fn jumper(h: f32, t: f32) -> MovementData2D {
        let mut p = MovementData2D::new();
        p.set_jump_height(h);
        p.set_jump_duration(t);
        p
    }

    #[test]
    fn test_jump_cache_values() {
        let p = jumper(4.0, 1.0);
        assert!((p.initial_jump_velocity() - 16.0).abs() < EPS);
        assert!((p.gravity() - 32.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_arc_is_zero() {
        assert_eq!(jumper(0.0, 1.0).gravity(), 0.0);
        assert_eq!(jumper(4.0, 0.0).initial_jump_velocity(), 0.0);
        assert_eq!(jumper(-1.0, 1.0).gravity(), 0.0);
    }

    #[test]
    fn test_gravity_round_trip_keeping_duration() {
        for (h, t) in [(4.0, 1.0), (120.0, 0.8), (0.5, 2.5)] {
            let original = jumper(h, t);
            let mut rebuilt = MovementData2D::new();
            rebuilt.set_jump_duration(t);
            rebuilt.set_gravity(original.gravity(), true);
            assert!((rebuilt.jump_height() - h).abs() < EPS * h.max(1.0));
            assert!((rebuilt.initial_jump_velocity() - original.initial_jump_velocity()).abs() < EPS * h.max(1.0));
        }
    }

    #[test]
    fn test_gravity_keeping_height() {
        let mut p = jumper(4.0, 1.0);
        p.set_gravity(128.0, false);
        assert!((p.jump_height() - 4.0).abs() < EPS);
        assert!((p.jump_duration() - 0.5).abs() < EPS);
        assert!((p.gravity() - 128.0).abs() < EPS);
    }

    #[test]
    fn test_gravity_without_arc_is_plain_fall() {
        let mut p = MovementData2D::new();
        p.set_gravity(980.0, false);
        assert_eq!(p.gravity(), 980.0);
        assert_eq!(p.initial_jump_velocity(), 0.0);

        p.set_gravity(-5.0, false);
        assert_eq!(p.gravity(), 0.0);
    }

    #[test]
    fn test_jump_reaches_apex_at_half_duration() {
        let (h, t) = (4.0, 1.0);
        let p = jumper(h, t);
        let dt = 1.0 / 1000.0;
        let ticks = (t / 2.0 / dt).round() as usize;

        let mut v = p.velocity(Vec2::ZERO, dt, true);
        let mut y = v.y * dt;
        for _ in 1..ticks {
            v = p.velocity(v, dt, false);
            y += v.y * dt;
        }
        assert!(p.gravity() > 0.0 && p.initial_jump_velocity() > 0.0);
        assert!(v.y.abs() < 0.1, "vertical speed at apex {}", v.y);
        assert!((y + h).abs() < 0.05, "apex height {}", -y);
    }

    #[test]
    fn test_takeoff_adds_horizontal_speed() {
        let mut p = jumper(4.0, 1.0);
        p.set_x_to_y_velocity_ratio(0.1);
        p.set_scale_inherited_y_speed(0.5);
        let v = p.velocity(Vec2::new(-100.0, 8.0), 0.0, true);
        // -16 - 100 * 0.1 + 8 * 0.5
        assert!((v.y + 22.0).abs() < EPS);
    }
}
