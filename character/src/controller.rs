//! Side-scroller locomotion controller
//!
//! [`SideScroller`] owns the character's velocity and locomotion state and
//! advances both once per fixed tick. Gameplay code requests state changes
//! (`jump`, `set_grounded`, ...), which become hand-offs resolved on the
//! next [`SideScroller::advance`]; losing or regaining the floor starts a
//! hand-off on its own and resolves it within the same tick.

use glam::Vec2;
use std::sync::Arc;

use crate::error::{CharacterError, ProfileKind};
use crate::hooks::TransitionHooks;
use crate::profile::{GroundedMovementData1D, MovementData2D, MovementProfile};
use crate::slots::ProfileSlots;
use crate::state::{Endpoint, FALLING, LocomotionState};

/// Physics body the controller drives
pub trait CharacterBody {
    fn is_on_floor(&self) -> bool;
}

/// A bare floor-contact flag
impl CharacterBody for bool {
    fn is_on_floor(&self) -> bool {
        *self
    }
}

pub const DEFAULT_MAX_JUMP_COUNT: u8 = 1;

#[derive(Debug, Clone)]
pub struct SideScroller {
    state: LocomotionState,
    velocity: Vec2,
    grounded: ProfileSlots<GroundedMovementData1D>,
    jumping: ProfileSlots<MovementData2D>,
    max_jump_count: u8,
    movement_disabled: bool,
}

impl Default for SideScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl SideScroller {
    pub fn new() -> Self {
        Self {
            state: LocomotionState::Idle,
            velocity: Vec2::ZERO,
            grounded: ProfileSlots::new(ProfileKind::Grounded),
            jumping: ProfileSlots::new(ProfileKind::Jumping),
            max_jump_count: DEFAULT_MAX_JUMP_COUNT,
            movement_disabled: false,
        }
    }

    // === Configuration ===

    /// Grounded profiles; slot 1 is running, 2 walking, 3 crawling
    pub fn set_grounded_profiles(
        &mut self,
        profiles: Vec<Arc<GroundedMovementData1D>>,
    ) -> Result<(), CharacterError> {
        self.grounded.assign(profiles)
    }

    /// Airborne profiles; slot 1 is falling, slot `n + 1` the n-th jump
    pub fn set_jumping_profiles(
        &mut self,
        profiles: Vec<Arc<MovementData2D>>,
    ) -> Result<(), CharacterError> {
        self.jumping.assign(profiles)
    }

    pub fn grounded_profiles(&self) -> &ProfileSlots<GroundedMovementData1D> {
        &self.grounded
    }

    pub fn jumping_profiles(&self) -> &ProfileSlots<MovementData2D> {
        &self.jumping
    }

    pub fn max_jump_count(&self) -> u8 {
        self.max_jump_count
    }

    pub fn set_max_jump_count(&mut self, count: u8) {
        self.max_jump_count = count;
    }

    pub fn is_movement_disabled(&self) -> bool {
        self.movement_disabled
    }

    /// While disabled, `advance` neither moves nor changes state
    pub fn toggle_movement_disabled(&mut self, disabled: bool) {
        self.movement_disabled = disabled;
    }

    // === State ===

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    /// State packed into the 16-bit register layout
    pub fn register(&self) -> u16 {
        self.state.to_register()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Jumps performed in the current airborne stretch
    pub fn jump_count(&self) -> u8 {
        self.state.endpoint().jump_count()
    }

    // === Requests ===

    pub fn set_idle(&mut self) {
        self.begin(Endpoint::Idle);
    }

    pub fn set_grounded(&mut self, slot: u8) -> Result<(), CharacterError> {
        self.grounded.require(slot)?;
        self.begin(Endpoint::Grounded(slot));
        Ok(())
    }

    pub fn set_airborne(&mut self, slot: u8) -> Result<(), CharacterError> {
        self.jumping.require(slot)?;
        self.begin(Endpoint::Airborne(slot));
        Ok(())
    }

    pub fn fall(&mut self) -> Result<(), CharacterError> {
        self.set_airborne(FALLING)
    }

    /// Jump if another jump is allowed and has a profile. Returns whether a
    /// jump was started.
    pub fn jump(&mut self) -> bool {
        let count = self.jump_count();
        if count >= self.max_jump_count {
            return false;
        }
        let slot = count.saturating_add(2);
        if self.jumping.get(slot).is_none() {
            tracing::trace!(slot, "no profile for jump");
            return false;
        }
        self.begin(Endpoint::Airborne(slot));
        true
    }

    pub fn enter_custom(&mut self, id: u8) -> Result<(), CharacterError> {
        let target = Endpoint::Custom(id);
        if !target.is_valid() {
            return Err(CharacterError::InvalidCustomState(id));
        }
        self.begin(target);
        Ok(())
    }

    /// Start a hand-off to `to`. A pending hand-off is retargeted; retargeting
    /// back to where it started cancels it.
    fn begin(&mut self, to: Endpoint) {
        let from = match self.state {
            LocomotionState::Transition { from, .. } => from,
            settled => settled.endpoint(),
        };
        self.state = if from == to {
            to.into()
        } else {
            LocomotionState::Transition { from, to }
        };
    }

    // === Tick ===

    /// Advance one fixed tick and return the new velocity
    pub fn advance(
        &mut self,
        dt: f32,
        body: &impl CharacterBody,
        hooks: &mut impl TransitionHooks,
    ) -> Vec2 {
        if self.movement_disabled {
            return self.velocity;
        }

        match self.state {
            LocomotionState::Transition { from, to } => self.resolve(from, to, dt, hooks),
            LocomotionState::Custom(id) => hooks.custom_state(id, dt, &mut self.velocity),
            LocomotionState::Idle => {
                if !body.is_on_floor() {
                    self.leave_floor(dt, hooks);
                }
            }
            LocomotionState::Grounded(slot) => {
                if let Some(profile) = self.grounded.get(slot) {
                    self.velocity = profile.velocity(self.velocity, dt, false);
                }
                if !body.is_on_floor() {
                    self.leave_floor(dt, hooks);
                }
            }
            LocomotionState::Airborne(slot) => {
                if let Some(profile) = self.jumping.get(slot) {
                    self.velocity = profile.velocity(self.velocity, dt, false);
                }
                if body.is_on_floor() {
                    let from = self.state.endpoint();
                    self.begin(Endpoint::Idle);
                    self.resolve(from, Endpoint::Idle, dt, hooks);
                }
            }
        }
        self.velocity
    }

    fn leave_floor(&mut self, dt: f32, hooks: &mut impl TransitionHooks) {
        if self.jumping.get(FALLING).is_none() {
            tracing::trace!("off the floor without a falling profile");
            return;
        }
        let from = self.state.endpoint();
        self.begin(Endpoint::Airborne(FALLING));
        self.resolve(from, Endpoint::Airborne(FALLING), dt, hooks);
    }

    /// Complete a hand-off if the hook agrees, applying the target's
    /// transitioning velocity
    fn resolve(&mut self, from: Endpoint, to: Endpoint, dt: f32, hooks: &mut impl TransitionHooks) {
        if !hooks.transition(from, to, dt) {
            return;
        }
        self.velocity = match to {
            Endpoint::Idle => Vec2::ZERO,
            Endpoint::Grounded(slot) => self
                .grounded
                .get(slot)
                .map_or(self.velocity, |p| p.velocity(self.velocity, dt, true)),
            Endpoint::Airborne(slot) => self
                .jumping
                .get(slot)
                .map_or(self.velocity, |p| p.velocity(self.velocity, dt, true)),
            Endpoint::Custom(_) => self.velocity,
        };
        self.state = to.into();
        tracing::debug!(%from, %to, velocity = ?self.velocity, "locomotion state changed");
    }
}
