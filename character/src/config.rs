//! Character configuration (TOML)
//!
//! ```toml
//! max_jump_count = 2
//!
//! [[grounded]]        # slot 1, running
//! speed = 200.0
//! max_speed = 300.0
//! acceleration = 800.0
//!
//! [[jumping]]         # slot 1, falling
//! gravity = 980.0
//! max_speed = 300.0
//! min_speed = -300.0
//! scale_inherited_speed = 1.0
//!
//! [[jumping]]         # slot 2, first jump
//! jump_height = 64.0
//! jump_duration = 0.6
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::controller::{DEFAULT_MAX_JUMP_COUNT, SideScroller};
use crate::error::CharacterError;
use crate::profile::{GroundedMovementData1D, MovementData2D};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfig {
    #[serde(default = "default_max_jump_count")]
    pub max_jump_count: u8,
    /// Slot order: running, walking, crawling, then free slots
    #[serde(default)]
    pub grounded: Vec<GroundedProfileConfig>,
    /// Slot order: falling, then one entry per jump
    #[serde(default)]
    pub jumping: Vec<JumpingProfileConfig>,
}

/// Horizontal movement fields, shared by both profile kinds
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundedProfileConfig {
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub acceleration: f32,
    #[serde(default)]
    pub max_speed: f32,
    #[serde(default)]
    pub min_speed: f32,
    #[serde(default)]
    pub scale_inherited_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpingProfileConfig {
    #[serde(flatten)]
    pub horizontal: GroundedProfileConfig,
    #[serde(default)]
    pub jump_height: f32,
    #[serde(default)]
    pub jump_duration: f32,
    /// Overrides the gravity derived from height and duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f32>,
    /// With an explicit gravity, back-solve the height (true) or the
    /// duration (false)
    #[serde(default = "default_true")]
    pub keep_jump_duration: bool,
    #[serde(default)]
    pub x_to_y_velocity_ratio: f32,
    #[serde(default)]
    pub scale_inherited_y_speed: f32,
}

fn default_true() -> bool {
    true
}
fn default_max_jump_count() -> u8 {
    DEFAULT_MAX_JUMP_COUNT
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            max_jump_count: default_max_jump_count(),
            grounded: Vec::new(),
            jumping: Vec::new(),
        }
    }
}

impl Default for JumpingProfileConfig {
    fn default() -> Self {
        Self {
            horizontal: GroundedProfileConfig::default(),
            jump_height: 0.0,
            jump_duration: 0.0,
            gravity: None,
            keep_jump_duration: default_true(),
            x_to_y_velocity_ratio: 0.0,
            scale_inherited_y_speed: 0.0,
        }
    }
}

fn warn_if_clamped(field: &str, requested: f32, applied: f32) {
    if requested != applied {
        tracing::warn!(field, requested, applied, "profile value clamped");
    }
}

impl GroundedProfileConfig {
    pub fn build(&self) -> GroundedMovementData1D {
        let mut profile = GroundedMovementData1D::new();
        self.apply(&mut profile);
        profile
    }

    fn apply(&self, profile: &mut GroundedMovementData1D) {
        profile.set_speed(self.speed);
        profile.set_max_speed(self.max_speed);
        profile.set_min_speed(self.min_speed);
        profile.set_acceleration(self.acceleration);
        profile.set_scale_inherited_speed(self.scale_inherited_speed);

        warn_if_clamped("max_speed", self.max_speed, profile.max_speed());
        warn_if_clamped("min_speed", self.min_speed, profile.min_speed());
    }
}

impl JumpingProfileConfig {
    pub fn build(&self) -> MovementData2D {
        let mut profile = MovementData2D::new();
        self.horizontal.apply(profile.horizontal_mut());
        profile.set_jump_height(self.jump_height);
        profile.set_jump_duration(self.jump_duration);
        if let Some(gravity) = self.gravity {
            profile.set_gravity(gravity, self.keep_jump_duration);
            warn_if_clamped("gravity", gravity, profile.gravity());
        }
        profile.set_x_to_y_velocity_ratio(self.x_to_y_velocity_ratio);
        profile.set_scale_inherited_y_speed(self.scale_inherited_y_speed);
        profile
    }
}

impl CharacterConfig {
    pub fn from_toml(text: &str) -> Result<Self, CharacterError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CharacterError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CharacterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Build a controller in the idle state
    pub fn build(&self) -> Result<SideScroller, CharacterError> {
        let mut character = SideScroller::new();
        character.set_max_jump_count(self.max_jump_count);
        character.set_grounded_profiles(
            self.grounded.iter().map(|p| Arc::new(p.build())).collect(),
        )?;
        character.set_jumping_profiles(
            self.jumping.iter().map(|p| Arc::new(p.build())).collect(),
        )?;
        tracing::debug!(
            grounded = self.grounded.len(),
            jumping = self.jumping.len(),
            max_jump_count = self.max_jump_count,
            "character built"
        );
        Ok(character)
    }
}
