//! Touch control configuration (TOML)
//!
//! Every section is optional and every field has a default, so a layout file
//! only needs to spell out what differs. Controls are built through the same
//! clamping setters used at runtime; values that get clamped are logged.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::button::TouchButton;
use crate::dpad::{self, DPad};
use crate::error::ConfigError;
use crate::joystick::{self, Joystick, JoystickLayers};
use crate::pad::DirectionActions;

/// Layout file with one optional section per control kind
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpad: Option<DPadConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joystick: Option<JoystickConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<ButtonConfig>,
}

/// D-pad settings. Deadzone and span are fractions of the pad's half side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DPadConfig {
    /// Control size (default: [100, 100])
    #[serde(default = "default_size")]
    pub size: Vec2,
    #[serde(default = "default_true")]
    pub centered: bool,
    #[serde(default)]
    pub center_offset: Vec2,
    #[serde(default)]
    pub pass_by_press: bool,
    /// Native artwork size, used when `scale_to_rect` is 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_size: Option<Vec2>,
    /// Fraction of the control the pad fills (default: 1.0)
    #[serde(default = "default_scale_to_rect")]
    pub scale_to_rect: f32,
    /// Default: 0.65, range: span-0.9
    #[serde(default = "default_dpad_deadzone")]
    pub deadzone_extent: f32,
    /// Default: 0.35, range: 0.1-0.9
    #[serde(default = "default_dpad_span")]
    pub cardinal_span: f32,
    #[serde(default)]
    pub actions: DirectionActions,
}

/// Joystick settings. The deadzone is in raw units, the span in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoystickConfig {
    #[serde(default = "default_size")]
    pub size: Vec2,
    #[serde(default = "default_true")]
    pub centered: bool,
    #[serde(default)]
    pub center_offset: Vec2,
    #[serde(default)]
    pub pass_by_press: bool,
    /// Hit and stick radius (default: 1.0)
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Default: 0.4, range: 0-radius
    #[serde(default = "default_joystick_deadzone")]
    pub deadzone_extent: f32,
    /// Default: 0.575, range: 0-π/2
    #[serde(default = "default_joystick_span")]
    pub cardinal_span: f32,
    #[serde(default)]
    pub normal_moved_to_touch_pos: bool,
    #[serde(default)]
    pub stick_confined_inside: bool,
    #[serde(default)]
    pub monitor_speed: bool,
    #[serde(default)]
    pub layers: JoystickLayers,
    #[serde(default)]
    pub actions: DirectionActions,
}

/// Button settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonConfig {
    #[serde(default = "default_size")]
    pub size: Vec2,
    /// Circular hit radius around the center, 0 for the plain rect
    #[serde(default)]
    pub radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default = "default_true")]
    pub release_only_inside: bool,
    #[serde(default)]
    pub accumulate_held_time: bool,
    #[serde(default)]
    pub pass_by_press: bool,
}

fn default_true() -> bool {
    true
}
fn default_size() -> Vec2 {
    Vec2::splat(100.0)
}
fn default_scale_to_rect() -> f32 {
    1.0
}
fn default_dpad_deadzone() -> f32 {
    dpad::DEFAULT_DEADZONE_EXTENT
}
fn default_dpad_span() -> f32 {
    dpad::DEFAULT_CARDINAL_SPAN
}
fn default_radius() -> f32 {
    joystick::DEFAULT_RADIUS
}
fn default_joystick_deadzone() -> f32 {
    joystick::DEFAULT_DEADZONE_EXTENT
}
fn default_joystick_span() -> f32 {
    joystick::DEFAULT_CARDINAL_SPAN
}

impl Default for DPadConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            centered: default_true(),
            center_offset: Vec2::ZERO,
            pass_by_press: false,
            texture_size: None,
            scale_to_rect: default_scale_to_rect(),
            deadzone_extent: default_dpad_deadzone(),
            cardinal_span: default_dpad_span(),
            actions: DirectionActions::default(),
        }
    }
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            centered: default_true(),
            center_offset: Vec2::ZERO,
            pass_by_press: false,
            radius: default_radius(),
            deadzone_extent: default_joystick_deadzone(),
            cardinal_span: default_joystick_span(),
            normal_moved_to_touch_pos: false,
            stick_confined_inside: false,
            monitor_speed: false,
            layers: JoystickLayers::default(),
            actions: DirectionActions::default(),
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            radius: 0.0,
            action: None,
            release_only_inside: default_true(),
            accumulate_held_time: false,
            pass_by_press: false,
        }
    }
}

fn warn_if_clamped(control: &str, field: &str, requested: f32, applied: f32) {
    if requested != applied {
        tracing::warn!(control, field, requested, applied, "config value clamped");
    }
}

impl DPadConfig {
    pub fn build(&self) -> DPad {
        let mut dpad = DPad::new(self.size);
        dpad.set_centered(self.centered);
        dpad.set_center_offset(self.center_offset);
        dpad.set_pass_by_press(self.pass_by_press);
        dpad.set_texture_size(self.texture_size);
        dpad.set_scale_to_rect(self.scale_to_rect);
        // Span first so the deadzone is checked against the configured span
        dpad.set_cardinal_span(self.cardinal_span);
        dpad.set_deadzone_extent(self.deadzone_extent);
        dpad.set_actions(self.actions.clone());

        warn_if_clamped("dpad", "cardinal_span", self.cardinal_span, dpad.cardinal_span());
        warn_if_clamped("dpad", "deadzone_extent", self.deadzone_extent, dpad.deadzone_extent());
        dpad
    }
}

impl JoystickConfig {
    pub fn build(&self) -> Joystick {
        let mut joystick = Joystick::new(self.size);
        joystick.set_centered(self.centered);
        joystick.set_center_offset(self.center_offset);
        joystick.set_pass_by_press(self.pass_by_press);
        // Radius first, the deadzone is clamped to it
        joystick.set_radius(self.radius);
        joystick.set_deadzone_extent(self.deadzone_extent);
        joystick.set_cardinal_span(self.cardinal_span);
        joystick.set_normal_moved_to_touch_pos(self.normal_moved_to_touch_pos);
        joystick.set_stick_confined_inside(self.stick_confined_inside);
        joystick.set_monitor_speed(self.monitor_speed);
        joystick.set_layers(self.layers);
        joystick.set_actions(self.actions.clone());

        warn_if_clamped("joystick", "radius", self.radius, joystick.radius());
        warn_if_clamped("joystick", "deadzone_extent", self.deadzone_extent, joystick.deadzone_extent());
        warn_if_clamped("joystick", "cardinal_span", self.cardinal_span, joystick.cardinal_span());
        joystick
    }
}

impl ButtonConfig {
    pub fn build(&self) -> TouchButton {
        let mut button = TouchButton::new(self.size);
        button.set_radius(self.radius);
        button.set_action(self.action.clone());
        button.set_release_only_inside(self.release_only_inside);
        button.set_accumulate_held_time(self.accumulate_held_time);
        button.set_pass_by_press(self.pass_by_press);

        warn_if_clamped("button", "radius", self.radius, button.radius());
        button
    }
}

impl ControlsConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn build_dpad(&self) -> Option<DPad> {
        self.dpad.as_ref().map(DPadConfig::build)
    }

    pub fn build_joystick(&self) -> Option<Joystick> {
        self.joystick.as_ref().map(JoystickConfig::build)
    }

    pub fn build_button(&self) -> Option<TouchButton> {
        self.button.as_ref().map(ButtonConfig::build)
    }
}
