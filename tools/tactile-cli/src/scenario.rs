//! Scenario files
//!
//! A scenario pairs a controls layout and an optional character with a
//! scripted list of steps, each applied at a given physics tick:
//!
//! ```toml
//! tick_rate = 60
//! ticks = 120
//!
//! [controls.joystick]
//! size = [200.0, 200.0]
//! radius = 100.0
//!
//! [character]
//! [[character.jumping]]
//! gravity = 980.0
//!
//! [[steps]]
//! tick = 0
//! kind = "pointer"
//! control = "joystick"
//! phase = "down"
//! id = 0
//! position = [150.0, 100.0]
//!
//! [[steps]]
//! tick = 10
//! kind = "floor"
//! on_floor = false
//! ```

use anyhow::{Context, Result, bail};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use tactile_character::CharacterConfig;
use tactile_core::{ControlsConfig, Lifecycle, PointerEvent, PointerId};

/// Physics ticks per second when the file does not say
pub const DEFAULT_TICK_RATE: u32 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
    /// Ticks to simulate (default: one past the last step)
    #[serde(default)]
    pub ticks: Option<u32>,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub character: Option<CharacterConfig>,
    /// Whether the character starts on the floor
    #[serde(default = "default_true")]
    pub on_floor: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_tick_rate() -> u32 {
    DEFAULT_TICK_RATE
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub tick: u32,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Dpad,
    Joystick,
    Button,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleKind {
    EnterTree,
    ExitTree,
    Paused,
    Unpaused,
    Show,
    Hide,
    Resize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    Idle,
    Grounded,
    Airborne,
    Fall,
    Jump,
    Custom,
    DisableMovement,
    EnableMovement,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Pointer event delivered to one control in its local space
    Pointer {
        control: ControlKind,
        phase: Phase,
        #[serde(default)]
        id: u32,
        position: Vec2,
    },
    /// Lifecycle notification, to one control or to all of them
    Lifecycle {
        #[serde(default)]
        control: Option<ControlKind>,
        event: LifecycleKind,
        #[serde(default)]
        size: Option<Vec2>,
    },
    /// Gameplay request to the character
    Character {
        request: Request,
        /// Profile slot or custom state id
        #[serde(default)]
        slot: Option<u8>,
    },
    /// Floor contact reported by the physics body from this tick on
    Floor { on_floor: bool },
}

impl Phase {
    pub fn event(self, id: PointerId, position: Vec2) -> PointerEvent {
        match self {
            Phase::Down => PointerEvent::Down { id, position },
            Phase::Move => PointerEvent::Move { id, position },
            Phase::Up => PointerEvent::Up { id, position },
        }
    }
}

impl LifecycleKind {
    pub fn event(self, size: Option<Vec2>) -> Result<Lifecycle> {
        Ok(match self {
            LifecycleKind::EnterTree => Lifecycle::EnterTree,
            LifecycleKind::ExitTree => Lifecycle::ExitTree,
            LifecycleKind::Paused => Lifecycle::Paused,
            LifecycleKind::Unpaused => Lifecycle::Unpaused,
            LifecycleKind::Show => Lifecycle::VisibilityChanged(true),
            LifecycleKind::Hide => Lifecycle::VisibilityChanged(false),
            LifecycleKind::Resize => {
                Lifecycle::Resized(size.context("resize step needs a `size`")?)
            }
        })
    }
}

impl Scenario {
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut scenario: Scenario = toml::from_str(text).context("invalid scenario")?;
        scenario.steps.sort_by_key(|step| step.tick);
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn total_ticks(&self) -> u32 {
        self.ticks.unwrap_or_else(|| {
            self.steps
                .last()
                .map_or(0, |step| step.tick.saturating_add(1))
        })
    }

    pub fn has_control(&self, kind: ControlKind) -> bool {
        match kind {
            ControlKind::Dpad => self.controls.dpad.is_some(),
            ControlKind::Joystick => self.controls.joystick.is_some(),
            ControlKind::Button => self.controls.button.is_some(),
        }
    }

    /// Reject steps that could never apply
    fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            bail!("tick_rate must be positive");
        }
        for step in &self.steps {
            match &step.action {
                Action::Pointer { control, .. }
                | Action::Lifecycle {
                    control: Some(control),
                    ..
                } if !self.has_control(*control) => {
                    bail!("step at tick {} targets {:?}, which is not configured", step.tick, control);
                }
                Action::Lifecycle { event, size, .. } => {
                    event.event(*size).with_context(|| format!("step at tick {}", step.tick))?;
                }
                Action::Character { .. } if self.character.is_none() => {
                    bail!("step at tick {} drives a character, but none is configured", step.tick);
                }
                _ => {}
            }
        }
        Ok(())
    }
}
