//! Run command - replay a scenario tick by tick
//!
//! Each tick applies that tick's steps in file order, advances the controls'
//! per-tick work and the character, then drains and logs every event.

use anyhow::{Context, Result};
use clap::Args;
use glam::Vec2;
use serde::Serialize;
use std::path::PathBuf;

use tactile_character::{HookTable, LocomotionState, SideScroller};
use tactile_core::{ButtonEvent, DPad, Joystick, PadEvent, PointerId, TouchButton, TouchControl};

use crate::scenario::{Action, ControlKind, Request, Scenario};

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Override the number of ticks to simulate
    #[arg(long)]
    pub ticks: Option<u32>,
}

/// Execute the run command
pub fn execute(args: RunArgs) -> Result<()> {
    let mut scenario = Scenario::load(&args.scenario)?;
    if let Some(ticks) = args.ticks {
        scenario.ticks = Some(ticks);
    }

    let mut simulation = Simulation::new(&scenario)?;
    let report = simulation.run(&scenario);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        report.print();
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Emitted {
    Pad(PadEvent),
    Button(ButtonEvent),
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggedEvent {
    pub tick: u32,
    pub control: ControlKind,
    pub event: Emitted,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateChange {
    pub tick: u32,
    pub from: String,
    pub to: String,
    pub register: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterReport {
    pub state: String,
    pub register: u16,
    pub velocity: Vec2,
    /// Velocity integrated over the run, starting at the origin
    pub position: Vec2,
    pub changes: Vec<StateChange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub ticks: u32,
    pub tick_rate: u32,
    pub events: Vec<LoggedEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<CharacterReport>,
}

impl Report {
    fn print(&self) {
        println!("Simulated {} ticks at {} Hz", self.ticks, self.tick_rate);
        println!();
        if self.events.is_empty() {
            println!("No control events");
        }
        for logged in &self.events {
            let event = match &logged.event {
                Emitted::Pad(event) => format!("{event:?}"),
                Emitted::Button(event) => format!("{event:?}"),
            };
            println!("  [{:>5}] {:<8} {}", logged.tick, format!("{:?}", logged.control), event);
        }

        if let Some(character) = &self.character {
            println!();
            println!("Character:");
            for change in &character.changes {
                println!(
                    "  [{:>5}] {} -> {} (register {:#06x})",
                    change.tick, change.from, change.to, change.register
                );
            }
            println!("  Final state: {} ({:#06x})", character.state, character.register);
            println!("  Velocity:    {}", character.velocity);
            println!("  Position:    {}", character.position);
        }
    }
}

/// Controls and character driven by a scenario
pub struct Simulation {
    dpad: Option<DPad>,
    joystick: Option<Joystick>,
    button: Option<TouchButton>,
    character: Option<SideScroller>,
    hooks: HookTable,
    on_floor: bool,
    position: Vec2,
    events: Vec<LoggedEvent>,
    changes: Vec<StateChange>,
}

impl Simulation {
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let character = scenario
            .character
            .as_ref()
            .map(|config| config.build())
            .transpose()
            .context("failed to build character")?;

        Ok(Self {
            dpad: scenario.controls.build_dpad(),
            joystick: scenario.controls.build_joystick(),
            button: scenario.controls.build_button(),
            character,
            hooks: HookTable::new(),
            on_floor: scenario.on_floor,
            position: Vec2::ZERO,
            events: Vec::new(),
            changes: Vec::new(),
        })
    }

    pub fn run(&mut self, scenario: &Scenario) -> Report {
        let dt = scenario.dt();
        let total = scenario.total_ticks();
        let mut steps = scenario.steps.iter().peekable();

        for tick in 0..total {
            while let Some(step) = steps.next_if(|step| step.tick <= tick) {
                self.apply(tick, &step.action);
            }
            self.physics_tick(tick, dt);
            self.drain(tick);
        }

        Report {
            ticks: total,
            tick_rate: scenario.tick_rate,
            events: std::mem::take(&mut self.events),
            character: self.character.as_ref().map(|character| CharacterReport {
                state: character.state().to_string(),
                register: character.register(),
                velocity: character.velocity(),
                position: self.position,
                changes: std::mem::take(&mut self.changes),
            }),
        }
    }

    fn apply(&mut self, tick: u32, action: &Action) {
        match *action {
            Action::Pointer {
                control,
                phase,
                id,
                position,
            } => {
                let event = phase.event(PointerId(id), position);
                tracing::debug!(tick, ?control, ?event, "pointer");
                match control {
                    ControlKind::Dpad => self.dpad.iter_mut().for_each(|c| c.pointer_event(&event)),
                    ControlKind::Joystick => {
                        self.joystick.iter_mut().for_each(|c| c.pointer_event(&event))
                    }
                    ControlKind::Button => {
                        self.button.iter_mut().for_each(|c| c.pointer_event(&event))
                    }
                }
            }
            Action::Lifecycle {
                control,
                event,
                size,
            } => {
                // Validated when the scenario was loaded
                let Ok(event) = event.event(size) else {
                    return;
                };
                tracing::debug!(tick, ?control, ?event, "lifecycle");
                let targets = |kind: ControlKind| control.is_none_or(|c| c == kind);
                if targets(ControlKind::Dpad) {
                    self.dpad.iter_mut().for_each(|c| c.lifecycle(event));
                }
                if targets(ControlKind::Joystick) {
                    self.joystick.iter_mut().for_each(|c| c.lifecycle(event));
                }
                if targets(ControlKind::Button) {
                    self.button.iter_mut().for_each(|c| c.lifecycle(event));
                }
            }
            Action::Character { request, slot } => {
                if let Some(character) = self.character.as_mut() {
                    request_character(character, tick, request, slot);
                }
            }
            Action::Floor { on_floor } => {
                tracing::debug!(tick, on_floor, "floor contact");
                self.on_floor = on_floor;
            }
        }
    }

    fn physics_tick(&mut self, tick: u32, dt: f32) {
        if let Some(joystick) = self.joystick.as_mut() {
            joystick.physics_process(dt);
        }
        if let Some(button) = self.button.as_mut() {
            button.physics_process(dt);
        }

        if let Some(character) = self.character.as_mut() {
            let before = character.state();
            let velocity = character.advance(dt, &self.on_floor, &mut self.hooks);
            self.position += velocity * dt;
            let after = character.state();
            if before != after {
                self.changes.push(state_change(tick, before, after));
            }
        }
    }

    fn drain(&mut self, tick: u32) {
        if let Some(dpad) = self.dpad.as_mut() {
            log_events(
                &mut self.events,
                tick,
                ControlKind::Dpad,
                dpad.drain_events().into_iter().map(Emitted::Pad),
            );
        }
        if let Some(joystick) = self.joystick.as_mut() {
            log_events(
                &mut self.events,
                tick,
                ControlKind::Joystick,
                joystick.drain_events().into_iter().map(Emitted::Pad),
            );
        }
        if let Some(button) = self.button.as_mut() {
            log_events(
                &mut self.events,
                tick,
                ControlKind::Button,
                button.drain_events().into_iter().map(Emitted::Button),
            );
        }
    }
}

fn log_events(
    log: &mut Vec<LoggedEvent>,
    tick: u32,
    control: ControlKind,
    events: impl Iterator<Item = Emitted>,
) {
    for event in events {
        tracing::info!(tick, ?control, ?event, "control event");
        log.push(LoggedEvent {
            tick,
            control,
            event,
        });
    }
}

fn state_change(tick: u32, from: LocomotionState, to: LocomotionState) -> StateChange {
    StateChange {
        tick,
        from: from.to_string(),
        to: to.to_string(),
        register: to.to_register(),
    }
}

fn request_character(character: &mut SideScroller, tick: u32, request: Request, slot: Option<u8>) {
    let slot = slot.unwrap_or(1);
    let result = match request {
        Request::Idle => {
            character.set_idle();
            Ok(())
        }
        Request::Grounded => character.set_grounded(slot),
        Request::Airborne => character.set_airborne(slot),
        Request::Fall => character.fall(),
        Request::Custom => character.enter_custom(slot),
        Request::Jump => {
            if !character.jump() {
                tracing::info!(tick, jumps = character.jump_count(), "jump refused");
            }
            Ok(())
        }
        Request::DisableMovement => {
            character.toggle_movement_disabled(true);
            Ok(())
        }
        Request::EnableMovement => {
            character.toggle_movement_disabled(false);
            Ok(())
        }
    };
    match result {
        Ok(()) => tracing::debug!(tick, ?request, state = %character.state(), "character request"),
        Err(e) => tracing::warn!(tick, ?request, "character request rejected: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactile_core::Direction;

    fn run(text: &str) -> Report {
        let scenario = Scenario::from_toml(text).unwrap();
        Simulation::new(&scenario).unwrap().run(&scenario)
    }

    #[test]
    fn test_joystick_press_and_release() {
        let report = run(r#"
[controls.joystick]
size = [200.0, 200.0]
radius = 100.0
deadzone_extent = 10.0
cardinal_span = 0.7853982

[[steps]]
tick = 0
kind = "pointer"
control = "joystick"
phase = "down"
id = 3
position = [150.0, 100.0]

[[steps]]
tick = 2
kind = "pointer"
control = "joystick"
phase = "up"
id = 3
position = [150.0, 100.0]
"#);
        assert_eq!(report.ticks, 3);
        let directions: Vec<_> = report
            .events
            .iter()
            .filter_map(|logged| match &logged.event {
                Emitted::Pad(PadEvent::DirectionChanged { pointer, direction }) => {
                    Some((logged.tick, *pointer, *direction))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            directions,
            vec![
                (0, Some(PointerId(3)), Direction::RIGHT),
                (2, None, Direction::NEUTRAL),
            ]
        );
    }

    #[test]
    fn test_pause_defers_button_release() {
        let report = run(r#"
[controls.button]

[[steps]]
tick = 0
kind = "pointer"
control = "button"
phase = "down"
position = [50.0, 50.0]

[[steps]]
tick = 1
kind = "lifecycle"
event = "paused"

[[steps]]
tick = 3
kind = "lifecycle"
control = "button"
event = "unpaused"
"#);
        let released: Vec<u32> = report
            .events
            .iter()
            .filter(|logged| matches!(logged.event, Emitted::Button(ButtonEvent::Released)))
            .map(|logged| logged.tick)
            .collect();
        assert_eq!(released, vec![3]);
    }

    #[test]
    fn test_character_falls_and_lands() {
        let report = run(r#"
tick_rate = 10
ticks = 6

[character]
[[character.jumping]]
gravity = 10.0

[[steps]]
tick = 1
kind = "floor"
on_floor = false

[[steps]]
tick = 4
kind = "floor"
on_floor = true
"#);
        let character = report.character.unwrap();
        assert_eq!(character.state, "idle");
        assert_eq!(character.register, 1);
        assert_eq!(character.velocity, Vec2::ZERO);
        let changes: Vec<_> = character
            .changes
            .iter()
            .map(|c| (c.tick, c.to.as_str()))
            .collect();
        assert_eq!(changes, vec![(1, "falling"), (4, "idle")]);
        assert!(character.position.y > 0.0);
    }

    #[test]
    fn test_demo_scenario() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/basic.toml");
        let scenario = Scenario::load(&path).unwrap();
        let report = Simulation::new(&scenario).unwrap().run(&scenario);
        assert_eq!(report.ticks, 90);

        let character = report.character.unwrap();
        let changes: Vec<_> = character
            .changes
            .iter()
            .map(|c| (c.tick, c.to.as_str()))
            .collect();
        assert_eq!(
            changes,
            vec![(0, "running"), (20, "jump_1"), (30, "jump_2"), (60, "idle")]
        );
        assert!(report.events.iter().any(|logged| matches!(
            &logged.event,
            Emitted::Pad(PadEvent::Action { name, pressed: true }) if name == "move_right"
        )));
    }

    #[test]
    fn test_report_serializes() {
        let report = run(r#"
[controls.button]
action = "fire"

[[steps]]
tick = 0
kind = "pointer"
control = "button"
phase = "down"
position = [10.0, 10.0]
"#);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["events"][0]["control"], "button");
        assert_eq!(json["events"][0]["event"]["event"], "action");
        assert_eq!(json["events"][0]["event"]["data"]["name"], "fire");
        assert_eq!(json["events"][1]["event"]["event"], "pressed");
        assert!(json.get("character").is_none());
    }
}
