//! Check command - load a scenario and describe what it configures
//!
//! Values outside their valid range are clamped while building and logged
//! as warnings, so running `check` surfaces layout mistakes without a full
//! simulation.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use tactile_core::TouchControl;

use crate::scenario::Scenario;

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    for line in describe(&scenario)? {
        println!("{line}");
    }
    Ok(())
}

fn describe(scenario: &Scenario) -> Result<Vec<String>> {
    let mut lines = vec![format!(
        "{} steps over {} ticks at {} Hz",
        scenario.steps.len(),
        scenario.total_ticks(),
        scenario.tick_rate
    )];

    if let Some(dpad) = scenario.controls.build_dpad() {
        lines.push(format!(
            "dpad: rect {:?}, deadzone {}, span {}, outline {} points",
            dpad.position_rect(),
            dpad.deadzone_extent(),
            dpad.cardinal_span(),
            dpad.deadzone_outline().len()
        ));
    }
    if let Some(joystick) = scenario.controls.build_joystick() {
        lines.push(format!(
            "joystick: radius {}, deadzone {}, span {:.3} rad, speed monitor {}, owner {}",
            joystick.radius(),
            joystick.deadzone_extent(),
            joystick.cardinal_span(),
            if joystick.is_monitoring_speed() { "on" } else { "off" },
            joystick.owner_index().context("joystick owner index")?
        ));
    }
    if let Some(button) = scenario.controls.build_button() {
        lines.push(format!(
            "button: size {}, radius {}, action {}",
            button.size(),
            button.radius(),
            button.action().unwrap_or("-")
        ));
    }

    if let Some(config) = &scenario.character {
        let character = config.build().context("failed to build character")?;
        lines.push(format!(
            "character: {} grounded, {} jumping profiles, up to {} jumps",
            character.grounded_profiles().len(),
            character.jumping_profiles().len(),
            character.max_jump_count()
        ));
        for (slot, profile) in character.jumping_profiles().iter() {
            lines.push(format!(
                "  jumping {slot}: gravity {:.2}, jump velocity {:.2}",
                profile.gravity(),
                profile.initial_jump_velocity()
            ));
        }
    }
    Ok(lines)
}
