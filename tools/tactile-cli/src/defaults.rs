//! Defaults command - print a controls layout with every default spelled out

use anyhow::{Context, Result};
use clap::Args;

use tactile_core::{ButtonConfig, ControlsConfig, DPadConfig, JoystickConfig};

/// Arguments for the defaults command
#[derive(Args)]
pub struct DefaultsArgs {}

/// Execute the defaults command
pub fn execute(_args: DefaultsArgs) -> Result<()> {
    let config = ControlsConfig {
        dpad: Some(DPadConfig::default()),
        joystick: Some(JoystickConfig::default()),
        button: Some(ButtonConfig::default()),
    };
    print!("{}", config.to_toml().context("failed to encode defaults")?);
    Ok(())
}
