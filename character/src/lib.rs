//! Tactile Character - side-scroller locomotion
//!
//! A per-tick state machine that turns floor contact and gameplay requests
//! into a velocity for the host's physics body.
//!
//! # Architecture
//!
//! - [`SideScroller`] - State machine and velocity owner
//! - [`LocomotionState`] - Idle, grounded, airborne, custom, or a hand-off
//!   between two of them; packs into a 16-bit register
//! - [`MovementProfile`] - Velocity models ([`GroundedMovementData1D`],
//!   [`MovementData2D`]) shared read-only between characters
//! - [`TransitionHooks`] - Gameplay callbacks that gate hand-offs and drive
//!   custom states
//! - [`CharacterConfig`] - TOML profile files

pub mod config;
pub mod controller;
pub mod error;
pub mod hooks;
pub mod profile;
pub mod slots;
pub mod state;

pub use config::{CharacterConfig, GroundedProfileConfig, JumpingProfileConfig};
pub use controller::{CharacterBody, SideScroller};
pub use error::{CharacterError, ProfileKind};
pub use hooks::{HookTable, TransitionHooks};
pub use profile::{GroundedMovementData1D, MovementData2D, MovementProfile};
pub use slots::{MAX_PROFILES, ProfileSlots};
pub use state::{Endpoint, LocomotionState, transition_hook_name};
