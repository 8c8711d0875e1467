//! Transition and custom-state hooks
//!
//! Gameplay code decides when a hand-off completes (e.g. waiting for a
//! landing animation) and drives custom states. Anything left unhandled is
//! permissive: hand-offs complete immediately and custom states keep their
//! velocity.

use glam::Vec2;
use hashbrown::HashMap;
use std::fmt;

use crate::state::Endpoint;

pub trait TransitionHooks {
    /// Return false to keep the hand-off pending for another tick
    fn transition(&mut self, from: Endpoint, to: Endpoint, dt: f32) -> bool {
        let _ = (from, to, dt);
        true
    }

    /// Per-tick body of a custom state
    fn custom_state(&mut self, id: u8, dt: f32, velocity: &mut Vec2) {
        let _ = (id, dt, velocity);
    }
}

/// No hooks at all
impl TransitionHooks for () {}

type TransitionFn = Box<dyn FnMut(f32) -> bool>;
type CustomStateFn = Box<dyn FnMut(f32, &mut Vec2)>;

/// Hooks registered as closures at configuration time
#[derive(Default)]
pub struct HookTable {
    transitions: HashMap<(Endpoint, Endpoint), TransitionFn>,
    custom_states: HashMap<u8, CustomStateFn>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the completion check for the `from -> to` hand-off
    pub fn on_transition(
        &mut self,
        from: Endpoint,
        to: Endpoint,
        hook: impl FnMut(f32) -> bool + 'static,
    ) -> &mut Self {
        self.transitions.insert((from, to), Box::new(hook));
        self
    }

    /// Register the per-tick body of custom state `id`
    pub fn on_custom_state(
        &mut self,
        id: u8,
        hook: impl FnMut(f32, &mut Vec2) + 'static,
    ) -> &mut Self {
        self.custom_states.insert(id, Box::new(hook));
        self
    }

    pub fn has_transition(&self, from: Endpoint, to: Endpoint) -> bool {
        self.transitions.contains_key(&(from, to))
    }
}

impl TransitionHooks for HookTable {
    fn transition(&mut self, from: Endpoint, to: Endpoint, dt: f32) -> bool {
        match self.transitions.get_mut(&(from, to)) {
            Some(hook) => hook(dt),
            None => true,
        }
    }

    fn custom_state(&mut self, id: u8, dt: f32, velocity: &mut Vec2) {
        if let Some(hook) = self.custom_states.get_mut(&id) {
            hook(dt, velocity);
        }
    }
}

impl fmt::Debug for HookTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookTable")
            .field("transitions", &self.transitions.len())
            .field("custom_states", &self.custom_states.len())
            .finish()
    }
}
