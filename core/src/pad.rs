//! Shared pad behavior
//!
//! [`TouchPad`] holds everything the D-pad and the joystick have in common:
//! pointer ownership, the current direction, deadzone/span storage, the
//! reference center, lifecycle handling and the outgoing event queue. The
//! concrete pads own a `TouchPad` and add their own hit test, clamping and
//! classification on top.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tactile_shared::{Direction, Lifecycle, PointerId};

use crate::event::PadEvent;
use crate::ownership::PointerOwnership;

/// Optional action names pressed while the matching direction bit is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down: Option<String>,
}

impl DirectionActions {
    fn iter(&self) -> impl Iterator<Item = (Direction, &str)> {
        [
            (Direction::LEFT, &self.left),
            (Direction::RIGHT, &self.right),
            (Direction::UP, &self.up),
            (Direction::DOWN, &self.down),
        ]
        .into_iter()
        .filter_map(|(bit, name)| name.as_deref().map(|n| (bit, n)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Action events for going from `old` to `new`: releases first, then presses
    fn transition_events(&self, old: Direction, new: Direction) -> Vec<PadEvent> {
        let released = old - new;
        let pressed = new - old;
        let mut events = Vec::new();
        for (bit, name) in self.iter() {
            if released.contains(bit) {
                events.push(PadEvent::Action {
                    name: name.to_string(),
                    pressed: false,
                });
            }
        }
        for (bit, name) in self.iter() {
            if pressed.contains(bit) {
                events.push(PadEvent::Action {
                    name: name.to_string(),
                    pressed: true,
                });
            }
        }
        events
    }
}

/// State and behavior shared by every pad
#[derive(Debug, Clone)]
pub struct TouchPad {
    ownership: PointerOwnership,
    direction: Direction,

    centered: bool,
    center_offset: Vec2,
    pass_by_press: bool,
    center_point: Vec2,

    current_touch_pos: Vec2,
    touch_pos_on_initial_press: Vec2,

    deadzone_extent: f32,
    cardinal_span: f32,

    input_enabled: bool,
    paused: bool,
    /// Release notification held back until the host resumes
    pending: Option<PadEvent>,

    actions: DirectionActions,
    events: Vec<PadEvent>,
}

impl TouchPad {
    pub fn new(deadzone_extent: f32, cardinal_span: f32) -> Self {
        Self {
            ownership: PointerOwnership::new(),
            direction: Direction::NEUTRAL,
            centered: true,
            center_offset: Vec2::ZERO,
            pass_by_press: false,
            center_point: Vec2::ZERO,
            current_touch_pos: Vec2::ZERO,
            touch_pos_on_initial_press: Vec2::ZERO,
            deadzone_extent,
            cardinal_span,
            input_enabled: true,
            paused: false,
            pending: None,
            actions: DirectionActions::default(),
            events: Vec::new(),
        }
    }

    // === Configuration ===

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    pub(crate) fn set_centered(&mut self, centered: bool) {
        self.centered = centered;
    }

    pub fn center_offset(&self) -> Vec2 {
        self.center_offset
    }

    pub fn set_center_offset(&mut self, offset: Vec2) {
        self.center_offset = offset;
    }

    pub fn is_pass_by_press(&self) -> bool {
        self.pass_by_press
    }

    pub fn set_pass_by_press(&mut self, pass_by_press: bool) {
        self.pass_by_press = pass_by_press;
    }

    pub fn actions(&self) -> &DirectionActions {
        &self.actions
    }

    pub fn set_actions(&mut self, actions: DirectionActions) {
        self.actions = actions;
    }

    pub fn deadzone_extent(&self) -> f32 {
        self.deadzone_extent
    }

    pub fn cardinal_span(&self) -> f32 {
        self.cardinal_span
    }

    /// Store an already clamped deadzone. Returns false if unchanged.
    pub(crate) fn store_deadzone_extent(&mut self, extent: f32) -> bool {
        if extent == self.deadzone_extent {
            return false;
        }
        self.deadzone_extent = extent;
        true
    }

    /// Store an already clamped span. Returns false if unchanged.
    pub(crate) fn store_cardinal_span(&mut self, span: f32) -> bool {
        if span == self.cardinal_span {
            return false;
        }
        self.cardinal_span = span;
        true
    }

    // === Geometry ===

    pub fn center_point(&self) -> Vec2 {
        self.center_point
    }

    pub(crate) fn set_center_point(&mut self, point: Vec2) {
        self.center_point = point;
    }

    /// Layout center shifted by the configured offset
    pub fn reference_center(&self) -> Vec2 {
        self.center_point + self.center_offset
    }

    pub fn current_touch_pos(&self) -> Vec2 {
        self.current_touch_pos
    }

    pub(crate) fn set_current_touch_pos(&mut self, pos: Vec2) {
        self.current_touch_pos = pos;
    }

    pub fn touch_pos_on_initial_press(&self) -> Vec2 {
        self.touch_pos_on_initial_press
    }

    // === Ownership and direction ===

    pub fn owner(&self) -> Option<PointerId> {
        self.ownership.owner()
    }

    pub fn is_owned_by(&self, id: PointerId) -> bool {
        self.ownership.is_owned_by(id)
    }

    pub fn is_pressed(&self) -> bool {
        self.ownership.is_owned()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// False while hidden or paused
    pub fn accepts_input(&self) -> bool {
        self.input_enabled && !self.paused
    }

    /// Claim the pad for `id`, remembering where the press is considered to start
    pub(crate) fn claim(&mut self, id: PointerId, initial_press: Vec2) -> bool {
        if !self.ownership.claim(id) {
            return false;
        }
        self.touch_pos_on_initial_press = initial_press;
        // A stale release notification must not follow a fresh press
        self.pending = None;
        tracing::debug!("pad claimed by pointer {}", id);
        true
    }

    /// Set a newly classified direction, emitting only on change
    pub(crate) fn update_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction {
            return false;
        }
        let actions = self.actions.transition_events(self.direction, direction);
        self.events.extend(actions);
        self.direction = direction;
        self.notify_direction();
        true
    }

    /// Emit the current direction for the current owner
    pub(crate) fn notify_direction(&mut self) {
        self.events.push(PadEvent::DirectionChanged {
            pointer: self.ownership.owner(),
            direction: self.direction,
        });
    }

    /// Release the owning pointer and reset to neutral.
    ///
    /// With `deferred` the neutral notification is held until the host
    /// resumes; action releases are always emitted immediately.
    pub(crate) fn release(&mut self, deferred: bool) -> Option<PointerId> {
        let previous = self.ownership.release()?;

        let actions = self
            .actions
            .transition_events(self.direction, Direction::NEUTRAL);
        self.events.extend(actions);
        self.direction = Direction::NEUTRAL;
        self.current_touch_pos = Vec2::ZERO;
        self.touch_pos_on_initial_press = Vec2::ZERO;

        let event = PadEvent::DirectionChanged {
            pointer: None,
            direction: Direction::NEUTRAL,
        };
        if deferred {
            self.pending = Some(event);
        } else {
            self.pending = None;
            self.events.push(event);
        }
        tracing::debug!(deferred, "pad released by pointer {}", previous);
        Some(previous)
    }

    pub fn has_pending_release(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn push_event(&mut self, event: PadEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<PadEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a lifecycle notification.
    ///
    /// Returns the new size for `Resized` so the owning pad can re-run its
    /// layout; everything else is handled here.
    pub(crate) fn handle_lifecycle(&mut self, event: Lifecycle) -> Option<Vec2> {
        match event {
            Lifecycle::ExitTree | Lifecycle::Paused => {
                self.paused = true;
                self.release(true);
            }
            Lifecycle::EnterTree | Lifecycle::Unpaused => {
                self.paused = false;
                if let Some(pending) = self.pending.take() {
                    self.events.push(pending);
                }
            }
            Lifecycle::VisibilityChanged(visible) => {
                self.input_enabled = visible;
                if !visible {
                    self.release(false);
                }
            }
            Lifecycle::Resized(size) => return Some(size),
        }
        None
    }
}
