//! Common surface of every touch control
//!
//! The host forwards pointer events and lifecycle notifications through
//! this trait and drains the queued events once per frame.

use glam::Vec2;
use std::num::TryFromIntError;
use tactile_shared::{Lifecycle, PointerEvent, PointerId};

pub trait TouchControl {
    /// Event type queued by this control
    type Event;

    fn on_pointer_down(&mut self, id: PointerId, position: Vec2);
    fn on_pointer_move(&mut self, id: PointerId, position: Vec2);
    fn on_pointer_up(&mut self, id: PointerId, position: Vec2);

    /// React to a host lifecycle notification
    fn lifecycle(&mut self, event: Lifecycle);

    /// Pointer currently owning the control
    fn owner(&self) -> Option<PointerId>;

    /// Take every event queued since the last drain
    fn drain_events(&mut self) -> Vec<Self::Event>;

    /// Validate and dispatch a pointer event.
    ///
    /// Events with non-finite positions are dropped without touching state.
    fn pointer_event(&mut self, event: &PointerEvent) {
        if !event.is_well_formed() {
            tracing::trace!(?event, "dropping malformed pointer event");
            return;
        }
        match *event {
            PointerEvent::Down { id, position } => self.on_pointer_down(id, position),
            PointerEvent::Move { id, position } => self.on_pointer_move(id, position),
            PointerEvent::Up { id, position } => self.on_pointer_up(id, position),
        }
    }

    fn on_activate(&mut self) {
        self.lifecycle(Lifecycle::Unpaused);
    }

    fn on_deactivate(&mut self) {
        self.lifecycle(Lifecycle::Paused);
    }

    fn on_visibility_changed(&mut self, visible: bool) {
        self.lifecycle(Lifecycle::VisibilityChanged(visible));
    }

    /// Owner as the host's integer index (`-1` when unowned)
    fn owner_index(&self) -> Result<i32, TryFromIntError> {
        PointerId::raw_index(self.owner())
    }
}
