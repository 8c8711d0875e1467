//! Touch button
//!
//! A button is pressed by a pointer landing inside it (the control rect, and
//! when `radius` is non-zero also the circle of that radius around the
//! rect's center) and released when that pointer lifts. It optionally
//! drives a named action and reports how long it was held.

use glam::Vec2;
use tactile_shared::{Lifecycle, PointerId, Rect};

use crate::control::TouchControl;
use crate::event::ButtonEvent;
use crate::ownership::PointerOwnership;

#[derive(Debug, Clone)]
pub struct TouchButton {
    ownership: PointerOwnership,
    size: Vec2,
    /// 0 disables the circular test
    radius: f32,
    action: Option<String>,
    /// Lifting outside only clears the press without reporting a release
    release_only_inside: bool,
    accumulate_held_time: bool,
    pass_by_press: bool,
    held_time: f32,

    input_enabled: bool,
    paused: bool,
    pending: Vec<ButtonEvent>,
    events: Vec<ButtonEvent>,
}

impl TouchButton {
    pub fn new(size: Vec2) -> Self {
        Self {
            ownership: PointerOwnership::new(),
            size,
            radius: 0.0,
            action: None,
            release_only_inside: true,
            accumulate_held_time: false,
            pass_by_press: false,
            held_time: 0.0,
            input_enabled: true,
            paused: false,
            pending: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Empty names clear the action
    pub fn set_action(&mut self, action: Option<String>) {
        self.action = action.filter(|a| !a.is_empty());
    }

    pub fn is_release_only_inside(&self) -> bool {
        self.release_only_inside
    }

    pub fn set_release_only_inside(&mut self, inside: bool) {
        self.release_only_inside = inside;
    }

    pub fn is_accumulating_held_time(&self) -> bool {
        self.accumulate_held_time
    }

    pub fn set_accumulate_held_time(&mut self, accumulate: bool) {
        self.accumulate_held_time = accumulate;
    }

    pub fn set_pass_by_press(&mut self, pass_by_press: bool) {
        self.pass_by_press = pass_by_press;
    }

    pub fn is_held(&self) -> bool {
        self.ownership.is_owned()
    }

    /// Seconds held so far (only counted while accumulating)
    pub fn held_time(&self) -> f32 {
        self.held_time
    }

    pub fn accepts_input(&self) -> bool {
        self.input_enabled && !self.paused
    }

    pub fn has_point(&self, position: Vec2) -> bool {
        Rect::from_size(self.size).has_point(position)
            && (self.radius == 0.0 || (position - self.size * 0.5).length() <= self.radius)
    }

    /// Once per fixed tick
    pub fn physics_process(&mut self, dt: f32) {
        if self.accumulate_held_time && self.is_held() && dt > 0.0 {
            self.held_time += dt;
        }
    }

    fn action_event(&self, pressed: bool) -> Option<ButtonEvent> {
        self.action.as_ref().map(|name| ButtonEvent::Action {
            name: name.clone(),
            pressed,
        })
    }

    fn press(&mut self, id: PointerId) {
        if !self.ownership.claim(id) {
            return;
        }
        self.held_time = 0.0;
        self.pending.clear();
        tracing::debug!("button pressed by pointer {}", id);
        let action = self.action_event(true);
        self.events.extend(action);
        self.events.push(ButtonEvent::Pressed);
    }

    fn release_events(&self) -> Vec<ButtonEvent> {
        let mut events = vec![ButtonEvent::Released];
        if self.accumulate_held_time {
            events.push(ButtonEvent::ReleasedWithHeldTime(self.held_time));
        }
        events
    }

    /// Clear the press. The action is always released immediately; the
    /// release notification is queued, held until resume, or dropped.
    fn release(&mut self, notify: Notify) {
        let Some(previous) = self.ownership.release() else {
            return;
        };
        tracing::debug!(?notify, "button released by pointer {}", previous);
        let action = self.action_event(false);
        self.events.extend(action);
        match notify {
            Notify::Now => {
                self.pending.clear();
                let events = self.release_events();
                self.events.extend(events);
            }
            Notify::OnResume => self.pending = self.release_events(),
            Notify::Never => self.pending.clear(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Notify {
    Now,
    OnResume,
    Never,
}

impl TouchControl for TouchButton {
    type Event = ButtonEvent;

    fn on_pointer_down(&mut self, id: PointerId, position: Vec2) {
        if self.accepts_input() && !self.is_held() && self.has_point(position) {
            self.press(id);
        }
    }

    fn on_pointer_move(&mut self, id: PointerId, position: Vec2) {
        if self.accepts_input() && self.pass_by_press && !self.is_held() && self.has_point(position)
        {
            self.press(id);
        }
    }

    fn on_pointer_up(&mut self, id: PointerId, position: Vec2) {
        if !self.ownership.is_owned_by(id) {
            return;
        }
        if self.has_point(position) || !self.release_only_inside {
            self.release(Notify::Now);
        } else {
            self.release(Notify::Never);
        }
    }

    fn lifecycle(&mut self, event: Lifecycle) {
        match event {
            Lifecycle::ExitTree | Lifecycle::Paused => {
                self.paused = true;
                self.release(Notify::OnResume);
            }
            Lifecycle::EnterTree | Lifecycle::Unpaused => {
                self.paused = false;
                self.events.append(&mut self.pending);
            }
            Lifecycle::VisibilityChanged(visible) => {
                self.input_enabled = visible;
                if !visible {
                    self.release(Notify::Now);
                }
            }
            Lifecycle::Resized(size) => self.set_size(size),
        }
    }

    fn owner(&self) -> Option<PointerId> {
        self.ownership.owner()
    }

    fn drain_events(&mut self) -> Vec<ButtonEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> TouchButton {
        let mut b = TouchButton::new(Vec2::splat(100.0));
        b.set_action(Some("jump".into()));
        b
    }

    fn action(pressed: bool) -> ButtonEvent {
        ButtonEvent::Action { name: "jump".into(), pressed }
    }

    #[test]
    fn test_press_and_release_inside() {
        let mut b = button();
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        assert!(b.is_held());
        b.on_pointer_up(PointerId(0), Vec2::splat(60.0));
        assert!(!b.is_held());
        assert_eq!(
            b.drain_events(),
            vec![action(true), ButtonEvent::Pressed, action(false), ButtonEvent::Released]
        );
    }

    #[test]
    fn test_radius_limits_hit_area() {
        let mut b = button();
        b.set_radius(40.0);
        // Corner of the rect is outside the circle
        b.on_pointer_down(PointerId(0), Vec2::new(5.0, 5.0));
        assert!(!b.is_held());
        b.on_pointer_down(PointerId(0), Vec2::new(80.0, 50.0));
        assert!(b.is_held());
    }

    #[test]
    fn test_release_outside_clears_without_notifying() {
        let mut b = button();
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        b.drain_events();
        b.on_pointer_up(PointerId(0), Vec2::new(300.0, 50.0));
        assert!(!b.is_held());
        assert_eq!(b.drain_events(), vec![action(false)]);

        // The button is usable again
        b.on_pointer_down(PointerId(1), Vec2::splat(50.0));
        assert_eq!(b.owner(), Some(PointerId(1)));
    }

    #[test]
    fn test_release_outside_allowed() {
        let mut b = button();
        b.set_release_only_inside(false);
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        b.drain_events();
        b.on_pointer_up(PointerId(0), Vec2::new(300.0, 50.0));
        assert_eq!(b.drain_events(), vec![action(false), ButtonEvent::Released]);
    }

    #[test]
    fn test_other_pointer_cannot_release() {
        let mut b = button();
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        b.on_pointer_down(PointerId(1), Vec2::splat(50.0));
        b.on_pointer_up(PointerId(1), Vec2::splat(50.0));
        assert_eq!(b.owner(), Some(PointerId(0)));
    }

    #[test]
    fn test_held_time() {
        let mut b = button();
        b.set_accumulate_held_time(true);
        b.physics_process(1.0);
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        b.physics_process(0.25);
        b.physics_process(0.25);
        b.on_pointer_up(PointerId(0), Vec2::splat(50.0));
        let events = b.drain_events();
        assert_eq!(events.last(), Some(&ButtonEvent::ReleasedWithHeldTime(0.5)));
    }

    #[test]
    fn test_pause_defers_release() {
        let mut b = button();
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        b.drain_events();

        b.on_deactivate();
        assert!(!b.is_held());
        assert_eq!(b.drain_events(), vec![action(false)]);
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        assert!(!b.is_held());

        b.on_activate();
        assert_eq!(b.drain_events(), vec![ButtonEvent::Released]);
        b.on_activate();
        assert!(b.drain_events().is_empty());
    }

    #[test]
    fn test_hidden_releases_and_blocks_input() {
        let mut b = button();
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        b.drain_events();
        b.on_visibility_changed(false);
        assert_eq!(b.drain_events(), vec![action(false), ButtonEvent::Released]);
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        assert!(!b.is_held());
        b.on_visibility_changed(true);
        b.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        assert!(b.is_held());
    }

    #[test]
    fn test_pass_by_press() {
        let mut b = TouchButton::new(Vec2::splat(100.0));
        b.on_pointer_move(PointerId(2), Vec2::splat(50.0));
        assert!(!b.is_held());
        b.set_pass_by_press(true);
        b.on_pointer_move(PointerId(2), Vec2::splat(50.0));
        assert_eq!(b.drain_events(), vec![ButtonEvent::Pressed]);
    }

    #[test]
    fn test_empty_action_is_none() {
        let mut b = button();
        b.set_action(Some(String::new()));
        assert_eq!(b.action(), None);
    }
}
