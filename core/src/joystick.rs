//! Virtual analog stick
//!
//! The joystick accepts presses inside its control rectangle that also fall
//! within `radius` of its reference center, and classifies the drag offset
//! radially with [`classify_radial`]. Unlike the D-pad, its deadzone is in
//! raw units and its cardinal span is an angle in radians.
//!
//! With speed monitoring enabled, [`Joystick::physics_process`] estimates
//! drag and rotation speed once per tick and reports them.

mod layout;
mod speed;

pub use layout::{
    DEFAULT_NORMAL_SCALE, DEFAULT_PRESSED_SCALE, DEFAULT_STICK_SCALE, JoystickLayers, LayerRects,
    TextureLayer,
};
pub use speed::SpeedMonitor;

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;
use tactile_shared::{Direction, Lifecycle, PointerId, Rect};

use crate::classify::classify_radial;
use crate::control::TouchControl;
use crate::event::PadEvent;
use crate::pad::{DirectionActions, TouchPad};

pub const DEFAULT_DEADZONE_EXTENT: f32 = 0.4;
pub const DEFAULT_CARDINAL_SPAN: f32 = 0.575;
pub const DEFAULT_RADIUS: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct Joystick {
    pad: TouchPad,
    size: Vec2,
    radius: f32,
    /// Classify relative to where the finger landed instead of the center
    normal_moved_to_touch_pos: bool,
    /// Keep the stick within `radius` of its origin
    stick_confined_inside: bool,
    layers: JoystickLayers,
    monitor: Option<SpeedMonitor>,
}

impl Joystick {
    pub fn new(size: Vec2) -> Self {
        let mut joystick = Self {
            pad: TouchPad::new(DEFAULT_DEADZONE_EXTENT, DEFAULT_CARDINAL_SPAN),
            size,
            radius: DEFAULT_RADIUS,
            normal_moved_to_touch_pos: false,
            stick_confined_inside: false,
            layers: JoystickLayers::default(),
            monitor: None,
        };
        joystick.update_layout();
        joystick
    }

    pub fn pad(&self) -> &TouchPad {
        &self.pad
    }

    pub fn direction(&self) -> Direction {
        self.pad.direction()
    }

    // === Configuration ===

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.update_layout();
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Negative radii clamp to 0; the deadzone is re-clamped to the new radius
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
        if self.pad.deadzone_extent() > self.radius {
            self.pad.store_deadzone_extent(self.radius);
        }
    }

    pub fn deadzone_extent(&self) -> f32 {
        self.pad.deadzone_extent()
    }

    /// Clamped to `[0, radius]`
    pub fn set_deadzone_extent(&mut self, extent: f32) {
        let extent = extent.max(0.0).min(self.radius);
        self.pad.store_deadzone_extent(extent);
    }

    pub fn cardinal_span(&self) -> f32 {
        self.pad.cardinal_span()
    }

    /// Clamped to `[0, π/2]`
    pub fn set_cardinal_span(&mut self, span: f32) {
        let span = span.max(0.0).min(FRAC_PI_2);
        self.pad.store_cardinal_span(span);
    }

    pub fn set_centered(&mut self, centered: bool) {
        self.pad.set_centered(centered);
        self.update_layout();
    }

    pub fn set_center_offset(&mut self, offset: Vec2) {
        self.pad.set_center_offset(offset);
    }

    pub fn set_pass_by_press(&mut self, pass_by_press: bool) {
        self.pad.set_pass_by_press(pass_by_press);
    }

    pub fn set_actions(&mut self, actions: DirectionActions) {
        self.pad.set_actions(actions);
    }

    pub fn is_normal_moved_to_touch_pos(&self) -> bool {
        self.normal_moved_to_touch_pos
    }

    pub fn set_normal_moved_to_touch_pos(&mut self, moved: bool) {
        self.normal_moved_to_touch_pos = moved;
    }

    pub fn is_stick_confined_inside(&self) -> bool {
        self.stick_confined_inside
    }

    pub fn set_stick_confined_inside(&mut self, confined: bool) {
        self.stick_confined_inside = confined;
    }

    pub fn layers(&self) -> &JoystickLayers {
        &self.layers
    }

    pub fn set_layers(&mut self, layers: JoystickLayers) {
        self.layers = layers;
        self.update_layout();
    }

    pub fn is_monitoring_speed(&self) -> bool {
        self.monitor.is_some()
    }

    /// Turning monitoring off drops the estimator and its state
    pub fn set_monitor_speed(&mut self, monitor: bool) {
        match (monitor, self.monitor.is_some()) {
            (true, false) => {
                let mut m = SpeedMonitor::new();
                if self.pad.is_pressed() {
                    m.start(self.raw_offset());
                }
                self.monitor = Some(m);
            }
            (false, true) => self.monitor = None,
            _ => {}
        }
    }

    /// Smallest size the host should give the control
    pub fn minimum_size(&self) -> Vec2 {
        self.layers.minimum_size().unwrap_or(Vec2::ZERO)
    }

    // === Layout ===

    fn update_layout(&mut self) {
        let center = if self.pad.is_centered() {
            self.size * 0.5
        } else {
            Vec2::splat(self.size.x.min(self.size.y) * 0.5)
        };
        self.pad.set_center_point(center);
        self.layers.update(self.size, self.pad.is_centered());
    }

    /// Point offsets are measured from while classifying
    fn classification_center(&self) -> Vec2 {
        if self.normal_moved_to_touch_pos && self.pad.is_pressed() {
            self.pad.touch_pos_on_initial_press()
        } else {
            self.pad.reference_center()
        }
    }

    fn raw_offset(&self) -> Vec2 {
        self.pad.current_touch_pos() - self.classification_center()
    }

    fn is_inside(&self, position: Vec2) -> bool {
        Rect::from_size(self.size).has_point(position)
            && (position - self.pad.reference_center()).length() <= self.radius
    }

    // === Outputs ===

    /// Stick displacement from its origin, zero while released
    pub fn stick_offset(&self) -> Vec2 {
        if !self.pad.is_pressed() {
            return Vec2::ZERO;
        }
        let offset = self.raw_offset();
        if self.stick_confined_inside {
            offset.clamp_length_max(self.radius)
        } else {
            offset
        }
    }

    /// Stick displacement scaled by the radius, at most unit length
    pub fn analog(&self) -> Vec2 {
        if self.radius <= 0.0 {
            return Vec2::ZERO;
        }
        (self.stick_offset() / self.radius).clamp_length_max(1.0)
    }

    /// Stick angle in radians (+y is down)
    pub fn angle(&self) -> f32 {
        let offset = self.stick_offset();
        offset.y.atan2(offset.x)
    }

    pub fn drag_speed(&self) -> Vec2 {
        self.monitor.map_or(Vec2::ZERO, |m| m.drag_speed())
    }

    pub fn rotation_speed(&self) -> f32 {
        self.monitor.map_or(0.0, |m| m.rotation_speed())
    }

    /// Rectangles to draw each layer at right now
    pub fn layer_rects(&self) -> LayerRects {
        let pressed = self.pad.is_pressed();
        let drawn = |layer: &TextureLayer| layer.texture_size.map(|_| layer.rect());
        let follow_touch = |layer: &TextureLayer| {
            drawn(layer).map(|rect| {
                if self.normal_moved_to_touch_pos && pressed {
                    rect.moved_to(self.pad.touch_pos_on_initial_press())
                } else {
                    rect
                }
            })
        };
        let stick = drawn(&self.layers.stick).map(|rect| {
            if pressed {
                rect.moved_to(self.classification_center() + self.stick_offset())
            } else {
                rect
            }
        });
        LayerRects {
            normal: follow_touch(&self.layers.normal),
            pressed: follow_touch(&self.layers.pressed).filter(|_| pressed),
            stick,
        }
    }

    // === Input ===

    fn classify(&mut self, position: Vec2) -> bool {
        self.pad.set_current_touch_pos(position);
        let offset = position - self.classification_center();
        let direction = classify_radial(
            offset,
            self.pad.deadzone_extent(),
            self.pad.cardinal_span(),
        );
        self.pad.update_direction(direction)
    }

    fn claim(&mut self, id: PointerId, initial_press: Vec2, position: Vec2) {
        self.pad.claim(id, initial_press);
        self.pad.set_current_touch_pos(position);
        let offset = self.raw_offset();
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.start(offset);
        }
    }

    fn release(&mut self, deferred: bool) {
        let angle = self.angle();
        let Some(monitor) = self.monitor.as_mut() else {
            self.pad.release(deferred);
            return;
        };
        let speed = monitor.drag_speed();
        let rotation_speed = monitor.rotation_speed();
        monitor.reset();

        if self.pad.release(deferred).is_some() && !deferred {
            self.pad.push_event(PadEvent::DirectionChangedWithSpeed {
                pointer: None,
                direction: Direction::NEUTRAL,
                speed,
                angle,
            });
            self.pad.push_event(PadEvent::AngleChangedWithRotationSpeed {
                pointer: None,
                angle,
                rotation_speed,
            });
        }
    }

    /// Once per fixed tick: update the speed estimate and report it
    pub fn physics_process(&mut self, dt: f32) {
        if !self.pad.accepts_input() || !self.pad.is_pressed() || dt <= 0.0 {
            return;
        }
        let offset = self.raw_offset();
        let Some(monitor) = self.monitor.as_mut() else {
            return;
        };
        monitor.update(offset, dt);
        let speed = monitor.drag_speed();
        let rotation_speed = monitor.rotation_speed();

        let pointer = self.pad.owner();
        let angle = self.angle();
        self.pad.push_event(PadEvent::DirectionChangedWithSpeed {
            pointer,
            direction: self.pad.direction(),
            speed,
            angle,
        });
        self.pad.push_event(PadEvent::AngleChangedWithRotationSpeed {
            pointer,
            angle,
            rotation_speed,
        });
    }
}

impl TouchControl for Joystick {
    type Event = PadEvent;

    fn on_pointer_down(&mut self, id: PointerId, position: Vec2) {
        if !self.pad.accepts_input() || self.pad.is_pressed() || !self.is_inside(position) {
            return;
        }
        let initial_press = if self.normal_moved_to_touch_pos {
            position
        } else {
            self.pad.reference_center()
        };
        self.claim(id, initial_press, position);
        self.classify(position);
        if self.pad.direction().is_neutral() {
            self.pad.notify_direction();
        }
    }

    fn on_pointer_move(&mut self, id: PointerId, position: Vec2) {
        if !self.pad.accepts_input() {
            return;
        }
        if self.pad.is_owned_by(id) {
            if self.classify(position) {
                self.pad.push_event(PadEvent::DirectionChangedWithSpeed {
                    pointer: Some(id),
                    direction: self.pad.direction(),
                    speed: self.drag_speed(),
                    angle: self.angle(),
                });
            }
            self.pad.push_event(PadEvent::AngleChanged {
                angle: self.angle(),
                speed: self.drag_speed(),
            });
        } else if self.pad.is_pass_by_press() && !self.pad.is_pressed() && self.is_inside(position)
        {
            let center = self.pad.reference_center();
            self.claim(id, center, position);
            self.classify(position);
        }
    }

    fn on_pointer_up(&mut self, id: PointerId, _position: Vec2) {
        if self.pad.is_owned_by(id) {
            self.release(false);
        }
    }

    fn lifecycle(&mut self, event: Lifecycle) {
        match event {
            Lifecycle::ExitTree | Lifecycle::Paused => self.release(true),
            Lifecycle::VisibilityChanged(false) => self.release(false),
            _ => {}
        }
        if let Some(size) = self.pad.handle_lifecycle(event) {
            self.set_size(size);
        }
    }

    fn owner(&self) -> Option<PointerId> {
        self.pad.owner()
    }

    fn drain_events(&mut self) -> Vec<PadEvent> {
        self.pad.drain_events()
    }
}
