//! Eight-way directional pad
//!
//! The D-pad lays itself out as a square inside its control rectangle and
//! classifies the owning pointer with [`classify_rect`]. Deadzone and span
//! are fractions of half the square's side.

use glam::Vec2;
use tactile_shared::{Direction, Lifecycle, PointerId, Rect};

use crate::classify::classify_rect;
use crate::control::TouchControl;
use crate::event::PadEvent;
use crate::pad::{DirectionActions, TouchPad};

pub const DEFAULT_DEADZONE_EXTENT: f32 = 0.65;
pub const DEFAULT_CARDINAL_SPAN: f32 = 0.35;

const MIN_CARDINAL_SPAN: f32 = 0.1;
const MAX_EXTENT: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct DPad {
    pad: TouchPad,
    size: Vec2,
    /// Native size of the pad artwork, if any
    texture_size: Option<Vec2>,
    /// Fraction of the control size the square fills; 0 uses `texture_size`
    scale_to_rect: f32,
    position_rect: Rect,
}

impl DPad {
    pub fn new(size: Vec2) -> Self {
        let mut dpad = Self {
            pad: TouchPad::new(DEFAULT_DEADZONE_EXTENT, DEFAULT_CARDINAL_SPAN),
            size,
            texture_size: None,
            scale_to_rect: 1.0,
            position_rect: Rect::default(),
        };
        dpad.update_layout();
        dpad
    }

    pub fn pad(&self) -> &TouchPad {
        &self.pad
    }

    pub fn direction(&self) -> Direction {
        self.pad.direction()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.update_layout();
    }

    pub fn texture_size(&self) -> Option<Vec2> {
        self.texture_size
    }

    pub fn set_texture_size(&mut self, texture_size: Option<Vec2>) {
        self.texture_size = texture_size;
        self.update_layout();
    }

    pub fn scale_to_rect(&self) -> f32 {
        self.scale_to_rect
    }

    pub fn set_scale_to_rect(&mut self, scale: f32) {
        self.scale_to_rect = scale.max(0.0);
        self.update_layout();
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

    pub fn deadzone_extent(&self) -> f32 {
        self.pad.deadzone_extent()
    }

    pub fn cardinal_span(&self) -> f32 {
        self.pad.cardinal_span()
    }

    /// Clamped to `[cardinal_span, 0.9]`
    pub fn set_deadzone_extent(&mut self, extent: f32) {
        let extent = extent.max(self.pad.cardinal_span()).min(MAX_EXTENT);
        self.pad.store_deadzone_extent(extent);
    }

    /// Clamped to `[0.1, 0.9]`; a span wider than the deadzone drags the
    /// deadzone up with it.
    pub fn set_cardinal_span(&mut self, span: f32) {
        let span = span.max(MIN_CARDINAL_SPAN).min(MAX_EXTENT);
        if span == self.pad.cardinal_span() {
            return;
        }
        if span > self.pad.deadzone_extent() {
            self.set_deadzone_extent(span);
        }
        self.pad.store_cardinal_span(span);
    }

    /// Square the pad occupies inside the control
    pub fn position_rect(&self) -> Rect {
        self.position_rect
    }

    /// Smallest size the host should give the control
    pub fn minimum_size(&self) -> Vec2 {
        match self.texture_size {
            Some(texture) if self.scale_to_rect <= 0.0 => texture,
            _ => Vec2::ZERO,
        }
    }

    fn update_layout(&mut self) {
        let base = match self.texture_size {
            Some(texture) if self.scale_to_rect <= 0.0 => texture,
            _ => self.size * self.scale_to_rect,
        };
        let side = base.x.min(base.y);
        let square = Vec2::splat(side);
        let offset = if self.pad.is_centered() {
            (self.size - square) * 0.5
        } else {
            Vec2::ZERO
        };
        self.position_rect = Rect::new(offset, square);
        self.pad.set_center_point(offset + square * 0.5);
    }

    fn half_extent(&self) -> f32 {
        self.position_rect.min_side() * 0.5
    }

    fn classify(&mut self, position: Vec2) -> bool {
        self.pad.set_current_touch_pos(position);
        let offset = position - self.pad.reference_center();
        let direction = classify_rect(
            offset,
            self.half_extent(),
            self.pad.deadzone_extent(),
            self.pad.cardinal_span(),
        );
        self.pad.update_direction(direction)
    }

    /// Outline of the neutral region for debug drawing.
    ///
    /// An octagon while the span is narrower than the deadzone, otherwise
    /// the four corners of a square.
    pub fn deadzone_outline(&self) -> Vec<Vec2> {
        let s = self.half_extent();
        let w = self.pad.cardinal_span() * s;
        let l = self.pad.deadzone_extent() * s;
        let c = self.pad.reference_center();

        if self.pad.cardinal_span() != self.pad.deadzone_extent() {
            vec![
                c + Vec2::new(-w, l),
                c + Vec2::new(w, l),
                c + Vec2::new(l, w),
                c + Vec2::new(l, -w),
                c + Vec2::new(w, -l),
                c + Vec2::new(-w, -l),
                c + Vec2::new(-l, -w),
                c + Vec2::new(-l, w),
            ]
        } else {
            vec![
                c + Vec2::new(-w, l),
                c + Vec2::new(w, l),
                c + Vec2::new(w, -l),
                c + Vec2::new(-w, -l),
            ]
        }
    }
}

impl TouchControl for DPad {
    type Event = PadEvent;

    fn on_pointer_down(&mut self, id: PointerId, position: Vec2) {
        if !self.pad.accepts_input() || self.pad.is_pressed() {
            return;
        }
        if !Rect::from_size(self.size).has_point(position) {
            return;
        }
        self.pad.claim(id, position);
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
            self.classify(position);
        } else if self.pad.is_pass_by_press()
            && !self.pad.is_pressed()
            && Rect::from_size(self.size).has_point(position)
        {
            let center = self.pad.reference_center();
            self.pad.claim(id, center);
            self.classify(position);
        }
    }

    fn on_pointer_up(&mut self, id: PointerId, _position: Vec2) {
        if self.pad.is_owned_by(id) {
            self.pad.release(false);
        }
    }

    fn lifecycle(&mut self, event: Lifecycle) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use tactile_shared::PointerEvent;

    fn dpad() -> DPad {
        // 100x100 control, square fills it, center (50, 50), half extent 50
        DPad::new(Vec2::splat(100.0))
    }

    fn directions(events: &[PadEvent]) -> Vec<Direction> {
        events
            .iter()
            .filter_map(|e| match e {
                PadEvent::DirectionChanged { direction, .. } => Some(*direction),
                _ => None,
            })
            .collect()
    }

    // =============================================================
    // Bounds
    // =============================================================

    #[test]
    fn test_defaults() {
        let d = dpad();
        assert_eq!(d.deadzone_extent(), DEFAULT_DEADZONE_EXTENT);
        assert_eq!(d.cardinal_span(), DEFAULT_CARDINAL_SPAN);
        assert_eq!(d.pad().center_point(), Vec2::splat(50.0));
    }

    #[test]
    fn test_deadzone_clamped_up_to_span() {
        let mut d = dpad();
        d.set_deadzone_extent(0.2);
        assert_eq!(d.deadzone_extent(), DEFAULT_CARDINAL_SPAN);
        d.set_deadzone_extent(5.0);
        assert_eq!(d.deadzone_extent(), 0.9);
    }

    #[test]
    fn test_span_raises_deadzone() {
        let mut d = dpad();
        d.set_cardinal_span(0.8);
        assert_eq!(d.cardinal_span(), 0.8);
        assert_eq!(d.deadzone_extent(), 0.8);

        d.set_cardinal_span(0.0);
        assert_eq!(d.cardinal_span(), 0.1);
        assert_eq!(d.deadzone_extent(), 0.8);
    }

    #[test]
    fn test_span_never_exceeds_deadzone() {
        let mut d = dpad();
        for (span, dz) in [(0.5, 0.1), (0.95, 0.3), (0.2, 0.7), (0.05, 0.05)] {
            d.set_cardinal_span(span);
            d.set_deadzone_extent(dz);
            assert!(d.deadzone_extent() >= d.cardinal_span());
        }
    }

    // =============================================================
    // Layout
    // =============================================================

    #[test]
    fn test_layout_square_centered() {
        let d = DPad::new(Vec2::new(200.0, 100.0));
        assert_eq!(d.position_rect(), Rect::new(Vec2::new(50.0, 0.0), Vec2::splat(100.0)));
        assert_eq!(d.pad().center_point(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_layout_native_texture() {
        let mut d = DPad::new(Vec2::new(200.0, 100.0));
        d.set_centered(false);
        d.set_texture_size(Some(Vec2::new(64.0, 80.0)));
        d.set_scale_to_rect(0.0);
        assert_eq!(d.position_rect(), Rect::new(Vec2::ZERO, Vec2::splat(64.0)));
        assert_eq!(d.minimum_size(), Vec2::new(64.0, 80.0));
    }

    #[test]
    fn test_outline_shapes() {
        let mut d = dpad();
        assert_eq!(d.deadzone_outline().len(), 8);
        d.set_cardinal_span(0.9);
        assert_eq!(d.deadzone_outline().len(), 4);
    }

    // =============================================================
    // Input
    // =============================================================

    #[test]
    fn test_press_claims_and_classifies() {
        let mut d = dpad();
        d.on_pointer_down(PointerId(1), Vec2::new(95.0, 50.0));
        assert_eq!(d.owner(), Some(PointerId(1)));
        assert_eq!(d.direction(), Direction::RIGHT);
        assert_eq!(
            d.drain_events(),
            vec![PadEvent::DirectionChanged { pointer: Some(PointerId(1)), direction: Direction::RIGHT }]
        );
    }

    #[test]
    fn test_neutral_press_still_notifies() {
        let mut d = dpad();
        d.on_pointer_down(PointerId(0), Vec2::splat(50.0));
        assert_eq!(
            d.drain_events(),
            vec![PadEvent::DirectionChanged { pointer: Some(PointerId(0)), direction: Direction::NEUTRAL }]
        );
    }

    #[test]
    fn test_press_outside_ignored() {
        let mut d = dpad();
        d.on_pointer_down(PointerId(0), Vec2::new(150.0, 50.0));
        assert_eq!(d.owner(), None);
        assert!(d.drain_events().is_empty());
    }

    #[test]
    fn test_exclusive_ownership() {
        let mut d = dpad();
        d.on_pointer_down(PointerId(1), Vec2::new(95.0, 50.0));
        d.on_pointer_down(PointerId(2), Vec2::new(5.0, 50.0));
        d.on_pointer_move(PointerId(2), Vec2::new(50.0, 5.0));
        d.on_pointer_up(PointerId(2), Vec2::new(50.0, 5.0));
        assert_eq!(d.owner(), Some(PointerId(1)));
        assert_eq!(d.direction(), Direction::RIGHT);
    }

    #[test]
    fn test_drag_emits_only_on_change() {
        let mut d = dpad();
        d.on_pointer_down(PointerId(1), Vec2::new(95.0, 50.0));
        d.on_pointer_move(PointerId(1), Vec2::new(96.0, 51.0));
        d.on_pointer_move(PointerId(1), Vec2::new(90.0, 90.0));
        d.on_pointer_move(PointerId(1), Vec2::new(92.0, 92.0));
        assert_eq!(
            directions(&d.drain_events()),
            vec![Direction::RIGHT, Direction::DOWN_RIGHT]
        );
    }

    #[test]
    fn test_release_emits_neutral() {
        let mut d = dpad();
        d.on_pointer_down(PointerId(1), Vec2::new(50.0, 5.0));
        d.drain_events();
        d.on_pointer_up(PointerId(1), Vec2::new(50.0, 5.0));
        assert_eq!(d.owner(), None);
        assert_eq!(
            d.drain_events(),
            vec![PadEvent::DirectionChanged { pointer: None, direction: Direction::NEUTRAL }]
        );
    }

    #[test]
    fn test_pass_by_press() {
        let mut d = dpad();
        d.on_pointer_move(PointerId(3), Vec2::new(95.0, 50.0));
        assert_eq!(d.owner(), None);

        d.set_pass_by_press(true);
        d.on_pointer_move(PointerId(3), Vec2::new(95.0, 50.0));
        assert_eq!(d.owner(), Some(PointerId(3)));
        assert_eq!(d.pad().touch_pos_on_initial_press(), Vec2::splat(50.0));
        assert_eq!(directions(&d.drain_events()), vec![Direction::RIGHT]);
    }

    #[test]
    fn test_pass_by_into_deadzone_is_silent() {
        let mut d = dpad();
        d.set_pass_by_press(true);
        d.on_pointer_move(PointerId(3), Vec2::splat(50.0));
        assert_eq!(d.owner(), Some(PointerId(3)));
        assert!(d.drain_events().is_empty());
    }

    #[test]
    fn test_malformed_event_ignored() {
        let mut d = dpad();
        d.pointer_event(&PointerEvent::Down {
            id: PointerId(0),
            position: Vec2::new(f32::NAN, 50.0),
        });
        assert_eq!(d.owner(), None);
        assert!(d.drain_events().is_empty());
    }

    #[test]
    fn test_paused_ignores_input() {
        let mut d = dpad();
        d.on_deactivate();
        d.on_pointer_down(PointerId(0), Vec2::new(95.0, 50.0));
        assert_eq!(d.owner(), None);
        d.on_activate();
        d.on_pointer_down(PointerId(0), Vec2::new(95.0, 50.0));
        assert_eq!(d.owner(), Some(PointerId(0)));
    }

    #[test]
    fn test_resize_relayouts() {
        let mut d = dpad();
        d.lifecycle(Lifecycle::Resized(Vec2::new(300.0, 200.0)));
        assert_eq!(d.pad().center_point(), Vec2::new(150.0, 100.0));
    }
}
