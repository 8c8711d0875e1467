//! Joystick layer placement
//!
//! A joystick is drawn from up to three layers: the base (`normal`), the
//! base while touched (`pressed`) and the `stick` that follows the finger.
//! Only sizes and rectangles live here; the host owns the artwork.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tactile_shared::Rect;

pub const DEFAULT_NORMAL_SCALE: f32 = 1.0;
pub const DEFAULT_PRESSED_SCALE: f32 = 1.4;
pub const DEFAULT_STICK_SCALE: f32 = 0.3;

/// One drawable layer: native artwork size plus a scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureLayer {
    /// Native artwork size; `None` when the layer has no artwork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_size: Option<Vec2>,
    #[serde(default = "default_scale")]
    pub scale: Vec2,
    #[serde(skip)]
    rect: Rect,
}

fn default_scale() -> Vec2 {
    Vec2::ONE
}

impl TextureLayer {
    pub fn new(scale: f32) -> Self {
        Self {
            texture_size: None,
            scale: Vec2::splat(scale),
            rect: Rect::default(),
        }
    }

    pub fn with_texture(mut self, texture_size: Vec2) -> Self {
        self.texture_size = Some(texture_size);
        self
    }

    /// Drawn size, or `None` without artwork. A zero scale draws at native size.
    pub fn scaled_size(&self) -> Option<Vec2> {
        let scale = if self.scale.length() == 0.0 {
            Vec2::ONE
        } else {
            self.scale
        };
        self.texture_size.map(|size| size * scale)
    }

    /// Rest placement computed by the last layout
    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, control_size: Vec2, centered: bool) {
        let Some(size) = self.scaled_size() else {
            self.rect = Rect::default();
            return;
        };
        self.rect = if centered {
            Rect::centered_in(size, control_size)
        } else {
            Rect::new(Vec2::ZERO, size)
        };
    }
}

/// The three joystick layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickLayers {
    pub normal: TextureLayer,
    pub pressed: TextureLayer,
    pub stick: TextureLayer,
}

impl Default for JoystickLayers {
    fn default() -> Self {
        Self {
            normal: TextureLayer::new(DEFAULT_NORMAL_SCALE),
            pressed: TextureLayer::new(DEFAULT_PRESSED_SCALE),
            stick: TextureLayer::new(DEFAULT_STICK_SCALE),
        }
    }
}

impl JoystickLayers {
    pub(crate) fn update(&mut self, control_size: Vec2, centered: bool) {
        for layer in [&mut self.normal, &mut self.pressed, &mut self.stick] {
            layer.update(control_size, centered);
        }
    }

    /// Component-wise maximum of every drawn layer, `None` without artwork
    pub fn minimum_size(&self) -> Option<Vec2> {
        let size = [self.normal, self.pressed, self.stick]
            .iter()
            .filter_map(TextureLayer::scaled_size)
            .fold(Vec2::ZERO, Vec2::max);
        (size.length() != 0.0).then_some(size)
    }
}

/// Where each layer should be drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerRects {
    pub normal: Option<Rect>,
    pub pressed: Option<Rect>,
    pub stick: Option<Rect>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scales() {
        let layers = JoystickLayers::default();
        assert_eq!(layers.normal.scale, Vec2::splat(1.0));
        assert_eq!(layers.pressed.scale, Vec2::splat(1.4));
        assert_eq!(layers.stick.scale, Vec2::splat(0.3));
        assert_eq!(layers.minimum_size(), None);
    }

    #[test]
    fn test_layer_without_scale_loads_unscaled() {
        let layers: JoystickLayers = toml::from_str("[stick]\ntexture_size = [64.0, 64.0]\n").unwrap();
        assert_eq!(layers.stick.scale, Vec2::ONE);
        assert_eq!(layers.stick.scaled_size(), Some(Vec2::splat(64.0)));
        assert_eq!(layers.pressed.scale, Vec2::splat(DEFAULT_PRESSED_SCALE));
    }

    #[test]
    fn test_zero_scale_uses_native_size() {
        let mut layer = TextureLayer::new(0.0).with_texture(Vec2::new(32.0, 16.0));
        assert_eq!(layer.scaled_size(), Some(Vec2::new(32.0, 16.0)));
        layer.scale = Vec2::splat(2.0);
        assert_eq!(layer.scaled_size(), Some(Vec2::new(64.0, 32.0)));
    }

    #[test]
    fn test_minimum_size_is_componentwise_max() {
        let mut layers = JoystickLayers::default();
        layers.normal = layers.normal.with_texture(Vec2::new(100.0, 50.0));
        layers.stick = layers.stick.with_texture(Vec2::new(100.0, 400.0));
        assert_eq!(layers.minimum_size(), Some(Vec2::new(100.0, 120.0)));
    }

    #[test]
    fn test_layout_centered() {
        let mut layers = JoystickLayers::default();
        layers.normal = layers.normal.with_texture(Vec2::splat(100.0));
        layers.update(Vec2::splat(200.0), true);
        assert_eq!(layers.normal.rect(), Rect::new(Vec2::splat(50.0), Vec2::splat(100.0)));
        layers.update(Vec2::splat(200.0), false);
        assert_eq!(layers.normal.rect().position, Vec2::ZERO);
        // No artwork, no placement
        assert_eq!(layers.stick.rect(), Rect::default());
    }
}
