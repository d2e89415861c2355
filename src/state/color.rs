use crate::foundation::core::Rgba;

/// Per-character color written by color modifiers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ColorState {
    /// Color contributed by this subsystem.
    pub color: Rgba,
    /// When set, the renderer replaces the glyph's RGB with `color`; otherwise it blends.
    pub override_rgb: bool,
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            color: Rgba::TRANSPARENT_WHITE,
            override_rgb: false,
        }
    }
}

impl ColorState {
    /// Restore the default: transparent white, no RGB override.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Set the RGB channels and mark them as overriding the base color.
    pub fn set_rgb(&mut self, rgb: Rgba) {
        self.color.r = rgb.r;
        self.color.g = rgb.g;
        self.color.b = rgb.b;
        self.override_rgb = true;
    }

    /// Set the alpha channel.
    pub fn set_alpha(&mut self, a: f64) {
        self.color.a = a.clamp(0.0, 1.0);
    }
}
