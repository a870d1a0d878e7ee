// src/state/viewport.rs
use eframe::egui::{Pos2, Vec2};

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 4.0;
pub const ZOOM_STEP: f32 = 1.2;

/// Pan/zoom on top of the fitted map. Scaling happens about the widget
/// center, then the translation is added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f32,
    translate: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    pub fn zoom_in(&mut self, anchor: Option<Vec2>) {
        self.zoom_by(ZOOM_STEP, anchor);
    }

    pub fn zoom_out(&mut self, anchor: Option<Vec2>) {
        self.zoom_by(1.0 / ZOOM_STEP, anchor);
    }

    /// Multiplies the scale, clamped to [`MIN_SCALE`, `MAX_SCALE`].
    ///
    /// `anchor` is a point relative to the widget center that should stay
    /// under the pointer; `None` zooms about the center.
    pub fn zoom_by(&mut self, factor: f32, anchor: Option<Vec2>) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if let Some(anchor) = anchor {
            let applied = scale / self.scale;
            self.translate = anchor - (anchor - self.translate) * applied;
        }
        self.scale = scale;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn apply(&self, p: Pos2, center: Pos2) -> Pos2 {
        center + (p - center) * self.scale + self.translate
    }

    pub fn invert(&self, p: Pos2, center: Pos2) -> Pos2 {
        center + (p - center - self.translate) / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn test_five_zoom_steps() {
        let mut viewport = Viewport::default();
        for _ in 0..5 {
            viewport.zoom_in(None);
        }
        assert!((viewport.scale() - 2.48832).abs() < 1e-4);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut viewport = Viewport::default();
        for _ in 0..20 {
            viewport.zoom_in(None);
        }
        assert_eq!(viewport.scale(), MAX_SCALE);
        for _ in 0..20 {
            viewport.zoom_out(None);
        }
        assert_eq!(viewport.scale(), MIN_SCALE);
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut viewport = Viewport::default();
        viewport.zoom_in(None);
        viewport.pan_by(Vec2::new(30.0, -12.0));
        viewport.pan_by(Vec2::new(-5.0, 2.0));
        assert_eq!(viewport.translate(), Vec2::new(25.0, -10.0));

        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn test_anchored_zoom_keeps_point_fixed() {
        let center = pos2(100.0, 100.0);
        let pointer = pos2(160.0, 70.0);
        let mut viewport = Viewport::default();
        viewport.pan_by(Vec2::new(10.0, 5.0));

        let under_pointer = viewport.invert(pointer, center);
        viewport.zoom_in(Some(pointer - center));
        viewport.zoom_in(Some(pointer - center));

        assert!((viewport.apply(under_pointer, center) - pointer).length() < 1e-3);
    }

    #[test]
    fn test_anchor_ignored_at_limit() {
        let mut viewport = Viewport::default();
        for _ in 0..20 {
            viewport.zoom_in(None);
        }
        viewport.zoom_in(Some(Vec2::new(50.0, 50.0)));
        assert_eq!(viewport.translate(), Vec2::ZERO);
    }
}
