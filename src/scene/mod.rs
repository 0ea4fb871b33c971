//! Disc scene: layout state plus per-frame geometry
//!
//! Scene space is y-up pixels with the origin at the bottom-left corner,
//! matching the renderer's NDC orientation. The platform layer flips
//! browser coordinates before they get here.

pub mod layout;
pub mod overlap;

pub use layout::{Disc, DiscPair, Viewport, clamp_offset, disc_pair, resolve_offset};
pub use overlap::{OverlapLens, overlap_lens};

use crate::color::Rgb;

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub discs: DiscPair,
    /// Present only while the discs geometrically overlap (and the scene
    /// blends at all)
    pub lens: Option<OverlapLens>,
    pub top_color: Rgb,
    pub bottom_color: Rgb,
}

/// Owns the offset state and recomputes disc geometry from it
#[derive(Debug, Clone)]
pub struct Scene {
    viewport: Viewport,
    /// None until first initialized; defaults to H/4 on the next layout
    offset: f32,
    offset_set: bool,
    radius_ratio: f32,
    blend_lens: bool,
}

impl Scene {
    pub fn new(radius_ratio: f32, blend_lens: bool) -> Self {
        Self {
            viewport: Viewport::new(0.0, 0.0),
            offset: 0.0,
            offset_set: false,
            radius_ratio,
            blend_lens,
        }
    }

    /// Seed the offset from the settings store (None keeps it unset)
    pub fn with_offset(mut self, offset: Option<f32>) -> Self {
        if let Some(offset) = offset {
            self.offset = offset;
            self.offset_set = true;
        }
        self
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn radius_ratio(&self) -> f32 {
        self.radius_ratio
    }

    /// Offset as last stored; None while still uninitialized
    pub fn offset(&self) -> Option<f32> {
        self.offset_set.then_some(self.offset)
    }

    /// The offset a layout pass would use right now (defaulted + clamped)
    pub fn resolved_offset(&self) -> f32 {
        resolve_offset(self.offset(), &self.viewport)
    }

    /// Propose a new offset (from a gesture); clamped on the next layout
    pub fn propose_offset(&mut self, offset: f32) {
        self.offset = offset;
        self.offset_set = true;
    }

    /// Recompute the frame geometry.
    ///
    /// This is the single invariant-enforcement point: the offset is
    /// defaulted (H/4) if never set and unconditionally clamped to
    /// [0, H/2], and the clamped value is stored back.
    pub fn layout(&mut self, top_color: Rgb, bottom_color: Rgb) -> Frame {
        let offset = self.resolved_offset();
        self.offset = offset;
        self.offset_set = true;

        let discs = disc_pair(&self.viewport, offset, self.radius_ratio);
        let lens = if self.blend_lens {
            overlap_lens(&discs.top, &discs.bottom, top_color, bottom_color)
        } else {
            None
        };

        Frame {
            discs,
            lens,
            top_color,
            bottom_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);

    #[test]
    fn test_layout_defaults_offset_to_quarter_height() {
        let mut scene = Scene::new(0.25, false);
        scene.resize(800.0, 600.0);
        scene.layout(RED, BLUE);
        assert_eq!(scene.offset(), Some(150.0));
    }

    #[test]
    fn test_layout_clamps_stored_offset() {
        let mut scene = Scene::new(0.25, false).with_offset(Some(10_000.0));
        scene.resize(800.0, 600.0);
        let frame = scene.layout(RED, BLUE);
        assert_eq!(scene.offset(), Some(300.0));
        assert_eq!(frame.discs.top.center.y, 600.0);
    }

    #[test]
    fn test_persisted_offset_survives_layout() {
        let mut scene = Scene::new(0.25, false).with_offset(Some(42.0));
        scene.resize(800.0, 600.0);
        scene.layout(RED, BLUE);
        assert_eq!(scene.offset(), Some(42.0));
    }

    #[test]
    fn test_lens_only_when_blending() {
        // Offset 0 fully overlaps the discs, so a blending scene must
        // produce a lens and a non-blending one must not.
        let mut blending = Scene::new(0.25, true).with_offset(Some(0.0));
        blending.resize(800.0, 600.0);
        assert!(blending.layout(RED, BLUE).lens.is_some());

        let mut plain = Scene::new(0.25, false).with_offset(Some(0.0));
        plain.resize(800.0, 600.0);
        assert!(plain.layout(RED, BLUE).lens.is_none());
    }

    #[test]
    fn test_degenerate_viewport_is_not_an_error() {
        let mut scene = Scene::new(0.25, true);
        let frame = scene.layout(RED, BLUE);
        assert_eq!(frame.discs.top.radius, 0.0);
        assert_eq!(frame.discs.top.center, glam::Vec2::ZERO);
    }
}
