//! Disc placement from viewport size and vertical offset
//!
//! The two discs sit on the vertical centerline, displaced symmetrically
//! from the midpoint by the offset. Radius is a fixed fraction of the
//! viewport width, recomputed every pass and never persisted.

use glam::Vec2;

/// Current drawing surface dimensions, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical midpoint the disc pair is symmetric about
    pub fn mid_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// A disc described by its center; the renderer's corner-based
/// convention is available through [`Disc::corner`] and [`Disc::size`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
}

impl Disc {
    /// Corner position (center minus radius on both axes)
    pub fn corner(&self) -> Vec2 {
        self.center - Vec2::splat(self.radius)
    }

    /// Bounding-square extent (2r x 2r)
    pub fn size(&self) -> Vec2 {
        Vec2::splat(self.radius * 2.0)
    }
}

/// The two same-radius discs of the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscPair {
    pub top: Disc,
    pub bottom: Disc,
}

/// Clamp an offset to its legal range [0, H/2]
pub fn clamp_offset(offset: f32, viewport: &Viewport) -> f32 {
    offset.clamp(0.0, viewport.height / 2.0)
}

/// Resolve an offset that may never have been set: default to H/4, then
/// clamp. Every layout pass funnels through this.
pub fn resolve_offset(offset: Option<f32>, viewport: &Viewport) -> f32 {
    clamp_offset(offset.unwrap_or(viewport.height / 4.0), viewport)
}

/// Place both discs for the given (already clamped) offset
pub fn disc_pair(viewport: &Viewport, offset: f32, radius_ratio: f32) -> DiscPair {
    let radius = radius_ratio * viewport.width;
    let cx = viewport.width / 2.0;
    let cy = viewport.mid_y();

    DiscPair {
        top: Disc {
            center: Vec2::new(cx, cy + offset),
            radius,
        },
        bottom: Disc {
            center: Vec2::new(cx, cy - offset),
            radius,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unset_offset_defaults_to_quarter_height() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(resolve_offset(None, &viewport), 150.0);
    }

    #[test]
    fn test_offset_clamped_to_half_height() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(resolve_offset(Some(10_000.0), &viewport), 300.0);
        assert_eq!(resolve_offset(Some(-5.0), &viewport), 0.0);
        assert_eq!(resolve_offset(Some(123.0), &viewport), 123.0);
    }

    #[test]
    fn test_disc_placement() {
        let viewport = Viewport::new(800.0, 600.0);
        let discs = disc_pair(&viewport, 100.0, 0.25);

        assert_eq!(discs.top.radius, 200.0);
        assert_eq!(discs.bottom.radius, 200.0);
        assert_eq!(discs.top.center, Vec2::new(400.0, 400.0));
        assert_eq!(discs.bottom.center, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn test_corner_convention() {
        let viewport = Viewport::new(800.0, 600.0);
        let discs = disc_pair(&viewport, 100.0, 0.25);

        // Renderer receives corner + size, derived from center - radius
        assert_eq!(discs.top.corner(), Vec2::new(200.0, 200.0));
        assert_eq!(discs.top.size(), Vec2::new(400.0, 400.0));
    }

    #[test]
    fn test_degenerate_viewport_yields_zero_discs() {
        let viewport = Viewport::new(0.0, 0.0);
        let offset = resolve_offset(None, &viewport);
        let discs = disc_pair(&viewport, offset, 0.25);

        assert_eq!(discs.top.radius, 0.0);
        assert_eq!(discs.top.center, Vec2::ZERO);
        assert_eq!(discs.bottom.center, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_resolved_offset_in_range(
            w in 1.0f32..5000.0,
            h in 1.0f32..5000.0,
            offset in -20_000.0f32..20_000.0,
        ) {
            let viewport = Viewport::new(w, h);
            let resolved = resolve_offset(Some(offset), &viewport);
            prop_assert!(resolved >= 0.0);
            prop_assert!(resolved <= h / 2.0);
        }

        #[test]
        fn prop_centers_symmetric_about_midline(
            w in 1.0f32..5000.0,
            h in 1.0f32..5000.0,
            offset in -20_000.0f32..20_000.0,
        ) {
            let viewport = Viewport::new(w, h);
            let resolved = resolve_offset(Some(offset), &viewport);
            let discs = disc_pair(&viewport, resolved, 0.25);

            let mid = viewport.mid_y();
            let above = discs.top.center.y - mid;
            let below = mid - discs.bottom.center.y;
            prop_assert!((above - below).abs() <= 1e-3);
        }
    }
}
