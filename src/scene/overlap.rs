//! Overlap lens between the two discs
//!
//! The lens is approximated by a third circle centered at the midpoint of
//! the two disc centers. That is only exact because both discs share one
//! radius and one x-coordinate here; it is not a general two-circle
//! intersection.

use glam::Vec2;

use super::layout::Disc;
use crate::color::Rgb;

/// The blended overlap region, when it exists
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapLens {
    pub center: Vec2,
    pub radius: f32,
    /// Additive blend of the two disc colors
    pub color: Rgb,
}

/// Compute the lens between two same-radius discs.
///
/// Returns None when the centers are 2r or more apart; tangency counts as
/// no overlap.
pub fn overlap_lens(
    top: &Disc,
    bottom: &Disc,
    top_color: Rgb,
    bottom_color: Rgb,
) -> Option<OverlapLens> {
    let radius = top.radius;
    let distance = top.center.distance(bottom.center);
    if distance >= 2.0 * radius {
        return None;
    }

    Some(OverlapLens {
        center: (top.center + bottom.center) / 2.0,
        radius: (2.0 * radius - distance) / 2.0,
        color: top_color.add_clamped(bottom_color),
    })
}
