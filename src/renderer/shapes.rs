//! Shape generation for the disc scene

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::consts::CIRCLE_SEGMENTS;
use crate::scene::Frame;

/// Generate vertices for a filled circle (triangle fan around the center)
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center, color));
        vertices.push(Vertex::new(center + radius * Vec2::from_angle(theta1), color));
        vertices.push(Vertex::new(center + radius * Vec2::from_angle(theta2), color));
    }

    vertices
}

/// Build the vertex stream for one frame.
///
/// Paint order matters: bottom disc, top disc, then the lens so it covers
/// the overlap of both.
pub fn frame_vertices(frame: &Frame) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    vertices.extend(circle(
        frame.discs.bottom.center,
        frame.discs.bottom.radius,
        frame.bottom_color.to_rgba(1.0),
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(circle(
        frame.discs.top.center,
        frame.discs.top.radius,
        frame.top_color.to_rgba(1.0),
        CIRCLE_SEGMENTS,
    ));
    if let Some(lens) = &frame.lens {
        vertices.extend(circle(
            lens.center,
            lens.radius,
            lens.color.to_rgba(1.0),
            CIRCLE_SEGMENTS,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::scene::Scene;

    #[test]
    fn test_circle_vertex_count() {
        let vertices = circle(Vec2::ZERO, 10.0, [1.0; 4], 16);
        assert_eq!(vertices.len(), 16 * 3);
    }

    #[test]
    fn test_circle_edge_on_radius() {
        let vertices = circle(Vec2::new(5.0, 5.0), 10.0, [1.0; 4], 16);
        // Every non-center vertex lies on the circle
        for v in vertices.iter().filter(|v| v.position != [5.0, 5.0]) {
            let d = Vec2::from(v.position).distance(Vec2::new(5.0, 5.0));
            assert!((d - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_frame_vertices_include_lens() {
        let red = Rgb::new(1.0, 0.0, 0.0);
        let blue = Rgb::new(0.0, 0.0, 1.0);

        let mut blending = Scene::new(0.25, true).with_offset(Some(0.0));
        blending.resize(800.0, 600.0);
        let with_lens = frame_vertices(&blending.layout(red, blue));

        let mut plain = Scene::new(0.25, false).with_offset(Some(0.0));
        plain.resize(800.0, 600.0);
        let without_lens = frame_vertices(&plain.layout(red, blue));

        assert_eq!(
            with_lens.len(),
            without_lens.len() + (CIRCLE_SEGMENTS * 3) as usize
        );
    }
}
