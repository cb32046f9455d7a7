//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in viewport pixels.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Segments used for ball-sized circles
pub const CIRCLE_SEGMENTS: u32 = 32;

#[inline]
fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + Vec2::new(theta.cos(), theta.sin()) * radius
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let p1 = on_circle(center, radius, i as f32 / segments as f32 * TAU);
        let p2 = on_circle(center, radius, (i + 1) as f32 / segments as f32 * TAU);

        // Fan from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a ring whose outer edge sits at `outer_radius`
pub fn ring(
    center: Vec2,
    outer_radius: f32,
    width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let inner_radius = (outer_radius - width).max(0.0);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = i as f32 / segments as f32 * TAU;
        let theta2 = (i + 1) as f32 / segments as f32 * TAU;

        let inner1 = on_circle(center, inner_radius, theta1);
        let outer1 = on_circle(center, outer_radius, theta1);
        let inner2 = on_circle(center, inner_radius, theta2);
        let outer2 = on_circle(center, outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (r.min(), r.max());
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_circle_vertices_on_radius() {
        let center = Vec2::new(100.0, 50.0);
        let verts = circle(center, 15.0, RED, 16);
        assert_eq!(verts.len(), 48);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [100.0, 50.0]);
            for v in &tri[1..] {
                let d = Vec2::from(v.position).distance(center);
                assert!((d - 15.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_ring_band() {
        let center = Vec2::new(0.0, 0.0);
        let verts = ring(center, 17.0, 2.0, RED, 8);
        assert_eq!(verts.len(), 48);
        for v in &verts {
            let d = Vec2::from(v.position).length();
            assert!((d - 15.0).abs() < 1e-3 || (d - 17.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rect_covers_corners() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let verts = rect(&r, RED);
        assert_eq!(verts.len(), 6);
        for corner in [[10.0, 20.0], [40.0, 20.0], [10.0, 60.0], [40.0, 60.0]] {
            assert!(verts.iter().any(|v| v.position == corner));
        }
    }
}
