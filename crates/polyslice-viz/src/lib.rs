//! Shared rendering utilities for the slicing demo.

use std::hash::{Hash, Hasher};

use macroquad::models::{Mesh, Vertex, draw_mesh};
use macroquad::prelude::*;
use polyslice::{Boundary, Marker, Point, Segment, SliceSink, Stroke};
use tracing::warn;

pub mod game;
pub use game::{FADE_FRAMES, FadingCut, Game};

/// Fill color of the polygon being sliced.
pub const SHAPE_FILL: Color = Color::new(1.0, 0.42, 0.42, 1.0);
/// Background color of the play field.
pub const BACKGROUND: Color = Color::new(0.10, 0.10, 0.18, 1.0);

#[inline]
pub fn to_vec2(p: Point) -> Vec2 {
    vec2(p.x, p.y)
}

#[inline]
pub fn to_point(v: Vec2) -> Point {
    Point::new(v.x, v.y)
}

/// Multiplies a color's alpha by `alpha`.
pub fn faded(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, color.a * alpha)
}

/// Generates a deterministic color from a boundary's vertices using hashing,
/// so a split piece keeps its color for as long as it is shown.
pub fn piece_color(boundary: &Boundary) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for v in boundary.vertices() {
        v.x.to_bits().hash(&mut hasher);
        v.y.to_bits().hash(&mut hasher);
    }
    let hash = hasher.finish();

    let r = (((hash >> 16) & 0xFF) as u8).max(60);
    let g = (((hash >> 8) & 0xFF) as u8).max(60);
    let b = ((hash & 0xFF) as u8).max(60);

    Color::from_rgba(r, g, b, 255)
}

/// Triangulates a boundary into mesh indices.
///
/// Falls back to a fan from vertex 0 when ear clipping fails, which is only
/// correct for convex outlines.
pub fn triangulate(boundary: &Boundary) -> Vec<u16> {
    let coords: Vec<f64> = boundary
        .vertices()
        .iter()
        .flat_map(|p| [p.x as f64, p.y as f64])
        .collect();

    match earcutr::earcut(&coords, &[], 2) {
        Ok(indices) if !indices.is_empty() => indices.into_iter().map(|i| i as u16).collect(),
        _ => {
            warn!(vertices = boundary.len(), "ear clipping failed, using a fan");
            fan_indices(boundary.len())
        }
    }
}

/// Fan triangulation: vertex 0 connects to all edges.
fn fan_indices(n: usize) -> Vec<u16> {
    let mut indices = Vec::with_capacity(n.saturating_sub(2) * 3);
    for i in 1..n.saturating_sub(1) {
        indices.push(0);
        indices.push(i as u16);
        indices.push((i + 1) as u16);
    }
    indices
}

/// Draws a filled boundary with an outline.
pub fn draw_boundary(boundary: &Boundary, fill: Color, outline: Color) {
    let vertices: Vec<Vertex> = boundary
        .vertices()
        .iter()
        .map(|p| Vertex::new2(vec3(p.x, p.y, 0.0), vec2(0.0, 0.0), fill))
        .collect();

    let mesh = Mesh {
        vertices,
        indices: triangulate(boundary),
        texture: None,
    };
    draw_mesh(&mesh);

    for edge in boundary.edges() {
        let (a, b) = (edge.start(), edge.end());
        draw_line(a.x, a.y, b.x, b.y, 2.0, outline);
    }
}

/// Sink that draws cut geometry with macroquad.
#[derive(Debug, Clone, Copy)]
pub struct MacroquadSink {
    /// Opacity applied to everything drawn.
    pub alpha: f32,
    pub line_width: f32,
    pub marker_radius: f32,
}

impl Default for MacroquadSink {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            line_width: 12.0,
            marker_radius: 15.0,
        }
    }
}

impl MacroquadSink {
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

impl SliceSink for MacroquadSink {
    fn draw_segment(&mut self, segment: &Segment, stroke: Stroke) {
        let (color, width) = match stroke {
            Stroke::InProgress => (YELLOW, self.line_width),
            Stroke::Finalized => (WHITE, self.line_width * 0.5),
        };
        let (a, b) = (segment.start(), segment.end());
        draw_line(a.x, a.y, b.x, b.y, width, faded(color, self.alpha));
        // Round joints between consecutive segments
        draw_circle(b.x, b.y, width * 0.5, faded(color, self.alpha));
    }

    fn draw_marker(&mut self, point: Point, marker: Marker) {
        let color = match marker {
            Marker::Entry => BLUE,
            Marker::Exit => SKYBLUE,
        };
        draw_circle(point.x, point.y, self.marker_radius, faded(color, self.alpha));
        draw_circle_lines(
            point.x,
            point.y,
            self.marker_radius,
            2.0,
            faded(BLACK, self.alpha),
        );
    }
}
