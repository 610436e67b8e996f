//! Random polygon generation for new rounds.

use std::f32::consts::TAU;

use rand::Rng;

use crate::{Boundary, Point, SliceError};

/// Parameters for [`random_polygon`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeParams {
    /// Smallest number of sides (inclusive).
    pub min_sides: usize,
    /// Largest number of sides (inclusive).
    pub max_sides: usize,
    /// Full width of the uniform jitter applied to each vertex radius.
    pub radius_jitter: f32,
    /// Full width of the uniform jitter applied to each vertex angle (radians).
    pub angle_jitter: f32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            min_sides: 3,
            max_sides: 7,
            radius_jitter: 30.0,
            angle_jitter: 0.4,
        }
    }
}

impl ShapeParams {
    pub fn with_sides(mut self, min: usize, max: usize) -> Self {
        self.min_sides = min;
        self.max_sides = max;
        self
    }

    pub fn with_jitter(mut self, radius: f32, angle: f32) -> Self {
        self.radius_jitter = radius;
        self.angle_jitter = angle;
        self
    }
}

/// Base radius for a polygon centered in a viewport of the given height,
/// leaving a 10% margin above and below.
pub fn radius_for_viewport(height: f32) -> f32 {
    let margin = height * 0.1;
    (height - 2.0 * margin) / 2.0
}

/// Generates a polygon by placing vertices at evenly spaced angles around
/// `center`, each with its radius and angle jittered.
///
/// # Errors
/// Propagates [`Boundary::new`] errors, e.g. when `min_sides < 3`.
pub fn random_polygon<R: Rng + ?Sized>(
    rng: &mut R,
    center: Point,
    radius: f32,
    params: &ShapeParams,
) -> Result<Boundary, SliceError> {
    let sides = if params.max_sides > params.min_sides {
        rng.gen_range(params.min_sides..=params.max_sides)
    } else {
        params.min_sides
    };

    let points = (0..sides)
        .map(|i| {
            let angle = i as f32 * TAU / sides as f32;
            let r = radius + (rng.gen_range(0.0f32..1.0) - 0.5) * params.radius_jitter;
            let a = angle + (rng.gen_range(0.0f32..1.0) - 0.5) * params.angle_jitter;
            Point::new(center.x + r * a.cos(), center.y + r * a.sin())
        })
        .collect();

    Boundary::new(points)
}
