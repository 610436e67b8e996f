//! Closed polygon outlines and the crossing queries run against them.

use crate::{EPSILON, Point, Segment, SliceError};

/// Index of an edge within its [`Boundary`].
///
/// Edge `i` runs from vertex `i` to vertex `i + 1` (cyclically).
pub type EdgeId = usize;

/// A point where a query segment crosses a boundary edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// The crossing point.
    pub point: Point,
    /// Distance from the query segment's start to `point`.
    pub distance: f32,
    /// The boundary edge that was crossed.
    pub edge: EdgeId,
}

/// A closed polygon outline, stored as a cyclic list of edges.
///
/// The outline is assumed to be simple (non-self-intersecting); this is not
/// checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    edges: Vec<Segment>,
}

impl Boundary {
    /// Builds a boundary from its vertices in order. The closing edge from the
    /// last vertex back to the first is added automatically.
    ///
    /// # Errors
    /// - [`SliceError::InvalidBoundary`] if fewer than 3 vertices are given.
    /// - [`SliceError::NonFinitePoint`] if a coordinate is NaN or infinite.
    /// - [`SliceError::DegenerateEdge`] if two consecutive vertices coincide.
    pub fn new(points: Vec<Point>) -> Result<Self, SliceError> {
        let n = points.len();
        if n < 3 {
            return Err(SliceError::InvalidBoundary { count: n });
        }

        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(SliceError::NonFinitePoint { index });
        }

        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            let edge = Segment::new(points[i], points[(i + 1) % n]);
            if edge.is_degenerate() {
                return Err(SliceError::DegenerateEdge { index: i });
            }
            edges.push(edge);
        }

        Ok(Self { edges })
    }

    /// Returns the edges in order.
    #[inline]
    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Segment> {
        self.edges.get(id)
    }

    /// Returns the number of edges (equal to the number of vertices).
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always false for a constructed boundary.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns vertex `i`, the start of edge `i`.
    #[inline]
    pub fn vertex(&self, i: usize) -> Point {
        self.edges[i % self.edges.len()].start()
    }

    /// Returns the vertices in order.
    pub fn vertices(&self) -> Vec<Point> {
        self.edges.iter().map(Segment::start).collect()
    }

    /// Point-in-polygon test by ray-casting parity.
    pub fn contains(&self, point: Point) -> bool {
        let hits = self
            .edges
            .iter()
            .filter(|edge| edge.ray_parity(point))
            .count();
        hits % 2 == 1
    }

    /// Returns every crossing of `query` with the boundary, in edge order.
    ///
    /// A crossing counts only if it lies inside both the query and the edge,
    /// away from their endpoints.
    pub fn crossings(&self, query: &Segment) -> Vec<Crossing> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(edge, segment)| {
                segment.crosses(query).map(|point| Crossing {
                    point,
                    distance: (point - query.start()).norm(),
                    edge,
                })
            })
            .collect()
    }

    /// Same as [`Boundary::crossings`], sorted by distance from the query start.
    pub fn sorted_crossings(&self, query: &Segment) -> Vec<Crossing> {
        let mut crossings = self.crossings(query);
        crossings.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        crossings
    }

    /// Like [`Boundary::sorted_crossings`], but hits at or near edge
    /// endpoints count too. A path through a vertex hits both edges meeting
    /// there; repeated points are kept once.
    pub fn touching_crossings(&self, query: &Segment) -> Vec<Crossing> {
        let mut crossings: Vec<Crossing> = self
            .edges
            .iter()
            .enumerate()
            .filter_map(|(edge, segment)| {
                segment.touches(query).map(|point| Crossing {
                    point,
                    distance: (point - query.start()).norm(),
                    edge,
                })
            })
            .collect();
        crossings.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        crossings.dedup_by(|a, b| (a.point - b.point).norm() <= EPSILON);
        crossings
    }

    /// Finds the crossing of `p1 -> p2` closest to `p1`.
    ///
    /// Used to resolve a single known inside/outside transition, so endpoint
    /// hits are accepted: a path through a vertex still resolves.
    pub fn nearest_crossing(&self, p1: Point, p2: Point) -> Option<Crossing> {
        self.touching_crossings(&Segment::new(p1, p2))
            .into_iter()
            .next()
    }

    /// Mean of the vertices.
    pub fn centroid(&self) -> Point {
        let sum = self
            .edges
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, e| acc + e.start().coords);
        Point::from(sum / self.edges.len() as f32)
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Point, Point) {
        let first = self.edges[0].start();
        self.edges.iter().map(Segment::start).fold(
            (first, first),
            |(min, max), p| {
                (
                    Point::new(min.x.min(p.x), min.y.min(p.y)),
                    Point::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        )
    }

    /// Length of the bounding box diagonal, used to scale distance thresholds.
    pub fn size(&self) -> f32 {
        let (min, max) = self.bounds();
        (max - min).norm()
    }

    /// Signed area via the shoelace formula.
    ///
    /// Positive for counter-clockwise winding in a y-up frame (clockwise on
    /// screen, where y grows downward).
    pub fn signed_area(&self) -> f32 {
        self.edges
            .iter()
            .map(|e| e.start().x * e.end().y - e.end().x * e.start().y)
            .sum::<f32>()
            / 2.0
    }

    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }
}
