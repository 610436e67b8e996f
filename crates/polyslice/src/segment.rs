//! Oriented line segments and the tolerances shared by every slicing query.

use nalgebra::{Point2, Vector2};

/// A point in screen-space units.
pub type Point = Point2<f32>;

/// Values within this distance of zero are treated as zero.
pub const EPSILON: f32 = 1e-4;

/// Fraction of the parameter range trimmed from each end of a segment when
/// bounding a crossing.
///
/// Adjacent boundary edges share a vertex; trimming keeps a query through that
/// vertex from being reported by both edges.
pub const SEGMENT_INSET: f32 = 5.0 * EPSILON;

/// An oriented straight segment from `start` to `end`.
///
/// The supporting line is handled as `start + t * (end - start)`, so vertical
/// segments need no special casing.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
    length: f32,
}

impl Segment {
    /// Creates a segment between two points.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            length: (end - start).norm(),
        }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns the Euclidean length of the segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Returns the (unnormalized) direction vector `end - start`.
    #[inline]
    pub fn direction(&self) -> Vector2<f32> {
        self.end - self.start
    }

    pub fn midpoint(&self) -> Point {
        nalgebra::center(&self.start, &self.end)
    }

    /// Returns the same segment traversed from `end` to `start`.
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Returns true if the segment is too short to define a line.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length <= EPSILON
    }

    /// Intersects the infinite lines through `self` and `other`.
    ///
    /// Returns `None` if the lines are parallel (within [`EPSILON`] of the
    /// normalized cross product) or either segment is degenerate. Whether the
    /// point lies on both segments is checked separately with
    /// [`Segment::contains_point`].
    pub fn intersect(&self, other: &Segment) -> Option<Point> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }

        let r = self.direction();
        let s = other.direction();
        let denom = cross(&r, &s);

        if (denom / (self.length * other.length)).abs() < EPSILON {
            return None;
        }

        let t = cross(&(other.start - self.start), &s) / denom;
        Some(self.start + r * t)
    }

    /// Returns the parameter `t` of the projection of `point` onto the line,
    /// where `0` is `start` and `1` is `end`.
    #[inline]
    pub fn parameter_of(&self, point: Point) -> f32 {
        let d = self.direction();
        (point - self.start).dot(&d) / d.norm_squared()
    }

    /// Perpendicular distance from `point` to the supporting line.
    pub fn line_distance(&self, point: Point) -> f32 {
        cross(&self.direction(), &(point - self.start)).abs() / self.length
    }

    /// Returns true if `point` lies on the segment, excluding a
    /// [`SEGMENT_INSET`] fraction at both ends.
    pub fn contains_point(&self, point: Point) -> bool {
        self.contains_point_within(point, SEGMENT_INSET, 1.0 - SEGMENT_INSET)
    }

    /// Returns true if `point` lies on the segment, endpoints included with
    /// an [`EPSILON`] margin.
    pub fn touches_point(&self, point: Point) -> bool {
        self.contains_point_within(point, -EPSILON, 1.0 + EPSILON)
    }

    fn contains_point_within(&self, point: Point, lo: f32, hi: f32) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let t = self.parameter_of(point);
        (lo..=hi).contains(&t) && self.line_distance(point) <= EPSILON * self.length.max(1.0)
    }

    /// Returns the point where the two segments cross, if they do.
    ///
    /// The crossing must lie inside both segments, away from their endpoints.
    pub fn crosses(&self, other: &Segment) -> Option<Point> {
        self.intersect(other)
            .filter(|p| self.contains_point(*p) && other.contains_point(*p))
    }

    /// Like [`Segment::crosses`], but accepts crossings at or just beyond the
    /// endpoints.
    pub fn touches(&self, other: &Segment) -> Option<Point> {
        self.intersect(other)
            .filter(|p| self.touches_point(*p) && other.touches_point(*p))
    }

    /// Tests whether a horizontal ray cast rightward from `point` crosses this
    /// segment.
    ///
    /// The y-span is half-open, so a ray through a vertex shared by two edges
    /// is counted once, and horizontal segments never count.
    pub fn ray_parity(&self, point: Point) -> bool {
        let (p0, p1) = (self.start, self.end);
        if (p0.y > point.y) == (p1.y > point.y) {
            return false;
        }
        let x = p0.x + (point.y - p0.y) * (p1.x - p0.x) / (p1.y - p0.y);
        x > point.x
    }

    /// Distance from `point` to the closest point of the segment.
    pub fn distance_to(&self, point: Point) -> f32 {
        if self.is_degenerate() {
            return (point - self.start).norm();
        }
        let t = self.parameter_of(point).clamp(0.0, 1.0);
        (point - (self.start + self.direction() * t)).norm()
    }
}

/// 2D cross product (z component of the 3D cross product).
#[inline]
pub(crate) fn cross(a: &Vector2<f32>, b: &Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seg(a: [f32; 2], b: [f32; 2]) -> Segment {
        Segment::new(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
    }

    #[test]
    fn length_and_direction() {
        let s = seg([0.0, 0.0], [3.0, 4.0]);
        assert_relative_eq!(s.length(), 5.0);
        assert_eq!(s.direction(), Vector2::new(3.0, 4.0));
        assert_eq!(s.midpoint(), Point::new(1.5, 2.0));
    }

    #[test]
    fn intersect_diagonals() {
        let a = seg([0.0, 0.0], [10.0, 10.0]);
        let b = seg([0.0, 10.0], [10.0, 0.0]);
        let p = a.intersect(&b).unwrap();
        assert_relative_eq!(p, Point::new(5.0, 5.0), epsilon = 1e-4);
    }

    #[test]
    fn intersect_vertical_with_horizontal() {
        // A slope-based formulation breaks down here
        let vertical = seg([3.0, -5.0], [3.0, 5.0]);
        let horizontal = seg([-5.0, 1.0], [5.0, 1.0]);
        let p = vertical.intersect(&horizontal).unwrap();
        assert_relative_eq!(p, Point::new(3.0, 1.0), epsilon = 1e-4);
    }

    #[test]
    fn intersect_vertical_with_slope_one() {
        let vertical = seg([2.0, 0.0], [2.0, 10.0]);
        let diagonal = seg([0.0, 0.0], [10.0, 10.0]);
        let p = vertical.intersect(&diagonal).unwrap();
        assert_relative_eq!(p, Point::new(2.0, 2.0), epsilon = 1e-4);
    }

    #[test]
    fn intersect_parallel_is_none() {
        let a = seg([0.0, 0.0], [10.0, 0.0]);
        let b = seg([0.0, 1.0], [10.0, 1.0]);
        assert!(a.intersect(&b).is_none());

        let c = seg([0.0, 0.0], [0.0, 10.0]);
        let d = seg([4.0, 0.0], [4.0, -10.0]);
        assert!(c.intersect(&d).is_none());
    }

    #[test]
    fn intersect_degenerate_is_none() {
        let a = seg([1.0, 1.0], [1.0, 1.0]);
        let b = seg([0.0, 0.0], [10.0, 3.0]);
        assert!(a.intersect(&b).is_none());
        assert!(b.intersect(&a).is_none());
    }

    #[test]
    fn intersect_is_symmetric() {
        let pairs = [
            (seg([0.0, 0.0], [7.0, 3.0]), seg([1.0, 5.0], [4.0, -2.0])),
            (seg([-3.0, 2.0], [-3.0, 9.0]), seg([-10.0, 4.0], [2.0, 6.5])),
            (seg([100.0, 200.0], [350.0, 180.0]), seg([220.0, 90.0], [240.0, 400.0])),
            (seg([0.0, 0.0], [1.0, 1000.0]), seg([0.0, 500.0], [2.0, 500.0])),
        ];
        for (a, b) in &pairs {
            let ab = a.intersect(b).unwrap();
            let ba = b.intersect(a).unwrap();
            assert_relative_eq!(ab, ba, epsilon = 1e-3);
        }
    }

    #[test]
    fn contains_point_rejects_perpendicular_offsets() {
        // Within `length` of both endpoints, but well off the segment
        let s = seg([0.0, 0.0], [10.0, 0.0]);
        assert!(!s.contains_point(Point::new(5.0, 4.0)));
        assert!(s.contains_point(Point::new(5.0, 0.0)));
    }

    #[test]
    fn contains_point_excludes_endpoints() {
        let s = seg([0.0, 0.0], [10.0, 0.0]);
        assert!(!s.contains_point(Point::new(0.0, 0.0)));
        assert!(!s.contains_point(Point::new(10.0, 0.0)));
        assert!(!s.contains_point(Point::new(11.0, 0.0)));
        assert!(s.touches_point(Point::new(0.0, 0.0)));
        assert!(s.touches_point(Point::new(10.0, 0.0)));
        assert!(!s.touches_point(Point::new(11.0, 0.0)));
    }

    #[test]
    fn crosses_requires_both_spans() {
        let a = seg([0.0, 0.0], [10.0, 0.0]);
        let b = seg([5.0, -1.0], [5.0, 1.0]);
        let c = seg([5.0, 1.0], [5.0, 3.0]);
        assert!(a.crosses(&b).is_some());
        assert!(a.crosses(&c).is_none());
    }

    #[test]
    fn crosses_ignores_shared_vertex() {
        let a = seg([0.0, 0.0], [10.0, 0.0]);
        let b = seg([10.0, 0.0], [10.0, 10.0]);
        assert!(a.crosses(&b).is_none());
        assert!(a.touches(&b).is_some());
    }

    #[test]
    fn ray_parity_hits_segment_to_the_right() {
        let s = seg([10.0, 0.0], [10.0, 10.0]);
        assert!(s.ray_parity(Point::new(5.0, 5.0)));
        assert!(!s.ray_parity(Point::new(15.0, 5.0)));
        assert!(!s.ray_parity(Point::new(5.0, 12.0)));
    }

    #[test]
    fn ray_parity_ignores_horizontal() {
        let s = seg([0.0, 5.0], [10.0, 5.0]);
        assert!(!s.ray_parity(Point::new(-5.0, 5.0)));
    }

    #[test]
    fn ray_parity_counts_shared_vertex_once() {
        // Two edges meeting at (10, 5), ray exactly through the vertex
        let upper = seg([5.0, 0.0], [10.0, 5.0]);
        let lower = seg([10.0, 5.0], [5.0, 10.0]);
        let p = Point::new(0.0, 5.0);
        let hits = [upper.ray_parity(p), lower.ray_parity(p)]
            .iter()
            .filter(|h| **h)
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn distance_to_clamps_to_endpoints() {
        let s = seg([0.0, 0.0], [10.0, 0.0]);
        assert_relative_eq!(s.distance_to(Point::new(5.0, 3.0)), 3.0);
        assert_relative_eq!(s.distance_to(Point::new(13.0, 4.0)), 5.0);
    }
}
