//! Splitting a boundary along a finished cut.

use crate::{Boundary, CutRecord, EPSILON, EdgeId, Point, SliceError};

/// Splits `boundary` into two outlines along `cut`.
///
/// Walks the boundary the way Sutherland-Hodgman walks a polygon against a
/// plane, except the "plane" is the cut polyline: each piece is the cut
/// followed by the boundary vertices between its exit and entry edges.
///
/// Returns `(first, second)` where `first` follows the cut from entry to exit
/// and `second` follows it backwards. When the cut enters and leaves through
/// the same edge, `second` is the pocket enclosed by the cut and that edge.
///
/// # Errors
/// - [`SliceError::MissingEntry`] if the cut started inside the boundary.
/// - [`SliceError::EdgeOutOfRange`] if the record refers to another boundary.
/// - Any [`Boundary::new`] error for a piece that degenerates, e.g. a straight
///   cut in and out of the same edge.
pub fn split_boundary(
    boundary: &Boundary,
    cut: &CutRecord,
) -> Result<(Boundary, Boundary), SliceError> {
    let entry = cut.entry().ok_or(SliceError::MissingEntry)?;
    let exit = cut.exit();

    let len = boundary.len();
    for index in [entry.edge, exit.edge] {
        if index >= len {
            return Err(SliceError::EdgeOutOfRange { index, len });
        }
    }

    let path = cut.points();
    let reversed: Vec<Point> = path.iter().rev().copied().collect();
    let (i, j) = (entry.edge, exit.edge);

    let (first, second) = if i != j {
        let mut first = path;
        first.extend(walk(boundary, j, i));
        let mut second = reversed;
        second.extend(walk(boundary, i, j));
        (first, second)
    } else {
        let edge = &boundary.edges()[i];
        let entry_t = edge.parameter_of(path[0]);
        let exit_t = edge.parameter_of(path[path.len() - 1]);
        let around = walk(boundary, i, i);

        if entry_t < exit_t {
            let mut outer = path;
            outer.extend(around);
            (outer, reversed)
        } else {
            let mut outer = reversed;
            outer.extend(around);
            (outer, path)
        }
    };

    Ok((
        Boundary::new(dedup_points(first))?,
        Boundary::new(dedup_points(second))?,
    ))
}

/// Vertices from the end of edge `from` up to the start of edge `to`,
/// walking forward. When `from == to` this is every vertex, ending with the
/// start of `from`.
fn walk(boundary: &Boundary, from: EdgeId, to: EdgeId) -> Vec<Point> {
    let n = boundary.len();
    let mut vertices = Vec::with_capacity(n);
    let mut k = (from + 1) % n;
    loop {
        vertices.push(boundary.vertex(k));
        if k == to {
            break;
        }
        k = (k + 1) % n;
    }
    vertices
}

/// Drops consecutive points closer than [`EPSILON`], including the wrap from
/// last to first. Happens when a cut crosses exactly at a vertex.
fn dedup_points(mut points: Vec<Point>) -> Vec<Point> {
    points.dedup_by(|a, b| (*a - *b).norm() <= EPSILON);
    while points.len() > 1 && (points[0] - points[points.len() - 1]).norm() <= EPSILON {
        points.pop();
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CutEnd, Segment, SliceTracker, TrackerConfig};
    use approx::assert_relative_eq;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn square() -> Boundary {
        Boundary::new(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]).unwrap()
    }

    fn record(points: &[Point], entry_edge: Option<EdgeId>, exit_edge: EdgeId) -> CutRecord {
        let polyline = points
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect();
        let entry = entry_edge.map(|edge| CutEnd {
            point: points[0],
            edge,
        });
        let exit = CutEnd {
            point: points[points.len() - 1],
            edge: exit_edge,
        };
        CutRecord::new(polyline, entry, exit)
    }

    #[test]
    fn straight_cut_halves_square() {
        let cut = record(&[p(0.0, 5.0), p(10.0, 5.0)], Some(3), 1);
        let (first, second) = split_boundary(&square(), &cut).unwrap();

        assert_eq!(
            first.vertices(),
            vec![p(0.0, 5.0), p(10.0, 5.0), p(10.0, 10.0), p(0.0, 10.0)]
        );
        assert_eq!(
            second.vertices(),
            vec![p(10.0, 5.0), p(0.0, 5.0), p(0.0, 0.0), p(10.0, 0.0)]
        );
        assert_relative_eq!(first.area(), 50.0);
        assert_relative_eq!(second.area(), 50.0);
    }

    #[test]
    fn bent_cut_between_adjacent_edges() {
        // Clips the bottom-right corner off
        let cut = record(&[p(6.0, 0.0), p(7.0, 2.0), p(10.0, 3.0)], Some(0), 1);
        let (first, second) = split_boundary(&square(), &cut).unwrap();

        assert_eq!(first.len(), 6);
        assert_eq!(second.len(), 4);
        assert_relative_eq!(first.area() + second.area(), 100.0, epsilon = 1e-3);
        assert!(second.contains(p(9.0, 1.0)));
        assert!(first.contains(p(2.0, 8.0)));
    }

    #[test]
    fn cut_in_and_out_of_same_edge() {
        let cut = record(
            &[p(2.0, 0.0), p(2.0, 4.0), p(6.0, 4.0), p(6.0, 0.0)],
            Some(0),
            0,
        );
        let (outer, pocket) = split_boundary(&square(), &cut).unwrap();

        assert_relative_eq!(outer.area(), 84.0, epsilon = 1e-3);
        assert_relative_eq!(pocket.area(), 16.0, epsilon = 1e-3);
        assert!(pocket.contains(p(4.0, 2.0)));
        assert!(!outer.contains(p(4.0, 2.0)));
    }

    #[test]
    fn same_edge_against_edge_direction() {
        let cut = record(
            &[p(6.0, 0.0), p(6.0, 4.0), p(2.0, 4.0), p(2.0, 0.0)],
            Some(0),
            0,
        );
        let (outer, pocket) = split_boundary(&square(), &cut).unwrap();
        assert_relative_eq!(outer.area(), 84.0, epsilon = 1e-3);
        assert_relative_eq!(pocket.area(), 16.0, epsilon = 1e-3);
    }

    #[test]
    fn straight_cut_through_one_edge_is_degenerate() {
        let cut = record(&[p(2.0, 0.0), p(6.0, 0.0)], Some(0), 0);
        assert!(matches!(
            split_boundary(&square(), &cut),
            Err(SliceError::InvalidBoundary { .. })
        ));
    }

    #[test]
    fn cut_through_vertex_drops_duplicate() {
        // Enters exactly at the (0, 0) corner, reported on edge 0
        let cut = record(&[p(0.0, 0.0), p(10.0, 10.0)], Some(0), 1);
        let (first, second) = split_boundary(&square(), &cut).unwrap();
        assert_eq!(second.len(), 3);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn missing_entry_is_rejected() {
        let cut = record(&[p(5.0, 5.0), p(10.0, 5.0)], None, 1);
        assert_eq!(
            split_boundary(&square(), &cut).unwrap_err(),
            SliceError::MissingEntry
        );
    }

    #[test]
    fn looping_cut_cannot_be_split() {
        let mut tracker =
            SliceTracker::with_config(square(), TrackerConfig::default().with_spawn_interval(1));
        let path = [
            p(-5.0, 5.0),
            p(2.0, 5.0),
            p(8.0, 5.0),
            p(8.0, 8.0),
            p(5.0, 8.0),
            p(5.0, 2.0),
            p(5.0, -5.0),
        ];
        let cut = path
            .windows(2)
            .find_map(|w| tracker.update(w[0], w[1]))
            .unwrap();

        assert!(cut.entry().is_none());
        assert_eq!(
            split_boundary(&square(), &cut).unwrap_err(),
            SliceError::MissingEntry
        );
    }

    #[test]
    fn foreign_edge_ids_are_rejected() {
        let cut = record(&[p(0.0, 5.0), p(10.0, 5.0)], Some(3), 7);
        assert_eq!(
            split_boundary(&square(), &cut).unwrap_err(),
            SliceError::EdgeOutOfRange { index: 7, len: 4 }
        );
    }

    #[test]
    fn split_tracked_cut() {
        let boundary = Boundary::new(vec![
            p(100.0, 100.0),
            p(300.0, 80.0),
            p(340.0, 260.0),
            p(120.0, 300.0),
        ])
        .unwrap();
        let total = boundary.area();
        let mut tracker =
            SliceTracker::with_config(boundary.clone(), TrackerConfig::default().with_spawn_interval(1));

        let path = [
            p(50.0, 150.0),
            p(150.0, 160.0),
            p(220.0, 200.0),
            p(280.0, 190.0),
            p(400.0, 200.0),
        ];
        let cut = path
            .windows(2)
            .find_map(|w| tracker.update(w[0], w[1]))
            .unwrap();

        let (first, second) = split_boundary(&boundary, &cut).unwrap();
        assert_relative_eq!(first.area() + second.area(), total, max_relative = 1e-3);
        assert!(first.area() > 0.0 && second.area() > 0.0);
    }
}
