//! Finalized cuts.

use crate::{EdgeId, Point, Segment};

use super::sink::{Marker, SliceSink, Stroke};

/// Where a cut meets the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutEnd {
    pub point: Point,
    pub edge: EdgeId,
}

/// An immutable snapshot of one completed cut.
///
/// The polyline runs from the entry point to the exit point. `entry` is
/// `None` when the cut began inside the boundary (tracking started
/// mid-polygon, or the path was restarted at a self-crossing). Such cuts,
/// including every cut whose path looped over itself, cannot be passed to
/// [`split_boundary`](crate::split_boundary).
#[derive(Debug, Clone, PartialEq)]
pub struct CutRecord {
    polyline: Vec<Segment>,
    entry: Option<CutEnd>,
    exit: CutEnd,
}

impl CutRecord {
    /// Creates a record. `polyline` must be non-empty and connected.
    pub(crate) fn new(polyline: Vec<Segment>, entry: Option<CutEnd>, exit: CutEnd) -> Self {
        debug_assert!(!polyline.is_empty(), "CutRecord needs at least one segment");
        Self {
            polyline,
            entry,
            exit,
        }
    }

    #[inline]
    pub fn polyline(&self) -> &[Segment] {
        &self.polyline
    }

    #[inline]
    pub fn entry(&self) -> Option<&CutEnd> {
        self.entry.as_ref()
    }

    #[inline]
    pub fn exit(&self) -> &CutEnd {
        &self.exit
    }

    /// First point of the polyline.
    pub fn start_point(&self) -> Point {
        self.polyline[0].start()
    }

    /// Last point of the polyline (the exit point).
    pub fn end_point(&self) -> Point {
        self.polyline[self.polyline.len() - 1].end()
    }

    /// Polyline vertices in path order, both ends included.
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(self.start_point())
            .chain(self.polyline.iter().map(Segment::end))
            .collect()
    }

    /// Total length of the polyline.
    pub fn length(&self) -> f32 {
        self.polyline.iter().map(Segment::length).sum()
    }

    /// Sends the polyline and its end markers to `sink`.
    pub fn draw<S: SliceSink>(&self, sink: &mut S) {
        for segment in &self.polyline {
            sink.draw_segment(segment, Stroke::Finalized);
        }
        if let Some(entry) = &self.entry {
            sink.draw_marker(entry.point, Marker::Entry);
        }
        sink.draw_marker(self.exit.point, Marker::Exit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::sink::{CollectingSink, DrawCall};
    use approx::assert_relative_eq;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn sample() -> CutRecord {
        CutRecord::new(
            vec![
                Segment::new(p(0.0, 5.0), p(4.0, 5.0)),
                Segment::new(p(4.0, 5.0), p(4.0, 8.0)),
                Segment::new(p(4.0, 8.0), p(10.0, 8.0)),
            ],
            Some(CutEnd {
                point: p(0.0, 5.0),
                edge: 3,
            }),
            CutEnd {
                point: p(10.0, 8.0),
                edge: 1,
            },
        )
    }

    #[test]
    fn endpoints_and_points() {
        let record = sample();
        assert_eq!(record.start_point(), p(0.0, 5.0));
        assert_eq!(record.end_point(), p(10.0, 8.0));
        assert_eq!(
            record.points(),
            vec![p(0.0, 5.0), p(4.0, 5.0), p(4.0, 8.0), p(10.0, 8.0)]
        );
        assert_relative_eq!(record.length(), 13.0);
    }

    #[test]
    fn draw_emits_segments_then_markers() {
        let record = sample();
        let mut sink = CollectingSink::new();
        record.draw(&mut sink);

        let calls = sink.into_calls();
        assert_eq!(calls.len(), 5);
        assert!(matches!(calls[0], DrawCall::Segment(_, Stroke::Finalized)));
        assert_eq!(calls[3], DrawCall::Marker(p(0.0, 5.0), Marker::Entry));
        assert_eq!(calls[4], DrawCall::Marker(p(10.0, 8.0), Marker::Exit));
    }

    #[test]
    fn draw_without_entry_skips_entry_marker() {
        let record = CutRecord::new(
            vec![Segment::new(p(5.0, 5.0), p(5.0, 0.0))],
            None,
            CutEnd {
                point: p(5.0, 0.0),
                edge: 0,
            },
        );
        let mut sink = CollectingSink::new();
        record.draw(&mut sink);
        assert_eq!(sink.calls().len(), 2);
    }
}
