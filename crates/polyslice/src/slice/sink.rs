//! Rendering sink for cut geometry.
//!
//! The tracker and its records never draw directly; they describe what to
//! draw through a [`SliceSink`] supplied by the host.

use crate::{Point, Segment};

/// How a segment should be stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// Part of the cut currently being traced.
    InProgress,
    /// Part of a finalized cut.
    Finalized,
}

/// Which end of a cut a marker denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Entry,
    Exit,
}

/// Receiver for cut geometry.
///
/// Implement this to draw cuts with a particular backend.
pub trait SliceSink {
    /// Called for each polyline segment, in path order.
    fn draw_segment(&mut self, segment: &Segment, stroke: Stroke);

    /// Called for each entry/exit point of a cut.
    fn draw_marker(&mut self, point: Point, marker: Marker);
}

/// A draw call recorded by [`CollectingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Segment(Segment, Stroke),
    Marker(Point, Marker),
}

/// A sink that records every call it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    calls: Vec<DrawCall>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }

    /// Returns the recorded segments, ignoring markers.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Segment(segment, _) => Some(segment),
            DrawCall::Marker(..) => None,
        })
    }
}

impl SliceSink for CollectingSink {
    fn draw_segment(&mut self, segment: &Segment, stroke: Stroke) {
        self.calls.push(DrawCall::Segment(segment.clone(), stroke));
    }

    fn draw_marker(&mut self, point: Point, marker: Marker) {
        self.calls.push(DrawCall::Marker(point, marker));
    }
}

/// A sink built from two closures.
pub struct FnSink<S, M>
where
    S: FnMut(&Segment, Stroke),
    M: FnMut(Point, Marker),
{
    segment: S,
    marker: M,
}

impl<S, M> FnSink<S, M>
where
    S: FnMut(&Segment, Stroke),
    M: FnMut(Point, Marker),
{
    pub fn new(segment: S, marker: M) -> Self {
        Self { segment, marker }
    }
}

impl<S, M> SliceSink for FnSink<S, M>
where
    S: FnMut(&Segment, Stroke),
    M: FnMut(Point, Marker),
{
    fn draw_segment(&mut self, segment: &Segment, stroke: Stroke) {
        (self.segment)(segment, stroke);
    }

    fn draw_marker(&mut self, point: Point, marker: Marker) {
        (self.marker)(point, marker);
    }
}
