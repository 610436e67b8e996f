//! The slice-path state machine.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::{Boundary, Crossing, EPSILON, Point, Segment, SliceError};

use super::config::TrackerConfig;
use super::record::{CutEnd, CutRecord};
use super::sink::{Marker, SliceSink, Stroke};

/// Whether a cut is currently being traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No cut in progress.
    Idle,
    /// Tracing a cut inside the boundary.
    Active,
}

/// Converts a stream of cursor samples into discrete cut events.
///
/// The host calls [`SliceTracker::update`] once per frame with the previous
/// and current cursor positions. While the cursor is inside the boundary the
/// path is recorded as a polyline; when it leaves, the polyline is finalized
/// into a [`CutRecord`].
///
/// # Crossings within one tick
///
/// A fast cursor can cross the boundary several times in a single frame.
/// Crossings are processed in increasing distance from the previous position,
/// alternating inside/outside starting from the containment of that position.
/// Every inside-to-outside flip closes the open cut, so one tick can finish
/// more than one cut; extra records are queued and returned by later calls,
/// oldest first.
///
/// # Self-crossings
///
/// When a newly appended segment crosses an earlier, non-adjacent segment of
/// the polyline, the loop is dropped: the polyline restarts at the crossing
/// nearest to the new segment's end and the cut loses its entry edge.
#[derive(Debug, Clone)]
pub struct SliceTracker {
    boundary: Boundary,
    config: TrackerConfig,
    /// Minimum spacing between polyline vertices, derived from the boundary size.
    min_spacing: f32,
    polyline: Vec<Segment>,
    phase: Phase,
    entry: Option<CutEnd>,
    last_point: Point,
    ticks: u32,
    completed: VecDeque<CutRecord>,
}

impl SliceTracker {
    /// Creates an idle tracker for `boundary` with the default configuration.
    pub fn new(boundary: Boundary) -> Self {
        Self::with_config(boundary, TrackerConfig::default())
    }

    pub fn with_config(boundary: Boundary, config: TrackerConfig) -> Self {
        let min_spacing = config.min_spacing_ratio * boundary.size();
        Self {
            boundary,
            config,
            min_spacing,
            polyline: Vec::new(),
            phase: Phase::Idle,
            entry: None,
            last_point: Point::origin(),
            ticks: 0,
            completed: VecDeque::new(),
        }
    }

    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// The polyline of the cut being traced, empty when idle.
    #[inline]
    pub fn in_progress_polyline(&self) -> &[Segment] {
        &self.polyline
    }

    /// Where the cut being traced entered the boundary, if it did.
    #[inline]
    pub fn entry(&self) -> Option<&CutEnd> {
        self.entry.as_ref()
    }

    /// Number of finished cuts not yet returned by [`SliceTracker::update`].
    pub fn pending(&self) -> usize {
        self.completed.len()
    }

    /// Swaps in a new boundary and resets the tracker.
    pub fn replace_boundary(&mut self, boundary: Boundary) {
        self.min_spacing = self.config.min_spacing_ratio * boundary.size();
        self.boundary = boundary;
        self.reset();
    }

    /// Aborts any cut in progress and drops queued records.
    pub fn reset(&mut self) {
        self.clear_cut();
        self.completed.clear();
    }

    /// Advances the tracker by one tick.
    ///
    /// Returns the oldest finished cut, if any.
    pub fn update(&mut self, prev: Point, cur: Point) -> Option<CutRecord> {
        self.step(prev, cur);
        self.completed.pop_front()
    }

    /// Sends the in-progress polyline and its entry marker to `sink`.
    pub fn draw_in_progress<S: SliceSink>(&self, sink: &mut S) {
        for segment in &self.polyline {
            sink.draw_segment(segment, Stroke::InProgress);
        }
        if let Some(entry) = &self.entry {
            sink.draw_marker(entry.point, Marker::Entry);
        }
    }

    fn step(&mut self, prev: Point, cur: Point) {
        if (cur - prev).norm() <= EPSILON {
            trace!("cursor did not move, skipping tick");
            return;
        }

        let query = Segment::new(prev, cur);
        let prev_inside = self.boundary.contains(prev);
        let cur_inside = self.boundary.contains(cur);
        let transition = prev_inside != cur_inside;

        // An odd number of crossings must mean the cursor changed sides.
        // Hits near a vertex are missed by the strict query, so retry with
        // endpoints included before giving up.
        let mut crossings = self.boundary.sorted_crossings(&query);
        if (crossings.len() % 2 == 1) != transition {
            trace!(count = crossings.len(), "crossing parity off, retrying with vertices");
            crossings = self.boundary.touching_crossings(&query);
            if (crossings.len() % 2 == 1) != transition {
                self.unresolved(prev, cur);
                return;
            }
        }

        if crossings.len() > 1 {
            self.walk_crossings(prev, &crossings, prev_inside);
        } else {
            match (prev_inside, cur_inside) {
                (false, true) => match self.boundary.nearest_crossing(prev, cur) {
                    Some(crossing) => self.open_at_crossing(&crossing),
                    None => self.unresolved(prev, cur),
                },
                (true, false) => {
                    if self.phase == Phase::Active {
                        match self.boundary.nearest_crossing(prev, cur) {
                            Some(crossing) => {
                                self.extend_to(prev);
                                self.close_cut(&crossing);
                            }
                            None => self.unresolved(prev, cur),
                        }
                    } else {
                        self.clear_cut();
                    }
                }
                (true, true) => {
                    if self.phase == Phase::Idle {
                        self.open_cut(cur, None);
                    }
                }
                (false, false) => return,
            }
        }

        if self.phase == Phase::Active && cur_inside {
            self.densify(cur);
        }
    }

    /// Alternates inside/outside over crossings sorted by distance from `prev`.
    ///
    /// The caller guarantees the crossing count agrees with the containment
    /// of both ends, so the walk ends on the side `cur` is on.
    fn walk_crossings(&mut self, prev: Point, crossings: &[Crossing], prev_inside: bool) {
        let mut inside = prev_inside;
        // Start of the stretch of the query currently inside the boundary
        let mut anchor = prev;

        for crossing in crossings {
            if inside {
                if self.phase == Phase::Active {
                    self.extend_to(anchor);
                    self.close_cut(crossing);
                } else {
                    self.clear_cut();
                }
            } else {
                self.open_at_crossing(crossing);
                anchor = crossing.point;
            }
            inside = !inside;
        }
    }

    fn open_at_crossing(&mut self, crossing: &Crossing) {
        let entry = CutEnd {
            point: crossing.point,
            edge: crossing.edge,
        };
        self.open_cut(crossing.point, Some(entry));
    }

    fn open_cut(&mut self, point: Point, entry: Option<CutEnd>) {
        debug!(?point, edge = ?entry.map(|e| e.edge), "cut opened");
        self.polyline.clear();
        self.phase = Phase::Active;
        self.entry = entry;
        self.last_point = point;
        self.ticks = 0;
    }

    /// Appends the closing segment, queues the record and returns to idle.
    fn close_cut(&mut self, crossing: &Crossing) {
        self.extend_to(crossing.point);

        if self.polyline.is_empty() {
            debug!("cut closed without length, discarding");
        } else {
            let exit = CutEnd {
                point: crossing.point,
                edge: crossing.edge,
            };
            let record = CutRecord::new(std::mem::take(&mut self.polyline), self.entry, exit);
            debug!(
                segments = record.polyline().len(),
                exit_edge = exit.edge,
                "cut finished"
            );
            self.completed.push_back(record);
        }

        self.clear_cut();
    }

    fn clear_cut(&mut self) {
        self.polyline.clear();
        self.phase = Phase::Idle;
        self.entry = None;
        self.last_point = Point::origin();
        self.ticks = 0;
    }

    fn unresolved(&mut self, prev: Point, cur: Point) {
        warn!(?prev, ?cur, "{}, dropping cut", SliceError::UnresolvedCrossing);
        self.clear_cut();
    }

    /// Appends a vertex once enough ticks have passed and the cursor has moved
    /// far enough from the last one.
    fn densify(&mut self, cur: Point) {
        self.ticks += 1;
        if self.ticks >= self.config.spawn_interval
            && (cur - self.last_point).norm() > self.min_spacing
        {
            self.extend_to(cur);
            self.ticks -= self.config.spawn_interval;
        }
    }

    /// Extends the polyline from the last recorded point to `point`.
    fn extend_to(&mut self, point: Point) {
        if (point - self.last_point).norm() <= EPSILON {
            return;
        }
        self.push_segment(Segment::new(self.last_point, point));
        self.last_point = point;
    }

    fn push_segment(&mut self, segment: Segment) {
        let earlier = self.polyline.len().saturating_sub(1);
        let end = segment.end();
        let self_crossing = self.polyline[..earlier]
            .iter()
            .filter_map(|s| s.crosses(&segment))
            .min_by(|a, b| (*a - end).norm().total_cmp(&(*b - end).norm()));

        match self_crossing {
            Some(point) => {
                debug!(?point, "cut crossed itself, restarting");
                self.polyline.clear();
                self.entry = None;
                let rest = Segment::new(point, end);
                if !rest.is_degenerate() {
                    self.polyline.push(rest);
                }
            }
            None => self.polyline.push(segment),
        }
    }
}
