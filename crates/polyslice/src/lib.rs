//! Polygon slicing core: segments, boundaries and the cut-path state machine.

mod boundary;
mod error;
mod segment;
mod split;

pub mod generate;
pub mod slice;

pub use boundary::{Boundary, Crossing, EdgeId};
pub use error::SliceError;
pub use segment::{EPSILON, Point, SEGMENT_INSET, Segment};
pub use slice::{
    CollectingSink, CutEnd, CutRecord, DrawCall, FnSink, Marker, Phase, SliceSink, SliceTracker,
    Stroke, TrackerConfig,
};
pub use split::split_boundary;
