//! Cursor-driven slicing.
//!
//! This module turns a stream of cursor positions into cut events against a
//! single [`Boundary`](crate::Boundary):
//!
//! - Cuts open where the cursor enters the boundary and close where it leaves
//! - Fast movements that cross the boundary several times in one frame are
//!   resolved in distance order
//! - Paths that loop over themselves are restarted at the self-crossing
//!
//! # Example
//!
//! ```
//! use polyslice::{Boundary, Point, SliceTracker};
//!
//! let square = Boundary::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ])?;
//! let mut tracker = SliceTracker::new(square);
//!
//! assert!(tracker.update(Point::new(-5.0, 5.0), Point::new(5.0, 5.0)).is_none());
//! let cut = tracker.update(Point::new(5.0, 5.0), Point::new(15.0, 5.0)).unwrap();
//! assert_eq!(cut.exit().edge, 1);
//! # Ok::<(), polyslice::SliceError>(())
//! ```
//!
//! # Architecture
//!
//! - [`SliceTracker`]: the per-polygon state machine
//! - [`CutRecord`]: an immutable finished cut
//! - [`TrackerConfig`]: polyline densification settings
//! - [`SliceSink`]: rendering capability used to draw cuts

mod config;
mod record;
mod sink;
mod tracker;

pub use config::TrackerConfig;
pub use record::{CutEnd, CutRecord};
pub use sink::{CollectingSink, DrawCall, FnSink, Marker, SliceSink, Stroke};
pub use tracker::{Phase, SliceTracker};
