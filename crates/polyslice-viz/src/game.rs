//! Per-frame game state: the polygon, the tracker and finished cuts fading out.

use macroquad::prelude::*;
use polyslice::generate::{ShapeParams, radius_for_viewport, random_polygon};
use polyslice::{Boundary, CutRecord, Point, SliceError, SliceTracker, TrackerConfig, split_boundary};
use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use tracing::{debug, info};

use crate::{MacroquadSink, SHAPE_FILL, draw_boundary, faded, piece_color};

/// Number of frames a finished cut stays on screen.
pub const FADE_FRAMES: u32 = 10;

/// A finished cut being faded out, with the pieces it split the polygon into.
#[derive(Debug, Clone)]
pub struct FadingCut {
    record: CutRecord,
    pieces: Option<(Boundary, Boundary)>,
    age: u32,
}

impl FadingCut {
    pub fn new(record: CutRecord, pieces: Option<(Boundary, Boundary)>) -> Self {
        Self {
            record,
            pieces,
            age: 1,
        }
    }

    pub fn record(&self) -> &CutRecord {
        &self.record
    }

    pub fn pieces(&self) -> Option<&(Boundary, Boundary)> {
        self.pieces.as_ref()
    }

    /// Opacity for the current frame, from nearly opaque down to zero.
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age as f32 / FADE_FRAMES as f32).max(0.0)
    }

    /// Advances one frame. Returns true once the cut should be dropped.
    pub fn tick(&mut self) -> bool {
        if self.age >= FADE_FRAMES {
            return true;
        }
        self.age += 1;
        false
    }

    pub fn draw(&self) {
        let alpha = self.alpha();
        if let Some((first, second)) = &self.pieces {
            draw_boundary(first, faded(piece_color(first), alpha), faded(WHITE, alpha));
            draw_boundary(second, faded(piece_color(second), alpha), faded(WHITE, alpha));
        }
        self.record.draw(&mut MacroquadSink::default().with_alpha(alpha));
    }
}

/// The polygon being sliced and everything needed to drive it from the mouse.
pub struct Game {
    tracker: SliceTracker,
    rng: StdRng,
    shape: ShapeParams,
    fading: Vec<FadingCut>,
    last_mouse: Option<Point>,
    cuts: u32,
}

impl Game {
    /// Creates a game with a fresh polygon centered in a `width` x `height`
    /// viewport.
    pub fn new(
        seed: Option<u64>,
        config: TrackerConfig,
        width: f32,
        height: f32,
    ) -> Result<Self, SliceError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let shape = ShapeParams::default();
        let boundary = generate(&mut rng, &shape, width, height)?;

        Ok(Self {
            tracker: SliceTracker::with_config(boundary, config),
            rng,
            shape,
            fading: Vec::new(),
            last_mouse: None,
            cuts: 0,
        })
    }

    pub fn tracker(&self) -> &SliceTracker {
        &self.tracker
    }

    pub fn fading(&self) -> &[FadingCut] {
        &self.fading
    }

    /// Number of cuts finished since the game started.
    pub fn cuts(&self) -> u32 {
        self.cuts
    }

    /// Replaces the polygon, aborting any cut in progress.
    pub fn regenerate(&mut self, width: f32, height: f32) -> Result<(), SliceError> {
        let boundary = generate(&mut self.rng, &self.shape, width, height)?;
        info!(sides = boundary.len(), "new polygon");
        self.tracker.replace_boundary(boundary);
        self.fading.clear();
        self.last_mouse = None;
        Ok(())
    }

    /// Feeds one mouse sample. The first sample after a (re)start only
    /// primes the previous position.
    pub fn frame(&mut self, mouse: Point) {
        self.fading.retain_mut(|cut| !cut.tick());

        let Some(prev) = self.last_mouse.replace(mouse) else {
            return;
        };

        if let Some(record) = self.tracker.update(prev, mouse) {
            self.cuts += 1;
            let pieces = match split_boundary(self.tracker.boundary(), &record) {
                Ok(pieces) => Some(pieces),
                Err(err) => {
                    debug!(%err, "cut not split");
                    None
                }
            };
            info!(
                cuts = self.cuts,
                segments = record.polyline().len(),
                length = record.length(),
                "slice"
            );
            self.fading.push(FadingCut::new(record, pieces));
        }
    }

    pub fn draw(&self) {
        draw_boundary(self.tracker.boundary(), SHAPE_FILL, WHITE);
        for cut in &self.fading {
            cut.draw();
        }
        self.tracker.draw_in_progress(&mut MacroquadSink::default());
    }
}

fn generate(
    rng: &mut StdRng,
    shape: &ShapeParams,
    width: f32,
    height: f32,
) -> Result<Boundary, SliceError> {
    let center = Point::new(width / 2.0, height / 2.0);
    random_polygon(rng, center, radius_for_viewport(height), shape)
}
