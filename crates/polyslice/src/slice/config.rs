//! Tuning knobs for [`SliceTracker`](super::SliceTracker).

/// Controls how densely the in-progress polyline is sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Number of ticks that must pass between appended vertices.
    pub spawn_interval: u32,
    /// Minimum distance between appended vertices, as a fraction of the
    /// boundary's bounding-box diagonal.
    pub min_spacing_ratio: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 2,
            min_spacing_ratio: 0.01,
        }
    }
}

impl TrackerConfig {
    pub fn with_spawn_interval(mut self, ticks: u32) -> Self {
        self.spawn_interval = ticks.max(1);
        self
    }

    pub fn with_min_spacing_ratio(mut self, ratio: f32) -> Self {
        self.min_spacing_ratio = ratio.max(0.0);
        self
    }
}
