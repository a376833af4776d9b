use crate::codecs::sensor::SensorSample;
use chrono::NaiveDateTime;

pub const DEFAULT_SCREEN_CAPACITY: usize = 10;

/// Visible index range of the series for one scrub position.
///
/// `upper_index` is not clamped to the series: with a capacity larger than
/// the data it points past the last sample. Use [`Viewport::visible`] and
/// [`Viewport::bounds`], which clamp, to read samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub lower_index: usize,
    pub upper_index: usize,
    pub capacity: usize,
}

/// Maps a scrub position over `total` samples to a window of `capacity`.
///
/// The position is rounded half-up to the nearest index. Never panics,
/// whatever the inputs.
pub fn compute_viewport(total: usize, capacity: usize, position: f64) -> Viewport {
    // i128 holds every usize, so no input wraps.
    let up = round_half_up(position);
    let cap = capacity as i128;
    let last_start = (total as i128 - 1 - cap).max(0);

    let low = up.saturating_sub(cap).max(0).min(last_start);
    let up = up.max(cap).min(usize::MAX as i128);

    Viewport {
        lower_index: low as usize,
        upper_index: up as usize,
        capacity,
    }
}

/// Rounds ties towards positive infinity. NaN rounds to 0, infinities saturate.
fn round_half_up(position: f64) -> i128 {
    let floor = position.floor();
    // exact for every finite double
    let rounded = if position - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded as i128
}

impl Viewport {
    /// Samples between the bounds, both included, clamped to the series.
    pub fn visible<'a>(&self, series: &'a [SensorSample]) -> &'a [SensorSample] {
        if series.is_empty() {
            return &[];
        }
        let last = series.len() - 1;
        let low = self.lower_index.min(last);
        let up = self.upper_index.min(last);
        &series[low.min(up)..=up]
    }

    /// Timestamps of the samples at the lower and upper index.
    ///
    /// An upper index past the end resolves to the last sample.
    pub fn bounds(&self, series: &[SensorSample]) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let visible = self.visible(series);
        Some((visible.first()?.timestamp, visible.last()?.timestamp))
    }
}

// VIEWPORT CONTROLLER ---------------------------------------------------------

/// Holds the screen capacity and recomputes the viewport on every scrub.
#[derive(Debug, Clone)]
pub struct ViewportController {
    capacity: usize,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(DEFAULT_SCREEN_CAPACITY)
    }
}

impl ViewportController {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn scrub(&self, total: usize, position: f64) -> Viewport {
        compute_viewport(total, self.capacity, position)
    }

    /// Largest meaningful scrub position for a series, like the slider maximum.
    pub fn max_position(total: usize) -> f64 {
        total.saturating_sub(1) as f64
    }
}
