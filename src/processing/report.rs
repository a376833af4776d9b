use super::event_rate::{compute_rate, window_hours};
use crate::codecs::movement::{EventKind, MovementEvent};
use crate::codecs::sensor::SensorSample;
use crate::config::ReportConfig;
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;

/// Event rate over one slice of the night.
#[derive(Debug, Clone, PartialEq)]
pub struct RateBin {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub plm_per_hour: f64,
}

/// Whole-recording summary of a movement log.
#[derive(Debug, Clone, PartialEq)]
pub struct NightlyReport {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub hours: f64,
    /// Events of each kind inside the window, bounds excluded.
    pub counts: HashMap<EventKind, usize>,
    pub plm_per_hour: f64,
    /// Rate reached the configured alert threshold.
    pub alert: bool,
    pub bins: Vec<RateBin>,
}

impl NightlyReport {
    pub fn build(
        events: &[MovementEvent],
        start: NaiveDateTime,
        end: NaiveDateTime,
        config: &ReportConfig,
    ) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        let mut counts = HashMap::new();
        for event in events
            .iter()
            .filter(|event| event.start_time > start && event.start_time < end)
        {
            *counts.entry(event.kind).or_insert(0) += 1;
        }

        let plm_per_hour = compute_rate(events, start, end);

        NightlyReport {
            start,
            end,
            hours: window_hours(start, end),
            counts,
            plm_per_hour,
            alert: plm_per_hour >= config.eph_alert_threshold,
            bins: rate_bins(events, start, end, config.bin_minutes),
        }
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}

/// Consecutive windows of `bin_minutes`, the last one cut short at `end`.
fn rate_bins(
    events: &[MovementEvent],
    start: NaiveDateTime,
    end: NaiveDateTime,
    bin_minutes: u32,
) -> Vec<RateBin> {
    if bin_minutes == 0 {
        return Vec::new();
    }
    let step = Duration::minutes(i64::from(bin_minutes));

    let mut bins = Vec::new();
    let mut bin_start = start;
    while bin_start < end {
        let bin_end = (bin_start + step).min(end);
        bins.push(RateBin {
            start: bin_start,
            end: bin_end,
            plm_per_hour: compute_rate(events, bin_start, bin_end),
        });
        bin_start = bin_end;
    }
    bins
}

/// Recording span of a series: first and last sample.
pub fn series_span(series: &[SensorSample]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    Some((series.first()?.timestamp, series.last()?.timestamp))
}

/// Span covered by a log, earliest to latest start time.
pub fn log_span(events: &[MovementEvent]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let first = events.iter().map(|e| e.start_time).min()?;
    let last = events.iter().map(|e| e.start_time).max()?;
    Some((first, last))
}
