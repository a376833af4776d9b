use crate::codecs::movement::MovementEvent;
use crate::codecs::sensor::SensorSample;
use crate::codecs::Parsed;
use crate::error::FormatError;
use crate::processing::event_rate::live_rate;
use crate::processing::viewport::{Viewport, ViewportController};

/// Series and movement log currently held by the presentation layer.
///
/// New data is swapped in whole. A parse that stopped on a misformatted
/// line leaves the previous sequence in place.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    series: Vec<SensorSample>,
    events: Vec<MovementEvent>,
    controller: ViewportController,
}

impl Recording {
    pub fn new(controller: ViewportController) -> Self {
        Self {
            series: Vec::new(),
            events: Vec::new(),
            controller,
        }
    }

    pub fn series(&self) -> &[SensorSample] {
        &self.series
    }

    pub fn events(&self) -> &[MovementEvent] {
        &self.events
    }

    pub fn controller_mut(&mut self) -> &mut ViewportController {
        &mut self.controller
    }

    pub fn replace_series(&mut self, parsed: Parsed<SensorSample>) -> Result<(), FormatError> {
        self.series = parsed.into_complete()?;
        Ok(())
    }

    pub fn replace_events(&mut self, parsed: Parsed<MovementEvent>) -> Result<(), FormatError> {
        self.events = parsed.into_complete()?;
        Ok(())
    }

    pub fn scrub(&self, position: f64) -> Viewport {
        self.controller.scrub(self.series.len(), position)
    }

    /// Samples on screen for `position`.
    pub fn visible(&self, position: f64) -> &[SensorSample] {
        self.scrub(position).visible(&self.series)
    }

    /// PLM events per hour over the span on screen.
    pub fn visible_rate(&self, position: f64) -> f64 {
        live_rate(&self.events, &self.series, &self.scrub(position))
    }
}
