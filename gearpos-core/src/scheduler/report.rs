//! Per-tick report

use heapless::Vec;

use crate::frame::FrameRequest;
use crate::state::Event;
use crate::traits::DisplayError;

/// Maximum events a single tick can produce
///
/// Gear change, wake, sleep, sample and sensor fault.
pub const MAX_TICK_EVENTS: usize = 5;

/// What happened during one scheduler tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// Tick number since boot (0 for the boot pass)
    pub tick: u32,
    /// Events in the order they were produced
    pub events: Vec<Event, MAX_TICK_EVENTS>,
    /// Frames drawn, in order
    pub frames: Vec<FrameRequest, 2>,
    /// First display command that failed; the work is retried next tick
    pub display_error: Option<DisplayError>,
}

impl TickReport {
    pub(crate) fn new(tick: u32) -> Self {
        Self {
            tick,
            events: Vec::new(),
            frames: Vec::new(),
            display_error: None,
        }
    }

    pub(crate) fn push_event(&mut self, event: Event) {
        // Capacity covers every event kind once
        let _ = self.events.push(event);
    }

    pub(crate) fn push_frame(&mut self, frame: FrameRequest) {
        let _ = self.frames.push(frame);
    }

    pub(crate) fn record_display_error(&mut self, err: DisplayError) {
        if self.display_error.is_none() {
            self.display_error = Some(err);
        }
    }

    /// Gear index and counter if a change was confirmed this tick
    pub fn gear_change(&self) -> Option<(usize, u32)> {
        self.events.iter().find_map(|event| match event {
            Event::GearChanged { index, changes } => Some((*index, *changes)),
            _ => None,
        })
    }

    /// Check if the display was put to sleep this tick
    pub fn slept(&self) -> bool {
        self.events.contains(&Event::SleepRequested)
    }

    /// Check if a temperature sample was taken this tick
    pub fn sampled(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, Event::TemperatureSampled(_)))
    }

    /// Check if nothing happened
    pub fn is_quiet(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TickReport {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "TickReport {{ tick: {}, events: {}, frames: {}, display_error: {} }}",
            self.tick,
            self.events.as_slice(),
            self.frames.as_slice(),
            self.display_error
        )
    }
}
