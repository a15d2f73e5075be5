//! Events produced during a tick

use crate::health::TemperatureStatus;
use crate::traits::SensorError;

/// Events emitted by the tick components
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A gear input was confirmed active
    GearChanged {
        /// Table index of the new gear
        index: usize,
        /// Session change count after this event
        changes: u32,
    },
    /// Display should wake (emitted on every confirmed change)
    WakeRequested,
    /// Idle threshold reached; display should sleep
    SleepRequested,
    /// A temperature sample was taken
    TemperatureSampled(TemperatureStatus),
    /// A temperature sample failed
    SensorFault(SensorError),
}

impl Event {
    /// Check if this event forces a full redraw
    pub fn needs_full_frame(&self) -> bool {
        matches!(self, Event::GearChanged { .. })
    }

    /// Check if this event is about the display power state
    pub fn is_power_event(&self) -> bool {
        matches!(self, Event::WakeRequested | Event::SleepRequested)
    }

    /// Check if this event comes from the temperature sampler
    pub fn is_sensor_event(&self) -> bool {
        matches!(self, Event::TemperatureSampled(_) | Event::SensorFault(_))
    }
}
