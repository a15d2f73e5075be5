//! Runtime state shared by the tick components
//!
//! All mutable indicator state lives in one [`IndicatorState`] owned by the
//! scheduler. Each field has a single writer: the component named after it.

pub mod events;

pub use events::Event;

use crate::counter::SessionCounter;
use crate::health::SensorHealth;
use crate::sampler::SampleCadence;
use crate::scan::ScanState;
use crate::sleep::SleepTimer;

/// Process-lifetime indicator state
#[derive(Debug, Clone)]
pub struct IndicatorState {
    /// Written by the gear scanner
    pub scan: ScanState,
    /// Written by the change counter
    pub counter: SessionCounter,
    /// Written by the sleep/wake timer
    pub sleep: SleepTimer,
    /// Written by the sampler
    pub cadence: SampleCadence,
    /// Written by the sampler
    pub temperature: SensorHealth,
    /// Gear currently drawn on the display
    pub displayed_gear: usize,
}

impl IndicatorState {
    /// Create the boot state
    pub fn new(sleep_delay_ticks: u32, sample_delay_ticks: u32, initial_gear: usize) -> Self {
        Self {
            scan: ScanState::new(),
            counter: SessionCounter::new(),
            sleep: SleepTimer::new(sleep_delay_ticks),
            cadence: SampleCadence::new(sample_delay_ticks),
            temperature: SensorHealth::new(),
            displayed_gear: initial_gear,
        }
    }
}
