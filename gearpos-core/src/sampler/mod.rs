//! Temperature sampling
//!
//! The sampler runs on its own cadence, slower than the gear scan, and
//! feeds every result through the sensor health monitor.

pub mod cadence;

pub use cadence::SampleCadence;

use crate::config::SensorKind;
use crate::health::{SensorHealth, TemperatureStatus};
use crate::traits::{SensorError, TemperatureSource};

/// Result of one sampling pass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleOutcome {
    /// Status to display after this sample
    pub status: TemperatureStatus,
    /// Fault raised by this sample, if it failed
    pub fault: Option<SensorError>,
}

/// Temperature sampler bound to one source
pub struct TemperatureSampler<S> {
    source: S,
}

impl<S: TemperatureSource> TemperatureSampler<S> {
    /// Bind a temperature source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Sensor variant of the bound source
    pub fn kind(&self) -> SensorKind {
        self.source.kind()
    }

    /// Take one sample and update the health monitor
    pub fn sample(&mut self, health: &mut SensorHealth) -> SampleOutcome {
        let result = self.source.sample();
        let fault = result.err();
        let status = health.record(result);
        SampleOutcome { status, fault }
    }

    /// Get access to the underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get mutable access to the underlying source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
