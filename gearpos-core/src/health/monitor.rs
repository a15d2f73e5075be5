//! Temperature sensor health monitor
//!
//! Keeps the last valid reading across transient bus faults and decides
//! when the sensor must be reported unavailable.

use crate::traits::{SensorError, TemperatureReading};

/// Consecutive transient failures tolerated before the reading is dropped
pub const MAX_STALE_SAMPLES: u16 = 5;

/// Temperature as presented to the frame layer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureStatus {
    /// Latest sample succeeded
    Valid(TemperatureReading),
    /// Latest sample failed transiently; previous valid reading retained
    Stale {
        reading: TemperatureReading,
        fault: SensorError,
    },
    /// No usable reading (never sampled, or sensor fault)
    Unavailable(Option<SensorError>),
}

impl TemperatureStatus {
    /// Temperature to display, if any
    pub fn celsius(&self) -> Option<f32> {
        match self {
            TemperatureStatus::Valid(reading) => Some(reading.celsius),
            TemperatureStatus::Stale { reading, .. } => Some(reading.celsius),
            TemperatureStatus::Unavailable(_) => None,
        }
    }

    /// Check if the sensor is unavailable
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TemperatureStatus::Unavailable(_))
    }
}

/// Health monitor for the temperature source
#[derive(Debug, Clone, Default)]
pub struct SensorHealth {
    /// Most recent successful reading
    last_valid: Option<TemperatureReading>,
    /// Fault from the most recent sample, cleared on success
    last_fault: Option<SensorError>,
    /// Failures since the last success
    consecutive_failures: u16,
}

impl SensorHealth {
    /// Create a monitor with no readings
    pub const fn new() -> Self {
        Self {
            last_valid: None,
            last_fault: None,
            consecutive_failures: 0,
        }
    }

    /// Record a sampling result and return the resulting status
    pub fn record(&mut self, result: Result<TemperatureReading, SensorError>) -> TemperatureStatus {
        match result {
            Ok(reading) => {
                self.last_valid = Some(reading);
                self.last_fault = None;
                self.consecutive_failures = 0;
            }
            Err(fault) => {
                self.last_fault = Some(fault);
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            }
        }
        self.status()
    }

    /// Current status
    pub fn status(&self) -> TemperatureStatus {
        match (self.last_fault, self.last_valid) {
            (None, Some(reading)) => TemperatureStatus::Valid(reading),
            (None, None) => TemperatureStatus::Unavailable(None),
            (Some(fault), Some(reading))
                if fault.is_transient() && self.consecutive_failures < MAX_STALE_SAMPLES =>
            {
                TemperatureStatus::Stale { reading, fault }
            }
            (Some(fault), _) => TemperatureStatus::Unavailable(Some(fault)),
        }
    }

    /// Failures since the last successful sample
    pub fn consecutive_failures(&self) -> u16 {
        self.consecutive_failures
    }

    /// Most recent successful reading
    pub fn last_valid(&self) -> Option<TemperatureReading> {
        self.last_valid
    }
}
