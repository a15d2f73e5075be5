//! Indicator configuration
//!
//! Selects the optional features, display orientation, timing constants and
//! the temperature source bound at startup.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::gears::{ConfigError, GearTable};

/// Default scheduler tick period (ms)
pub const DEFAULT_TICK_MS: u32 = 10;

/// Default idle ticks before the display sleeps (100 s at 10 ms)
pub const DEFAULT_SLEEP_DELAY_TICKS: u32 = 10_000;

/// Default ticks between temperature samples
pub const DEFAULT_SAMPLE_DELAY_TICKS: u32 = 100;

/// Gear shown before the first detection (neutral in the usual 1-N-2 layout)
pub const DEFAULT_INITIAL_GEAR: usize = 1;

/// Optional display features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Features {
    /// Show the number of gear changes this session
    pub session_counter: bool,
    /// Sample and show ambient temperature
    pub thermometer: bool,
    /// Show "can shift up/down" arrows
    pub arrows: bool,
    /// Invert the display colors
    pub inverted: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            session_counter: true,
            thermometer: true,
            arrows: true,
            inverted: false,
        }
    }
}

/// Display mounting orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// 32 pixels wide, 128 tall
    Portrait,
    /// 128 pixels wide, 32 tall
    #[default]
    Landscape,
}

/// Raw register layout of a simple two-byte temperature register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegisterFormat {
    /// 9-bit half-degree value in the top bits: `(raw >> 7) / 2`
    #[default]
    HalfDegree,
    /// Signed 8.8 fixed point: `raw / 256`
    Q8_8,
}

/// Temperature source bound at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorKind {
    /// Linear analog sensor on an ADC channel
    AnalogThermistor,
    /// Two-byte register sensor read over I2C
    #[default]
    RegisterSimple,
    /// Humidity/temperature chip with on-chip calibration pairs
    RegisterCalibrated,
}

/// Complete indicator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndicatorConfig {
    /// Optional features
    pub features: Features,
    /// Display orientation
    pub orientation: Orientation,
    /// Temperature source
    pub sensor: SensorKind,
    /// Register layout for [`SensorKind::RegisterSimple`]
    pub register_format: RegisterFormat,
    /// Idle ticks before the display is put to sleep
    pub sleep_delay_ticks: u32,
    /// Tick count a sample interval must exceed
    pub sample_delay_ticks: u32,
    /// Scheduler tick period (ms)
    pub tick_ms: u32,
    /// Gear index drawn at boot, before any input is confirmed
    pub initial_gear: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            features: Features::default(),
            orientation: Orientation::default(),
            sensor: SensorKind::default(),
            register_format: RegisterFormat::default(),
            sleep_delay_ticks: DEFAULT_SLEEP_DELAY_TICKS,
            sample_delay_ticks: DEFAULT_SAMPLE_DELAY_TICKS,
            tick_ms: DEFAULT_TICK_MS,
            initial_gear: DEFAULT_INITIAL_GEAR,
        }
    }
}

impl IndicatorConfig {
    /// Check the configuration against a validated gear table
    pub fn validate(&self, table: &GearTable<'_>) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.initial_gear >= table.len() {
            return Err(ConfigError::InitialGearOutOfRange {
                index: self.initial_gear,
                count: table.len(),
            });
        }
        Ok(())
    }

    /// Idle time before sleep in milliseconds
    pub fn sleep_delay_ms(&self) -> u32 {
        self.sleep_delay_ticks.saturating_mul(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GearDefinition;

    const GEARS: [GearDefinition; 3] = [
        GearDefinition::new("1", 2, 64),
        GearDefinition::new("N", 3, 60),
        GearDefinition::new("2", 4, 64),
    ];

    #[test]
    fn test_defaults_match_reference_timing() {
        let config = IndicatorConfig::default();
        assert_eq!(config.sleep_delay_ticks, 10_000);
        assert_eq!(config.sample_delay_ticks, 100);
        assert_eq!(config.sleep_delay_ms(), 100_000);
        assert_eq!(config.initial_gear, 1);
    }

    #[test]
    fn test_initial_gear_must_exist() {
        let table = GearTable::new(&GEARS).unwrap();
        let config = IndicatorConfig {
            initial_gear: 3,
            ..Default::default()
        };
        assert_eq!(
            config.validate(&table),
            Err(ConfigError::InitialGearOutOfRange { index: 3, count: 3 })
        );
        assert!(IndicatorConfig::default().validate(&table).is_ok());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let table = GearTable::new(&GEARS).unwrap();
        let config = IndicatorConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(&table), Err(ConfigError::ZeroTickPeriod));
    }
}
