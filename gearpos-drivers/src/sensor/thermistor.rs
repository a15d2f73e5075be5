//! Analog temperature sensor on an ADC channel
//!
//! Linear Kelvin-output parts (LM335 class, 10 mV/K) read through the
//! on-chip ADC. The raw count is scaled to volts, volts to Kelvin, and
//! the Kelvin offset removed. Values are not clamped: a floating or
//! shorted input reads as an implausible temperature rather than a fault.

use gearpos_core::config::SensorKind;
use gearpos_core::traits::{SensorError, TemperatureSource};
use gearpos_hal::AdcReader;

/// Kelvin at 0 degrees Celsius
pub const KELVIN_OFFSET: f32 = 273.15;

/// Conversion constants for one board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermistorConfig {
    /// Voltage at full-scale ADC count
    pub full_scale_volts: f32,
    /// Full-scale ADC count (4095 for 12-bit)
    pub adc_max: u16,
    /// Sensor slope
    pub kelvin_per_volt: f32,
}

impl Default for ThermistorConfig {
    fn default() -> Self {
        Self {
            full_scale_volts: 3.3,
            adc_max: 4095,
            kelvin_per_volt: 100.0, // 10 mV/K
        }
    }
}

/// Analog thermistor source
pub struct Thermistor<ADC> {
    adc: ADC,
    config: ThermistorConfig,
}

impl<ADC> Thermistor<ADC> {
    /// Create a thermistor source
    pub fn new(adc: ADC, config: ThermistorConfig) -> Self {
        Self { adc, config }
    }

    /// Convert a raw ADC count to degrees Celsius
    pub fn raw_to_celsius(&self, raw: u16) -> f32 {
        let volts = raw as f32 * self.config.full_scale_volts / self.config.adc_max as f32;
        let kelvin = volts * self.config.kelvin_per_volt;
        kelvin - KELVIN_OFFSET
    }

    /// Conversion constants
    pub fn config(&self) -> &ThermistorConfig {
        &self.config
    }
}

impl<ADC: AdcReader> TemperatureSource for Thermistor<ADC> {
    fn kind(&self) -> SensorKind {
        SensorKind::AnalogThermistor
    }

    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let raw = self.adc.read().map_err(|_| SensorError::ConversionError)?;
        Ok(self.raw_to_celsius(raw))
    }
}

/// Dummy ADC for testing (returns a fixed value)
#[cfg(test)]
pub struct DummyAdc(pub Option<u16>);

#[cfg(test)]
impl AdcReader for DummyAdc {
    type Error = ();

    fn read(&mut self) -> Result<u16, ()> {
        self.0.ok_or(())
    }
}
