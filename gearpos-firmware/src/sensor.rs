//! Temperature source selected at build time

use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use gearpos_core::config::SensorKind;
use gearpos_core::traits::{SensorError, TemperatureSource};
use gearpos_drivers::sensor::{Hts221, Lm75, Thermistor};
use gearpos_hal_rp2040::{AdcInput, TimedI2c};

/// Sensor bus: async I2C1 bounded by the configured timeout
pub type SensorBus = TimedI2c<I2c<'static, I2C1, Async>>;

/// The one temperature source wired to this board
pub enum AnySensor {
    Thermistor(Thermistor<AdcInput<'static>>),
    Simple(Lm75<SensorBus>),
    Calibrated(Hts221<SensorBus>),
}

impl TemperatureSource for AnySensor {
    fn kind(&self) -> SensorKind {
        match self {
            AnySensor::Thermistor(s) => s.kind(),
            AnySensor::Simple(s) => s.kind(),
            AnySensor::Calibrated(s) => s.kind(),
        }
    }

    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        match self {
            AnySensor::Thermistor(s) => s.read_celsius(),
            AnySensor::Simple(s) => s.read_celsius(),
            AnySensor::Calibrated(s) => s.read_celsius(),
        }
    }
}
