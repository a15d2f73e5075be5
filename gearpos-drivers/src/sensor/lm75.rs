//! LM75-class two-byte register sensor
//!
//! Reading the temperature is a one-byte register select (0x00) followed
//! by a two-byte big-endian read. Two raw layouts are supported, see
//! [`RegisterFormat`].

use gearpos_core::config::{RegisterFormat, SensorKind};
use gearpos_core::traits::{SensorError, TemperatureSource};
use gearpos_hal::I2cBus;

use super::expect_len;

/// Default 7-bit address (all address pins high)
pub const DEFAULT_ADDRESS: u8 = 0x4F;

/// Temperature register
pub const REG_TEMP: u8 = 0x00;

/// Simple register sensor
pub struct Lm75<B> {
    bus: B,
    address: u8,
    format: RegisterFormat,
}

impl<B> Lm75<B> {
    /// Create a sensor at the given address
    pub fn new(bus: B, address: u8, format: RegisterFormat) -> Self {
        Self {
            bus,
            address,
            format,
        }
    }

    /// Register layout in use
    pub fn format(&self) -> RegisterFormat {
        self.format
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }
}

/// Convert the big-endian register value to degrees Celsius
pub fn decode(raw: [u8; 2], format: RegisterFormat) -> f32 {
    let value = i16::from_be_bytes(raw);
    match format {
        // Arithmetic shift keeps the sign of sub-zero readings
        RegisterFormat::HalfDegree => (value >> 7) as f32 / 2.0,
        RegisterFormat::Q8_8 => value as f32 / 256.0,
    }
}

impl<B> TemperatureSource for Lm75<B>
where
    B: I2cBus,
    B::Error: Into<SensorError>,
{
    fn kind(&self) -> SensorKind {
        SensorKind::RegisterSimple
    }

    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let mut buf = [0u8; 2];
        let received = self
            .bus
            .write_read(self.address, &[REG_TEMP], &mut buf)
            .map_err(Into::<SensorError>::into)?;
        expect_len(buf.len(), received)?;
        Ok(decode(buf, self.format))
    }
}
