//! Temperature source trait

use gearpos_hal::I2cError;

use crate::config::SensorKind;

/// Errors that can occur while sampling a temperature source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed (NACK, arbitration loss, ...)
    Bus,
    /// Device delivered fewer bytes than requested
    ShortRead { expected: u8, received: u8 },
    /// Bus transaction did not complete in time
    Timeout,
    /// Both calibration points report the same raw code
    CalibrationDegenerate,
    /// Device identity check failed
    NotResponding,
    /// ADC conversion error
    ConversionError,
}

impl SensorError {
    /// Whether the fault is expected to clear on its own
    ///
    /// Transient faults keep the previous valid reading on screen; the
    /// others mark the sensor unavailable.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SensorError::Bus
                | SensorError::ShortRead { .. }
                | SensorError::Timeout
                | SensorError::ConversionError
        )
    }
}

impl From<I2cError> for SensorError {
    fn from(err: I2cError) -> Self {
        match err {
            I2cError::Timeout => SensorError::Timeout,
            I2cError::Nack | I2cError::ArbitrationLoss | I2cError::Other => SensorError::Bus,
        }
    }
}

/// A calibrated temperature sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    /// Degrees Celsius
    pub celsius: f32,
    /// Sensor variant that produced the value
    pub source: SensorKind,
}

/// Trait for temperature sources
///
/// Implementations handle one sensor variant each: the conversion from
/// raw register or ADC values to degrees Celsius, plus any calibration the
/// part needs.
///
/// Takes `&mut self` because bus and ADC reads require mutable access,
/// and calibrated parts cache their calibration on first use.
pub trait TemperatureSource {
    /// Sensor variant implemented by this source
    fn kind(&self) -> SensorKind;

    /// Read the current temperature in degrees Celsius
    fn read_celsius(&mut self) -> Result<f32, SensorError>;

    /// Read the current temperature tagged with its source
    fn sample(&mut self) -> Result<TemperatureReading, SensorError> {
        let celsius = self.read_celsius()?;
        Ok(TemperatureReading {
            celsius,
            source: self.kind(),
        })
    }
}

impl<T: TemperatureSource + ?Sized> TemperatureSource for &mut T {
    fn kind(&self) -> SensorKind {
        (**self).kind()
    }

    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        (**self).read_celsius()
    }
}
