//! HTS221-class humidity/temperature sensor
//!
//! The part stores two factory calibration points. Each holds a known
//! temperature and the raw output code measured at it; every reading is a
//! linear interpolation between the two.
//!
//! # Start-up
//!
//! 1. WHO_AM_I must read 0xBC
//! 2. CTRL_REG1 is set to active mode, block data update, 1 Hz
//! 3. The 16-byte calibration block is read once and cached
//!
//! Each step that fails is repeated on the next sample, so a part that
//! comes up late still starts measuring.
//!
//! Register reads set bit 7 of the sub-address to auto-increment.

use gearpos_core::config::SensorKind;
use gearpos_core::traits::{SensorError, TemperatureSource};
use gearpos_hal::I2cBus;

use super::expect_len;

/// Fixed 7-bit address
pub const DEFAULT_ADDRESS: u8 = 0x5F;

/// Register addresses
pub mod reg {
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0F;
    /// Power and output data rate
    pub const CTRL_REG1: u8 = 0x20;
    /// Temperature output, low byte
    pub const TEMP_OUT_L: u8 = 0x2A;
    /// First byte of the calibration block
    pub const CALIB_0: u8 = 0x30;
}

/// Auto-increment flag for multi-byte reads
const AUTO_INCREMENT: u8 = 0x80;

/// Expected WHO_AM_I value
pub const DEVICE_ID: u8 = 0xBC;

/// CTRL_REG1: PD (active) | BDU | ODR = 1 Hz
pub const CTRL_REG1_ACTIVE: u8 = 0x85;

/// Length of the calibration block
pub const CALIBRATION_LEN: usize = 16;

/// Two calibration reference pairs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationProfile {
    /// Temperature of the first point
    pub t0_celsius: f32,
    /// Temperature of the second point
    pub t1_celsius: f32,
    /// Raw output at the first point
    pub raw0: i16,
    /// Raw output at the second point
    pub raw1: i16,
}

impl CalibrationProfile {
    /// Decode the calibration block starting at 0x30
    ///
    /// Each reference temperature is a 10-bit value in eighths of a degree:
    /// the low byte has its own register, the two high bits share 0x35.
    pub fn decode(block: &[u8; CALIBRATION_LEN]) -> Result<Self, SensorError> {
        let msb = block[5];
        let t0_x8 = (((msb & 0x03) as u16) << 8) | block[2] as u16;
        let t1_x8 = ((((msb & 0x0C) >> 2) as u16) << 8) | block[3] as u16;

        let raw0 = i16::from_le_bytes([block[12], block[13]]);
        let raw1 = i16::from_le_bytes([block[14], block[15]]);

        if raw0 == raw1 {
            return Err(SensorError::CalibrationDegenerate);
        }

        Ok(Self {
            t0_celsius: t0_x8 as f32 / 8.0,
            t1_celsius: t1_x8 as f32 / 8.0,
            raw0,
            raw1,
        })
    }

    /// Interpolate a raw output code
    pub fn interpolate(&self, raw: i16) -> f32 {
        let span = self.t1_celsius - self.t0_celsius;
        let offset = (raw as i32 - self.raw0 as i32) as f32;
        let range = (self.raw1 as i32 - self.raw0 as i32) as f32;
        self.t0_celsius + offset * span / range
    }
}

/// Calibrated register sensor
pub struct Hts221<B> {
    bus: B,
    address: u8,
    /// Identity checked and conversions running
    initialized: bool,
    /// Set after the first successful calibration read
    calibration: Option<CalibrationProfile>,
}

impl<B> Hts221<B>
where
    B: I2cBus,
    B::Error: Into<SensorError>,
{
    /// Create a sensor; nothing is sent until [`init`](Self::init) or
    /// the first sample
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            initialized: false,
            calibration: None,
        }
    }

    /// Check the device identity and power it up
    pub fn init(&mut self) -> Result<(), SensorError> {
        let mut id = [0u8; 1];
        let received = self
            .bus
            .write_read(self.address, &[reg::WHO_AM_I], &mut id)
            .map_err(Into::<SensorError>::into)?;
        expect_len(1, received)?;
        if id[0] != DEVICE_ID {
            return Err(SensorError::NotResponding);
        }

        self.bus
            .write(self.address, &[reg::CTRL_REG1, CTRL_REG1_ACTIVE])
            .map_err(Into::<SensorError>::into)?;
        self.initialized = true;
        Ok(())
    }

    /// Check if [`init`](Self::init) has succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Cached calibration, if read
    pub fn calibration(&self) -> Option<&CalibrationProfile> {
        self.calibration.as_ref()
    }

    fn profile(&mut self) -> Result<CalibrationProfile, SensorError> {
        if let Some(profile) = self.calibration {
            return Ok(profile);
        }

        let mut block = [0u8; CALIBRATION_LEN];
        let received = self
            .bus
            .write_read(self.address, &[reg::CALIB_0 | AUTO_INCREMENT], &mut block)
            .map_err(Into::<SensorError>::into)?;
        expect_len(CALIBRATION_LEN, received)?;

        let profile = CalibrationProfile::decode(&block)?;
        self.calibration = Some(profile);
        Ok(profile)
    }

    fn read_raw(&mut self) -> Result<i16, SensorError> {
        let mut buf = [0u8; 2];
        let received = self
            .bus
            .write_read(self.address, &[reg::TEMP_OUT_L | AUTO_INCREMENT], &mut buf)
            .map_err(Into::<SensorError>::into)?;
        expect_len(buf.len(), received)?;
        Ok(i16::from_le_bytes(buf))
    }
}

impl<B> TemperatureSource for Hts221<B>
where
    B: I2cBus,
    B::Error: Into<SensorError>,
{
    fn kind(&self) -> SensorKind {
        SensorKind::RegisterCalibrated
    }

    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        if !self.initialized {
            self.init()?;
        }
        let profile = self.profile()?;
        let raw = self.read_raw()?;
        Ok(profile.interpolate(raw))
    }
}
