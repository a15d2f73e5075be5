//! Sensor I2C bus with a transaction timeout
//!
//! The tick loop is synchronous, but a sensor that holds the bus must not
//! stall it. Each transfer runs on the async driver under
//! [`embassy_time::with_timeout`] and is driven to completion in place.

use embassy_futures::block_on;
use embassy_time::{with_timeout, Duration};
use embedded_hal::i2c::{Error as _, ErrorKind};
use embedded_hal_async::i2c::I2c;
use gearpos_hal::{I2cBus, I2cConfig, I2cError};

/// Map an embedded-hal error kind onto the shared I2C error
pub fn map_error_kind(kind: ErrorKind) -> I2cError {
    match kind {
        ErrorKind::NoAcknowledge(_) => I2cError::Nack,
        ErrorKind::ArbitrationLoss => I2cError::ArbitrationLoss,
        _ => I2cError::Other,
    }
}

/// Async I2C controller with a bounded transaction time
///
/// embedded-hal transfers either fill the whole buffer or fail, so a
/// successful read always reports the full length.
pub struct TimedI2c<T> {
    inner: T,
    timeout: Duration,
}

impl<T: I2c> TimedI2c<T> {
    /// Wrap a controller
    pub fn new(inner: T, config: &I2cConfig) -> Self {
        Self {
            inner,
            timeout: Duration::from_millis(config.timeout_ms as u64),
        }
    }
}

impl<T: I2c> I2cBus for TimedI2c<T> {
    type Error = I2cError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
        block_on(with_timeout(self.timeout, self.inner.write(address, data)))
            .map_err(|_| I2cError::Timeout)?
            .map_err(|e| map_error_kind(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, I2cError> {
        block_on(with_timeout(self.timeout, self.inner.read(address, buf)))
            .map_err(|_| I2cError::Timeout)?
            .map_err(|e| map_error_kind(e.kind()))?;
        Ok(buf.len())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<usize, I2cError> {
        block_on(with_timeout(
            self.timeout,
            self.inner.write_read(address, write_data, read_buf),
        ))
        .map_err(|_| I2cError::Timeout)?
        .map_err(|e| map_error_kind(e.kind()))?;
        Ok(read_buf.len())
    }
}
