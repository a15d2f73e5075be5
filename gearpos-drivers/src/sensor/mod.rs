//! Temperature sources

pub mod hts221;
pub mod lm75;
pub mod thermistor;

pub use hts221::{CalibrationProfile, Hts221};
pub use lm75::Lm75;
pub use thermistor::{Thermistor, ThermistorConfig};

use gearpos_core::traits::SensorError;

/// Turn a received byte count into a short-read fault
pub(crate) fn expect_len(expected: usize, received: usize) -> Result<(), SensorError> {
    if received < expected {
        return Err(SensorError::ShortRead {
            expected: expected as u8,
            received: received as u8,
        });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted I2C bus for driver tests

    use gearpos_hal::{I2cBus, I2cError};

    /// One scripted response
    #[derive(Clone, Copy)]
    pub enum Reply {
        /// Deliver these bytes (may be fewer than requested)
        Data(&'static [u8]),
        /// Fail the transaction
        Fail(I2cError),
    }

    /// Bus that answers reads from a script and records writes
    pub struct MockBus {
        pub replies: &'static [Reply],
        pub next: usize,
        pub writes: [[u8; 2]; 8],
        pub write_count: usize,
        pub last_register: Option<u8>,
    }

    impl MockBus {
        pub fn new(replies: &'static [Reply]) -> Self {
            Self {
                replies,
                next: 0,
                writes: [[0; 2]; 8],
                write_count: 0,
                last_register: None,
            }
        }

        fn reply(&mut self, buf: &mut [u8]) -> Result<usize, I2cError> {
            let reply = self.replies[self.next];
            self.next += 1;
            match reply {
                Reply::Data(data) => {
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    Ok(n)
                }
                Reply::Fail(err) => Err(err),
            }
        }
    }

    impl I2cBus for MockBus {
        type Error = I2cError;

        fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), I2cError> {
            let n = data.len().min(2);
            self.writes[self.write_count][..n].copy_from_slice(&data[..n]);
            self.write_count += 1;
            Ok(())
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<usize, I2cError> {
            self.reply(buf)
        }

        fn write_read(
            &mut self,
            _address: u8,
            write_data: &[u8],
            read_buf: &mut [u8],
        ) -> Result<usize, I2cError> {
            self.last_register = write_data.first().copied();
            self.reply(read_buf)
        }
    }
}
