//! ADC channel for the analog thermistor
//!
//! RP2040 has a single 12-bit ADC with 4 external channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29

use embassy_rp::adc::{Adc, Blocking, Channel, Error};
use gearpos_hal::AdcReader;

/// Full-scale count of the 12-bit converter
pub const ADC_MAX: u16 = 4095;

/// One ADC channel with exclusive use of the converter
pub struct AdcInput<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> AdcInput<'d> {
    /// Bind a channel to the converter
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AdcReader for AdcInput<'_> {
    type Error = Error;

    fn read(&mut self) -> Result<u16, Error> {
        self.adc.blocking_read(&mut self.channel)
    }
}
