//! Gear-selector input bank

use embassy_rp::gpio::{Input, Pull};
use gearpos_hal::{InputBank, InputId};
use heapless::Vec;

use crate::pins::{PinBank, PinError};

/// Maximum inputs in one bank
pub const MAX_INPUTS: usize = 8;

/// Pulled-up digital inputs keyed by GPIO number
pub struct GpioBank<'d> {
    inputs: Vec<(InputId, Input<'d>), MAX_INPUTS>,
}

impl Default for GpioBank<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'d> GpioBank<'d> {
    /// Create an empty bank
    pub fn new() -> Self {
        Self { inputs: Vec::new() }
    }

    /// Add a configured input
    pub fn add(&mut self, id: InputId, input: Input<'d>) -> Result<(), PinError> {
        if self.contains(id) {
            return Err(PinError::AlreadyTaken);
        }
        self.inputs
            .push((id, input))
            .map_err(|_| PinError::BankFull)
    }

    /// Number of inputs in the bank
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Check if the bank has no inputs
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl GpioBank<'static> {
    /// Take each GPIO from the pin bank and configure it as a pulled-up input
    pub fn from_pins<It>(pins: &mut PinBank, numbers: It) -> Result<Self, PinError>
    where
        It: IntoIterator<Item = u8>,
    {
        let mut bank = Self::new();
        for number in numbers {
            let pin = pins.take(number)?;
            bank.add(InputId(number), Input::new(pin, Pull::Up))?;
        }
        Ok(bank)
    }
}

impl InputBank for GpioBank<'_> {
    fn is_high(&self, id: InputId) -> bool {
        self.inputs
            .iter()
            .find(|(input_id, _)| *input_id == id)
            // Unknown inputs read idle
            .map_or(true, |(_, input)| input.is_high())
    }

    fn contains(&self, id: InputId) -> bool {
        self.inputs.iter().any(|(input_id, _)| *input_id == id)
    }
}
