//! Runtime pin selection for the gear inputs
//!
//! Gear pins come from the build-time indicator configuration, so the
//! firmware hands every selector-capable GPIO to a [`PinBank`] and takes
//! them back by number.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;

/// GPIOs available for gear contacts (GPIO0 to GPIO15)
pub const GEAR_PIN_COUNT: usize = 16;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number outside the gear bank
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// More inputs than the bank holds
    BankFull,
}

/// Pin bank that holds the gear-capable GPIOs and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GEAR_PIN_COUNT],
}

impl PinBank {
    /// Create a bank from GPIO0..GPIO15, in order
    pub fn new(pins: [Peri<'static, AnyPin>; GEAR_PIN_COUNT]) -> Self {
        Self {
            pins: pins.map(Some),
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin)?
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        matches!(self.pins.get(pin_num as usize), Some(Some(_)))
    }
}
