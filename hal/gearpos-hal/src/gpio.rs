//! GPIO input abstractions
//!
//! The indicator reads a fixed set of selector contacts. Each contact is
//! addressed by the identifier stored in the gear table, so the bank hides
//! how identifiers map onto physical pins.

/// Identifier of one digital input line (the GPIO number on real boards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputId(pub u8);

impl InputId {
    /// Raw identifier value
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A bank of digital inputs
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip. Reading an identifier the bank does not own
/// must report the idle level (high).
pub trait InputBank {
    /// Check if the input reads high (logic 1)
    fn is_high(&self, id: InputId) -> bool;

    /// Check if the input reads low (logic 0)
    fn is_low(&self, id: InputId) -> bool {
        !self.is_high(id)
    }

    /// Check if an idle-high, pulled-up input is asserted (pulled low)
    fn is_asserted(&self, id: InputId) -> bool {
        self.is_low(id)
    }

    /// Check whether the bank owns an input with this identifier
    fn contains(&self, id: InputId) -> bool;
}

impl<T: InputBank + ?Sized> InputBank for &T {
    fn is_high(&self, id: InputId) -> bool {
        (**self).is_high(id)
    }

    fn contains(&self, id: InputId) -> bool {
        (**self).contains(id)
    }
}
