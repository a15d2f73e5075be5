//! Analog input abstraction

/// Single ADC channel
///
/// Returns the raw conversion result. The resolution is a property of the
/// implementation; consumers are configured with the matching full-scale
/// count.
pub trait AdcReader {
    /// Error type for conversions
    type Error;

    /// Take one raw sample
    fn read(&mut self) -> Result<u16, Self::Error>;
}
