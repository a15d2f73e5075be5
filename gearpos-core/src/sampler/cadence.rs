//! Sample cadence counter

/// Decides on which ticks a temperature sample is taken
///
/// The count is compared before it is incremented, so with a delay of
/// `d` a sample is due every `d + 2` ticks.
#[derive(Debug, Clone)]
pub struct SampleCadence {
    elapsed: u32,
    delay: u32,
}

impl SampleCadence {
    /// Create a cadence with the given delay
    pub const fn new(delay: u32) -> Self {
        Self { elapsed: 0, delay }
    }

    /// Account for one tick; returns `true` when a sample is due
    pub fn tick(&mut self) -> bool {
        let due = self.elapsed > self.delay;
        if due {
            self.elapsed = 0;
        } else {
            self.elapsed += 1;
        }
        due
    }

    /// Ticks accumulated since the last sample
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Ticks between two samples
    pub fn period(&self) -> u32 {
        self.delay.saturating_add(2)
    }
}
