//! Display sleep/wake timer
//!
//! Counts idle ticks and requests sleep exactly once per idle period.
//! Any confirmed gear change wakes the display and restarts the count.

/// Sleep/wake timer
#[derive(Debug, Clone)]
pub struct SleepTimer {
    /// Ticks since the last confirmed change
    elapsed_idle_ticks: u32,
    /// Idle ticks before sleep
    threshold: u32,
    /// Display has been put to sleep
    asleep: bool,
}

impl SleepTimer {
    /// Create an awake timer
    pub const fn new(threshold: u32) -> Self {
        Self {
            elapsed_idle_ticks: 0,
            threshold,
            asleep: false,
        }
    }

    /// Account for one tick
    ///
    /// Returns `true` on the tick where the idle count reaches the
    /// threshold. Further ticks return `false` until the next wake.
    pub fn tick(&mut self) -> bool {
        if self.asleep {
            return false;
        }

        if self.elapsed_idle_ticks < self.threshold {
            self.elapsed_idle_ticks += 1;
        }

        if self.elapsed_idle_ticks >= self.threshold {
            self.asleep = true;
            return true;
        }

        false
    }

    /// Wake on a confirmed gear change
    ///
    /// Always succeeds, even if already awake.
    pub fn wake(&mut self) {
        self.asleep = false;
        self.elapsed_idle_ticks = 0;
    }

    /// Ticks since the last change
    pub fn elapsed_idle_ticks(&self) -> u32 {
        self.elapsed_idle_ticks
    }

    /// Idle ticks before sleep
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Check if the display is asleep
    pub fn is_asleep(&self) -> bool {
        self.asleep
    }
}
