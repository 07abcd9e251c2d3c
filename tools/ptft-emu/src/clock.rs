use core::time::Duration;

use embedded_hal::delay::DelayNs;

/// A delay that doesn't wait, only counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct Clock {
    elapsed_ns: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns)
    }
}

impl DelayNs for Clock {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}
