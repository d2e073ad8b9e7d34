use core::cell::Cell;

use crate::touch::RawSample;

pub trait DelayOps {
    fn delay_ms(&self, millis: u32);
}

pub trait MonotonicClock {
    fn now_ms(&self) -> u64;
}

/// Source of one raw five-channel reading per poll.
pub trait TouchPadOps {
    type Error;

    fn read(&mut self) -> Result<RawSample, Self::Error>;
}

impl<T: DelayOps + ?Sized> DelayOps for &T {
    fn delay_ms(&self, millis: u32) {
        (**self).delay_ms(millis);
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Software time base that only advances when someone waits on it.
///
/// Every `delay_ms` call moves the clock forward by exactly the requested
/// amount, so timestamps equal `ticks * poll_interval` plus any dwell time.
/// Used where no hardware timer is available and for synthetic time in tests.
#[derive(Debug, Default)]
pub struct TickClock {
    now_ms: Cell<u64>,
}

impl TickClock {
    pub const fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
        }
    }

    pub const fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }
}

impl DelayOps for TickClock {
    fn delay_ms(&self, millis: u32) {
        self.now_ms
            .set(self.now_ms.get().saturating_add(millis as u64));
    }
}

impl MonotonicClock for TickClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

/// Pad that plays back a recorded sequence, then reports all channels released.
#[derive(Clone, Debug)]
pub struct ReplayPad<'a> {
    samples: &'a [RawSample],
    position: usize,
}

impl<'a> ReplayPad<'a> {
    pub const fn new(samples: &'a [RawSample]) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    pub fn consumed(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }
}

impl TouchPadOps for ReplayPad<'_> {
    type Error = core::convert::Infallible;

    fn read(&mut self) -> Result<RawSample, Self::Error> {
        let sample = self
            .samples
            .get(self.position)
            .copied()
            .unwrap_or(RawSample::RELEASED);
        self.position = self.position.saturating_add(1);
        Ok(sample)
    }
}

#[cfg(feature = "esp32-firmware")]
pub use self::hal::{BusyDelay, HalClock};

#[cfg(feature = "esp32-firmware")]
mod hal {
    use esp_hal::time::{Duration, Instant};

    use super::{DelayOps, MonotonicClock};

    #[derive(Clone, Copy, Default)]
    pub struct BusyDelay;

    impl BusyDelay {
        pub const fn new() -> Self {
            Self
        }
    }

    impl DelayOps for BusyDelay {
        fn delay_ms(&self, millis: u32) {
            let start = Instant::now();
            let duration = Duration::from_millis(millis as u64);
            while start.elapsed() < duration {}
        }
    }

    #[derive(Clone, Copy, Default)]
    pub struct HalClock;

    impl MonotonicClock for HalClock {
        fn now_ms(&self) -> u64 {
            Instant::now().duration_since_epoch().as_millis()
        }
    }
}
