//! Monotonic time source

use crate::time::Instant;

/// Monotonic clock with at least millisecond resolution
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by the `embassy-time` driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
