//! Cooperative multi-rate scheduling state
//!
//! Each periodic task is a [`Gate`]: a period and the instant it last fired. The node
//! evaluates all gates once per cycle in a fixed order. A gate fires at most once per
//! cycle however late the cycle is, and restarts from the firing instant before its task
//! runs, so a slow task does not stretch the next period.

use crate::config::Config;
use crate::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    period: Duration,
    last_fired: Instant,
}

impl Gate {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            last_fired: now,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn last_fired(&self) -> Instant {
        self.last_fired
    }

    /// Fires and restarts the gate if its period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_fired) < self.period {
            return false;
        }
        self.restart(now);
        true
    }

    pub fn restart(&mut self, now: Instant) {
        self.last_fired = now;
    }

    /// Changes the period. The running interval keeps its start instant.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }
}

/// Gates of every periodic node task
#[derive(Debug, Clone)]
pub struct SchedulerState {
    /// Outbound buffer flush
    pub flush: Gate,
    /// Status change report, presence timeout and registration update
    pub maintenance: Gate,
    pub heartbeat: Gate,
    /// Device information announcement
    pub device_update: Gate,
}

impl SchedulerState {
    pub fn new(
        config: &Config,
        heartbeat_period: Duration,
        device_update_period: Duration,
        now: Instant,
    ) -> Self {
        Self {
            flush: Gate::new(config.flush_period, now),
            maintenance: Gate::new(config.maintenance_period, now),
            heartbeat: Gate::new(heartbeat_period, now),
            device_update: Gate::new(device_update_period, now),
        }
    }
}
