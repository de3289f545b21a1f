//! Bus liveness tracking
//!
//! The bus is considered online while remote heartbeats keep arriving. Any heartbeat brings
//! the bus online; a heartbeat gap longer than the protocol threshold takes it offline.

use crate::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Presence {
    online: bool,
    last_heartbeat: Instant,
    last_rx: Option<Instant>,
    last_tx: Option<Instant>,
}

impl Presence {
    /// Creates an offline tracker. The heartbeat timeout counts from `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            online: false,
            last_heartbeat: now,
            last_rx: None,
            last_tx: None,
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn go_online(&mut self) {
        if !self.online {
            info!("Bus online");
        }
        self.online = true;
    }

    pub fn go_offline(&mut self) {
        if self.online {
            info!("Bus offline");
        }
        self.online = false;
    }

    /// Registers a remote heartbeat. A heartbeat also counts as bus traffic.
    pub fn receive_heartbeat(&mut self, now: Instant) {
        if !self.online {
            self.go_online();
        }
        self.last_heartbeat = now;
        self.last_rx = Some(now);
    }

    pub fn record_traffic(&mut self, now: Instant) {
        self.last_rx = Some(now);
    }

    pub fn record_transmit(&mut self, now: Instant) {
        self.last_tx = Some(now);
    }

    /// Takes the bus offline if no heartbeat arrived for longer than `threshold`.
    ///
    /// Returns `true` on the online to offline transition only.
    pub fn check_timeout(&mut self, now: Instant, threshold: Duration) -> bool {
        if !self.online {
            return false;
        }
        if now.saturating_duration_since(self.last_heartbeat) > threshold {
            self.go_offline();
            return true;
        }
        false
    }

    /// Whether any accepted traffic arrived within `threshold`.
    pub fn is_active(&self, now: Instant, threshold: Duration) -> bool {
        self.last_rx
            .is_some_and(|last| now.saturating_duration_since(last) <= threshold)
    }

    pub fn last_heartbeat(&self) -> Instant {
        self.last_heartbeat
    }

    pub fn last_rx(&self) -> Option<Instant> {
        self.last_rx
    }

    pub fn last_tx(&self) -> Option<Instant> {
        self.last_tx
    }
}
