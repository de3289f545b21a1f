//! Node configuration

use crate::time::Duration;

/// Per-node scheduling limits
///
/// Protocol-defined periods (heartbeat, device update, heartbeat timeout) come from the
/// [`Protocol`](crate::protocol::Protocol) implementation instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Config {
    /// Frames taken from the bus per cycle
    pub rx_batch_limit: usize,
    /// Staged messages sent per flush
    pub tx_batch_limit: usize,
    /// Period of the outbound flush
    pub flush_period: Duration,
    /// Period of status, presence and registration maintenance
    pub maintenance_period: Duration,
    /// Window in which received traffic marks the bus as active
    pub activity_threshold: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rx_batch_limit: 8,
            tx_batch_limit: 10,
            flush_period: Duration::from_millis(5),
            maintenance_period: Duration::from_millis(10),
            activity_threshold: Duration::from_millis(50),
        }
    }
}
