//! Application status and change detection

/// Application status reported on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    pub status: u32,
    pub progress: u16,
    pub progress_max: u16,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            status: 0,
            progress: 0,
            progress_max: 1,
        }
    }
}

/// Current status and the last transmitted copy
#[derive(Debug, Clone, Default)]
pub(crate) struct StatusTracker {
    current: StatusSnapshot,
    sent: StatusSnapshot,
}

impl StatusTracker {
    pub fn current(&self) -> StatusSnapshot {
        self.current
    }

    pub fn update(&mut self, status: StatusSnapshot) {
        self.current = status;
    }

    pub fn is_changed(&self) -> bool {
        self.current != self.sent
    }

    pub fn mark_sent(&mut self) {
        self.sent = self.current;
    }
}
