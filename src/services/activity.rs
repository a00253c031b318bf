//! Bounded log of recent system events shown in the health panel.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const ACTIVITY_CAPACITY: usize = 8;

#[derive(Clone)]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl ActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(ACTIVITY_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))), capacity: capacity.max(1) }
    }

    /// Append a message, evicting the oldest once full. Consecutive
    /// duplicates collapse into one entry so a failing poller cannot flood
    /// the panel.
    pub fn record(&self, message: impl Into<String>) {
        let message = message.into();
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if entries.back() == Some(&message) {
            return;
        }
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(message);
    }

    /// Newest first.
    #[must_use]
    pub fn recent(&self) -> Vec<String> {
        let entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.iter().rev().cloned().collect()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}
