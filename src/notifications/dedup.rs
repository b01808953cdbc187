// SPDX-License-Identifier: MPL-2.0
//! Time-windowed suppression of repeated identical error notifications.
//!
//! A retried or polling request that keeps failing must not flood the screen
//! with copies of the same toast. The gate remembers only the single most
//! recently approved (message, origin) pair, so memory stays O(1) and only
//! consecutive identical failures are suppressed.

use crate::config::defaults::DEDUP_WINDOW;
use std::time::Instant;

#[derive(Debug, Clone)]
struct DedupRecord {
    message: String,
    origin: String,
    shown_at: Instant,
}

/// Single-slot deduplication gate for the error interceptor path.
#[derive(Debug, Default)]
pub struct DedupGate {
    last: Option<DedupRecord>,
}

impl DedupGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether a notification with this `message` from this
    /// `origin` should be shown now.
    ///
    /// Approvals overwrite the remembered record; suppressed calls leave it
    /// untouched, so the window is measured from the last *shown*
    /// notification, not the last attempt.
    pub fn should_show(&mut self, message: &str, origin: &str) -> bool {
        self.should_show_at(message, origin, Instant::now())
    }

    fn should_show_at(&mut self, message: &str, origin: &str, now: Instant) -> bool {
        if let Some(record) = &self.last {
            if record.message == message
                && record.origin == origin
                && now.duration_since(record.shown_at) < DEDUP_WINDOW
            {
                return false;
            }
        }

        self.last = Some(DedupRecord {
            message: message.to_string(),
            origin: origin.to_string(),
            shown_at: now,
        });
        true
    }
}
