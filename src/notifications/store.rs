// SPDX-License-Identifier: MPL-2.0
//! Authoritative in-memory state for active notifications and settings.
//!
//! The store exposes only structural mutations and carries no timers; expiry
//! scheduling belongs to the [`Notifier`](super::Notifier). Keeping it pure
//! makes every transition trivially testable.

use super::notification::{
    Expiry, Kind, Notification, NotificationId, NotificationPatch, Position, ToastOptions,
};
use crate::config::defaults::{
    DEFAULT_MAX_TOASTS, DEFAULT_TOAST_DURATION, MAX_MAX_TOASTS, MIN_DEFAULT_DURATION,
    MIN_MAX_TOASTS,
};
use crate::config::Config;
use std::time::Duration;

/// Ordered collection of active notifications, newest first, plus the
/// global settings new notifications inherit.
#[derive(Debug)]
pub struct ToastStore {
    items: Vec<Notification>,
    max_toasts: usize,
    default_duration: Duration,
    position: Position,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            max_toasts: DEFAULT_MAX_TOASTS,
            default_duration: DEFAULT_TOAST_DURATION,
            position: Position::default(),
        }
    }
}

impl ToastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds settings from persisted preferences, applying the usual clamps.
    pub fn from_config(config: &Config) -> Self {
        let mut store = Self::new();
        if let Some(position) = config.toast_position {
            store.set_position(position);
        }
        if let Some(max) = config.max_toasts {
            store.set_max_toasts(max);
        }
        if let Some(ms) = config.default_duration_ms {
            store.set_default_duration(Duration::from_millis(ms));
        }
        store
    }

    /// Creates a notification from `options`, filling omitted fields from
    /// the store settings, and inserts it at the head.
    ///
    /// The collection is truncated to `max_toasts` afterwards, dropping the
    /// oldest entries. Returns the generated id.
    pub fn add(&mut self, message: impl Into<String>, options: ToastOptions) -> NotificationId {
        let expiry = self.resolve_expiry(options.kind, options.expiry);
        let notification = Notification::new(message.into(), options, expiry, self.position);
        let id = notification.id();

        self.items.insert(0, notification);
        self.items.truncate(self.max_toasts);
        id
    }

    /// Removes the matching entry. Idempotent: removing an absent id is a
    /// no-op, which makes late expiry-timer firings harmless.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.items.iter().position(|n| n.id() == id) {
            self.items.remove(pos);
            true
        } else {
            false
        }
    }

    /// Merges `patch` into the matching entry; no-op if absent.
    ///
    /// `id` and `created_at` are not part of the patch type and therefore
    /// cannot change.
    pub fn update(&mut self, id: NotificationId, patch: NotificationPatch) -> bool {
        let default_duration = self.default_duration;
        let Some(entry) = self.items.iter_mut().find(|n| n.id() == id) else {
            return false;
        };

        if let Some(kind) = patch.kind {
            entry.kind = kind;
        }
        if let Some(title) = patch.title {
            entry.title = Some(title);
        }
        if let Some(message) = patch.message {
            entry.message = message;
        }
        if let Some(description) = patch.description {
            entry.description = Some(description);
        }
        if let Some(expiry) = patch.expiry {
            entry.expires_after =
                resolve_expiry_with(entry.kind, expiry, default_duration);
        }
        if let Some(dismissible) = patch.dismissible {
            entry.dismissible = dismissible;
        }
        if let Some(position) = patch.position {
            entry.position = position;
        }
        true
    }

    /// Empties the collection.
    pub fn clear_all(&mut self) {
        self.items.clear();
    }

    /// Anchor applied to notifications created from now on. Existing
    /// entries keep the position they were created with.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Clamps to `[1, 10]` and drops the oldest entries if the new cap is
    /// below the current count.
    pub fn set_max_toasts(&mut self, max: usize) {
        self.max_toasts = max.clamp(MIN_MAX_TOASTS, MAX_MAX_TOASTS);
        self.items.truncate(self.max_toasts);
    }

    /// Floors at one second.
    pub fn set_default_duration(&mut self, duration: Duration) {
        self.default_duration = duration.max(MIN_DEFAULT_DURATION);
    }

    /// Current notifications, newest first.
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| n.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_toasts(&self) -> usize {
        self.max_toasts
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    pub fn position(&self) -> Position {
        self.position
    }

    fn resolve_expiry(&self, kind: Kind, expiry: Expiry) -> Option<Duration> {
        resolve_expiry_with(kind, expiry, self.default_duration)
    }
}

fn resolve_expiry_with(kind: Kind, expiry: Expiry, default: Duration) -> Option<Duration> {
    match expiry {
        Expiry::Default => {
            if kind.auto_expires() {
                Some(default)
            } else {
                None
            }
        }
        Expiry::Never => None,
        Expiry::After(duration) => Some(duration),
    }
}
