// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, its `Kind` and `Position`
//! attributes, and the payload/patch types the store operates on.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of a notification, governing styling and default expiry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    Success,
    Error,
    Warning,
    Info,
    /// An in-progress operation; never auto-expires.
    Loading,
    /// Neutral kind used when the caller doesn't specify one.
    #[default]
    Default,
}

impl Kind {
    /// Whether notifications of this kind may auto-expire.
    pub fn auto_expires(&self) -> bool {
        !matches!(self, Kind::Loading)
    }
}

/// Screen anchor a toast is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

/// Requested time-to-live for a new notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    /// Resolve from the store's default duration; `Loading` resolves to
    /// [`Expiry::Never`].
    #[default]
    Default,
    /// Persist until explicitly dismissed.
    Never,
    /// Expire after the given duration.
    After(Duration),
}

/// A notification held by the store.
///
/// `id` and `created_at` are fixed at creation time; everything else can be
/// patched through [`NotificationPatch`].
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    pub kind: Kind,
    pub title: Option<String>,
    pub message: String,
    pub description: Option<String>,
    /// `None` means "persist until explicitly dismissed".
    pub expires_after: Option<Duration>,
    /// When false the UI must not offer a close affordance; the entry is
    /// still removable programmatically.
    pub dismissible: bool,
    created_at: Instant,
    /// Anchor inherited from the store settings at creation time. A later
    /// global position change does not move existing notifications.
    pub position: Position,
}

impl Notification {
    pub(crate) fn new(
        message: String,
        options: ToastOptions,
        resolved_expiry: Option<Duration>,
        position: Position,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind: options.kind,
            title: options.title,
            message,
            description: options.description,
            expires_after: resolved_expiry,
            dismissible: options.dismissible,
            created_at: Instant::now(),
            position,
        }
    }

    /// Returns the notification's unique ID.
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns when this notification was created.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns the age of this notification.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

/// Caller-supplied attributes for a new notification. Fields left at their
/// defaults are filled from the store settings at creation time.
#[derive(Debug, Clone)]
pub struct ToastOptions {
    pub kind: Kind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub expiry: Expiry,
    pub dismissible: bool,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self::new(Kind::Default)
    }
}

impl ToastOptions {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            title: None,
            description: None,
            expiry: Expiry::Default,
            dismissible: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }
}

/// Partial update for an existing notification.
///
/// `id` and `created_at` are deliberately absent; they cannot be patched.
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub kind: Option<Kind>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub description: Option<String>,
    /// `Expiry::Default` re-resolves against the store's current default.
    pub expiry: Option<Expiry>,
    pub dismissible: Option<bool>,
    pub position: Option<Position>,
}
