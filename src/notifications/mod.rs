// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! This module provides a non-intrusive notification system following
//! toast/snackbar UX patterns. Notifications appear temporarily to inform
//! users about actions (save success, errors, etc.) without blocking
//! interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with kinds, positions, and expiry
//! - [`store`] - `ToastStore` holding the ordered collection and settings
//! - [`dedup`] - `DedupGate` suppressing rapid identical error toasts
//! - [`notifier`] - `Notifier` façade with expiry timers and promise tracking
//!
//! # Usage
//!
//! ```ignore
//! use toast_relay::notifications::Notifier;
//!
//! let notifier = Notifier::new();
//! notifier.success("Image saved successfully");
//!
//! // A rendering surface subscribes to snapshots and calls
//! // notifier.dismiss(id) when the user closes a toast.
//! let mut toasts = notifier.subscribe();
//! ```
//!
//! # Design Considerations
//!
//! - Default duration 4s, floored at 1s when reconfigured; loading toasts persist
//! - Max held toasts: 5 by default, clamped to [1, 10]
//! - Position: bottom-right corner by default, pinned per toast at creation
//! - Store mutations are synchronous; only expiry timers are scheduled work

pub mod dedup;
pub mod notification;
pub mod notifier;
pub mod store;

pub use dedup::DedupGate;
pub use notification::{
    Expiry, Kind, Notification, NotificationId, NotificationPatch, Position, ToastOptions,
};
pub use notifier::{Notifier, TrackMessages, TrackText};
pub use store::ToastStore;
