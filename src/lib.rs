// SPDX-License-Identifier: MPL-2.0
//! `toast_relay` is an in-process toast notification subsystem.
//!
//! It provides an ordered, capacity-bounded toast store, a delivery façade
//! with auto-expiry timers and promise tracking, and a global API-error
//! interceptor with localized, deduplicated messages. Rendering is left to
//! the host application, which subscribes to state snapshots.

pub mod config;
pub mod error;
pub mod i18n;
pub mod interceptor;
pub mod notifications;

pub use error::{ApiError, Error, Result};
pub use interceptor::ErrorInterceptor;
pub use notifications::{Notification, NotificationId, Notifier};
