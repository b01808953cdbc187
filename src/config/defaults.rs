// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for notification settings.
//!
//! Single source of truth for the bounds and defaults applied to the toast
//! store and the error interceptor.

use std::time::Duration;

// ==========================================================================
// Capacity
// ==========================================================================

/// Default number of simultaneously held toasts.
pub const DEFAULT_MAX_TOASTS: usize = 5;

/// Minimum allowed toast cap.
pub const MIN_MAX_TOASTS: usize = 1;

/// Maximum allowed toast cap.
pub const MAX_MAX_TOASTS: usize = 10;

// ==========================================================================
// Durations
// ==========================================================================

/// Default time-to-live for toasts that don't specify their own.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(4000);

/// Floor applied to the configurable default duration.
pub const MIN_DEFAULT_DURATION: Duration = Duration::from_millis(1000);

/// Time-to-live of error toasts produced by the interceptor.
pub const ERROR_TOAST_DURATION: Duration = Duration::from_millis(5000);

// ==========================================================================
// Deduplication
// ==========================================================================

/// Window during which an identical (message, origin) error is suppressed.
pub const DEDUP_WINDOW: Duration = Duration::from_millis(1500);

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_MAX_TOASTS >= 1);
    assert!(MAX_MAX_TOASTS >= MIN_MAX_TOASTS);
    assert!(DEFAULT_MAX_TOASTS >= MIN_MAX_TOASTS);
    assert!(DEFAULT_MAX_TOASTS <= MAX_MAX_TOASTS);

    assert!(MIN_DEFAULT_DURATION.as_millis() > 0);
    assert!(DEFAULT_TOAST_DURATION.as_millis() >= MIN_DEFAULT_DURATION.as_millis());
    assert!(ERROR_TOAST_DURATION.as_millis() >= MIN_DEFAULT_DURATION.as_millis());

    assert!(DEDUP_WINDOW.as_millis() > 0);
};
