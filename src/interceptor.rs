// SPDX-License-Identifier: MPL-2.0
//! Global interception of API failures.
//!
//! Turns raw HTTP/transport failures into a single localized, deduplicated,
//! user-visible error toast, so call sites don't each need bespoke
//! error-to-toast logic. The interceptor observes and forwards: it never
//! swallows an error, so local `?`/match handling keeps working alongside
//! the global feedback.
//!
//! ```ignore
//! match client.get(endpoint).send().await {
//!     Ok(response) => ...,
//!     Err(err) => return interceptor.handle(err.into(), endpoint),
//! }
//! ```

use crate::config::defaults::ERROR_TOAST_DURATION;
use crate::config::Config;
use crate::error::ApiError;
use crate::i18n::fluent::I18n;
use crate::notifications::{Expiry, Notifier, ToastOptions};
use fluent_bundle::FluentArgs;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

/// Custom handler override; runs before the toast pipeline and never
/// suppresses it.
pub type ErrorHook = Box<dyn Fn(&ApiError, &str) + Send + Sync>;

pub struct ErrorInterceptor {
    notifier: Notifier,
    i18n: RwLock<I18n>,
    toasts_enabled: AtomicBool,
    suppress_depth: AtomicUsize,
    hook: RwLock<Option<ErrorHook>>,
}

impl ErrorInterceptor {
    pub fn new(notifier: Notifier, i18n: I18n) -> Self {
        Self {
            notifier,
            i18n: RwLock::new(i18n),
            toasts_enabled: AtomicBool::new(true),
            suppress_depth: AtomicUsize::new(0),
            hook: RwLock::new(None),
        }
    }

    /// Seeds the enabled flag from persisted preferences.
    pub fn with_config(notifier: Notifier, i18n: I18n, config: &Config) -> Self {
        let interceptor = Self::new(notifier, i18n);
        interceptor
            .toasts_enabled
            .store(config.error_toasts.unwrap_or(true), Ordering::Relaxed);
        interceptor
    }

    /// Observes a failure, surfaces it as a toast when allowed, and hands
    /// the original error back unchanged.
    ///
    /// Always returns `Err` with the error it received, so call sites write
    /// `return interceptor.handle(err, endpoint)` (or `?` on the result)
    /// and control never continues normally past this point.
    pub fn handle<T>(&self, error: ApiError, endpoint: &str) -> Result<T, ApiError> {
        warn!(endpoint, error = %error, "api request failed");

        if let Some(hook) = self
            .hook
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            hook(&error, endpoint);
        }

        if self.toasts_enabled() && !self.is_suppressed() {
            let message = self.resolve_message(&error, endpoint);
            if self.notifier.dedup_should_show(&message, endpoint) {
                self.notifier.error_with(
                    message,
                    ToastOptions::default().expiry(Expiry::After(ERROR_TOAST_DURATION)),
                );
            } else {
                debug!(endpoint, "duplicate error toast suppressed");
            }
        } else {
            debug!(endpoint, "error toast disabled or suppressed");
        }

        Err(error)
    }

    /// Runs `operation` with error toasts suppressed, restoring the prior
    /// state afterwards on success, failure, and panic.
    ///
    /// This is how a call site that wants to handle a particular failure
    /// locally (inline form feedback, say) opts out of the global toast for
    /// just that one call.
    pub async fn with_suppressed<F, T>(&self, operation: F) -> T
    where
        F: Future<Output = T>,
    {
        let _guard = SuppressGuard::enter(&self.suppress_depth);
        operation.await
    }

    pub fn enable_toasts(&self) {
        self.toasts_enabled.store(true, Ordering::Relaxed);
    }

    pub fn disable_toasts(&self) {
        self.toasts_enabled.store(false, Ordering::Relaxed);
    }

    pub fn toasts_enabled(&self) -> bool {
        self.toasts_enabled.load(Ordering::Relaxed)
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppress_depth.load(Ordering::Relaxed) > 0
    }

    /// Installs a custom handler that observes every failure before the
    /// toast pipeline runs.
    pub fn set_hook(&self, hook: ErrorHook) {
        *self.hook.write().unwrap_or_else(PoisonError::into_inner) = Some(hook);
    }

    pub fn clear_hook(&self) {
        *self.hook.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn set_locale(&self, locale: LanguageIdentifier) {
        self.i18n
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_locale(locale);
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Resolves the user-facing message for a failure.
    ///
    /// Precedence: access-denied resource template, then server-supplied
    /// detail, then the status-mapped localized string.
    fn resolve_message(&self, error: &ApiError, endpoint: &str) -> String {
        let i18n = self.i18n.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(resource) = error.resource() {
            // Prefer a localized label for the resource key, falling back
            // to the raw key when none is registered.
            let label = i18n
                .try_tr(&format!("resource-{resource}"))
                .unwrap_or_else(|| resource.to_string());
            let mut args = FluentArgs::new();
            args.set("resource", label);
            return i18n.tr_with("error-access-denied-resource", &args);
        }

        if let Some(detail) = error.detail() {
            return detail.to_string();
        }

        match error {
            ApiError::Unexpected(_) => {
                let mut args = FluentArgs::new();
                args.set("endpoint", endpoint.to_string());
                i18n.tr_with(error.i18n_key(), &args)
            }
            ApiError::Server { status, .. } | ApiError::Http { status, .. } => {
                let mut args = FluentArgs::new();
                args.set("status", status.to_string());
                i18n.tr_with(error.i18n_key(), &args)
            }
            _ => i18n.tr(error.i18n_key()),
        }
    }
}

struct SuppressGuard<'a> {
    depth: &'a AtomicUsize,
}

impl<'a> SuppressGuard<'a> {
    fn enter(depth: &'a AtomicUsize) -> Self {
        depth.fetch_add(1, Ordering::Relaxed);
        Self { depth }
    }
}

impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::Relaxed);
    }
}
