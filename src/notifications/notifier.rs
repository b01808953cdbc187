// SPDX-License-Identifier: MPL-2.0
//! Public entry point for showing, tracking, and dismissing notifications.
//!
//! The `Notifier` wraps the pure [`ToastStore`] with expiry-timer
//! scheduling and a watch channel the rendering surface subscribes to.
//! Each scheduled expiry is an explicit task handle keyed by notification
//! id, so a manual dismissal aborts the pending wakeup instead of relying
//! on the store's idempotent removal alone.

use super::dedup::DedupGate;
use super::notification::{
    Expiry, Kind, Notification, NotificationId, NotificationPatch, Position, ToastOptions,
};
use super::store::ToastStore;
use crate::config::Config;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// Cloneable handle to the process-wide notification state.
///
/// All mutations are single indivisible transitions on the shared store;
/// clones observe the same state.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

struct Inner {
    store: Mutex<ToastStore>,
    dedup: Mutex<DedupGate>,
    timers: Mutex<HashMap<NotificationId, JoinHandle<()>>>,
    snapshot: watch::Sender<Vec<Notification>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_store(ToastStore::new())
    }

    /// Seeds toast settings from persisted preferences.
    pub fn with_config(config: &Config) -> Self {
        Self::with_store(ToastStore::from_config(config))
    }

    fn with_store(store: ToastStore) -> Self {
        let (snapshot, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                store: Mutex::new(store),
                dedup: Mutex::new(DedupGate::new()),
                timers: Mutex::new(HashMap::new()),
                snapshot,
            }),
        }
    }

    /// Shows a notification and schedules its expiry, returning its id.
    pub fn show(&self, message: impl Into<String>, options: ToastOptions) -> NotificationId {
        let kind = options.kind;
        let (id, expiry) = {
            let mut store = self.store();
            let id = store.add(message, options);
            let expiry = store.get(id).and_then(|n| n.expires_after);
            (id, expiry)
        };
        trace!(?id, ?kind, "toast shown");

        // The insert may have evicted tail entries; their timers are stale.
        self.prune_timers();
        self.publish();
        if let Some(duration) = expiry {
            self.schedule_expiry(id, duration);
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, ToastOptions::new(Kind::Success))
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, ToastOptions::new(Kind::Error))
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, ToastOptions::new(Kind::Warning))
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, ToastOptions::new(Kind::Info))
    }

    /// Shows a loading notification. Loading toasts never auto-expire,
    /// whatever expiry the caller asked for.
    pub fn loading(&self, message: impl Into<String>) -> NotificationId {
        self.show(
            message,
            ToastOptions::new(Kind::Loading).expiry(Expiry::Never),
        )
    }

    pub fn success_with(
        &self,
        message: impl Into<String>,
        options: ToastOptions,
    ) -> NotificationId {
        self.show_as(Kind::Success, message, options)
    }

    pub fn error_with(&self, message: impl Into<String>, options: ToastOptions) -> NotificationId {
        self.show_as(Kind::Error, message, options)
    }

    pub fn warning_with(
        &self,
        message: impl Into<String>,
        options: ToastOptions,
    ) -> NotificationId {
        self.show_as(Kind::Warning, message, options)
    }

    pub fn info_with(&self, message: impl Into<String>, options: ToastOptions) -> NotificationId {
        self.show_as(Kind::Info, message, options)
    }

    fn show_as(
        &self,
        kind: Kind,
        message: impl Into<String>,
        mut options: ToastOptions,
    ) -> NotificationId {
        options.kind = kind;
        self.show(message, options)
    }

    /// Removes a notification and aborts its pending expiry timer.
    ///
    /// Idempotent: dismissing an unknown or already-dismissed id is a no-op.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        if let Some(handle) = self.timers().remove(&id) {
            handle.abort();
        }
        let removed = self.store().remove(id);
        if removed {
            trace!(?id, "toast dismissed");
            self.publish();
        }
        removed
    }

    /// Removes every notification and aborts all pending timers.
    pub fn dismiss_all(&self) {
        for (_, handle) in self.timers().drain() {
            handle.abort();
        }
        self.store().clear_all();
        self.publish();
    }

    /// Patches an existing notification in place.
    ///
    /// An already-armed expiry timer is not rescheduled; patch the entry
    /// before its original deadline or dismiss and re-show instead.
    pub fn update(&self, id: NotificationId, patch: NotificationPatch) -> bool {
        let updated = self.store().update(id, patch);
        if updated {
            self.publish();
        }
        updated
    }

    /// Tracks an async operation with a loading toast and a terminal
    /// success or error toast.
    ///
    /// The loading toast is removed exactly once on every path, including a
    /// panicking message resolver, and the operation's result is passed
    /// through unchanged.
    pub async fn track<T, E, F>(&self, operation: F, messages: TrackMessages<T, E>) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let TrackMessages {
            loading,
            success,
            error,
        } = messages;

        let loading_id = self.loading(loading);
        let result = operation.await;
        let guard = DismissGuard {
            notifier: self.clone(),
            id: loading_id,
        };

        match result {
            Ok(value) => {
                let text = success.resolve(&value);
                drop(guard);
                self.success(text);
                Ok(value)
            }
            Err(err) => {
                let text = error.resolve(&err);
                drop(guard);
                self.error(text);
                Err(err)
            }
        }
    }

    pub fn set_position(&self, position: Position) {
        self.store().set_position(position);
    }

    pub fn set_max_toasts(&self, max: usize) {
        self.store().set_max_toasts(max);
        self.prune_timers();
        self.publish();
    }

    pub fn set_default_duration(&self, duration: Duration) {
        self.store().set_default_duration(duration);
    }

    pub fn position(&self) -> Position {
        self.store().position()
    }

    pub fn max_toasts(&self) -> usize {
        self.store().max_toasts()
    }

    pub fn default_duration(&self) -> Duration {
        self.store().default_duration()
    }

    /// Snapshot of the current notifications, newest first.
    pub fn items(&self) -> Vec<Notification> {
        self.store().items().to_vec()
    }

    /// Subscribes the rendering surface to state changes. Each mutation
    /// publishes a fresh snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.snapshot.subscribe()
    }

    /// Gate used by the error interceptor; direct calls are never
    /// deduplicated.
    pub(crate) fn dedup_should_show(&self, message: &str, origin: &str) -> bool {
        self.inner
            .dedup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .should_show(message, origin)
    }

    fn schedule_expiry(&self, id: NotificationId, duration: Duration) {
        // Without a runtime the toast simply persists until dismissed.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            trace!(?id, "no async runtime, toast will not auto-expire");
            return;
        };

        let weak = Arc::downgrade(&self.inner);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            expire(&weak, id);
        });
        self.timers().insert(id, handle);
    }

    fn prune_timers(&self) {
        let live: Vec<NotificationId> = self.store().items().iter().map(|n| n.id()).collect();
        self.timers().retain(|id, handle| {
            if live.contains(id) {
                true
            } else {
                handle.abort();
                false
            }
        });
    }

    fn publish(&self) {
        let items = self.store().items().to_vec();
        self.inner.snapshot.send_replace(items);
    }

    fn store(&self) -> MutexGuard<'_, ToastStore> {
        self.inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn timers(&self) -> MutexGuard<'_, HashMap<NotificationId, JoinHandle<()>>> {
        self.inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn expire(inner: &Weak<Inner>, id: NotificationId) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let removed = inner
        .store
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(id);
    inner
        .timers
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&id);
    if removed {
        trace!(?id, "toast expired");
        let items = inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .items()
            .to_vec();
        inner.snapshot.send_replace(items);
    }
}

/// Removes the loading toast when dropped, so `track` clears it even if a
/// message resolver panics.
struct DismissGuard {
    notifier: Notifier,
    id: NotificationId,
}

impl Drop for DismissGuard {
    fn drop(&mut self) {
        self.notifier.dismiss(self.id);
    }
}

/// Messages for [`Notifier::track`].
pub struct TrackMessages<T, E> {
    pub loading: String,
    pub success: TrackText<T>,
    pub error: TrackText<E>,
}

impl<T, E> TrackMessages<T, E> {
    pub fn new(
        loading: impl Into<String>,
        success: TrackText<T>,
        error: TrackText<E>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success,
            error,
        }
    }
}

/// A terminal-toast message: either a static string or a function of the
/// settled value.
pub enum TrackText<V> {
    Text(String),
    From(Box<dyn FnOnce(&V) -> String + Send>),
}

impl<V> TrackText<V> {
    pub fn text(text: impl Into<String>) -> Self {
        TrackText::Text(text.into())
    }

    pub fn from_value(f: impl FnOnce(&V) -> String + Send + 'static) -> Self {
        TrackText::From(Box::new(f))
    }

    fn resolve(self, value: &V) -> String {
        match self {
            TrackText::Text(text) => text,
            TrackText::From(f) => f(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, Duration};

    fn count_kind(notifier: &Notifier, kind: Kind) -> usize {
        notifier.items().iter().filter(|n| n.kind == kind).count()
    }

    #[tokio::test(start_paused = true)]
    async fn toast_auto_expires_after_its_duration() {
        let notifier = Notifier::new();
        notifier.set_default_duration(Duration::from_secs(2));
        let id = notifier.info("short lived");
        assert_eq!(notifier.items().len(), 1);

        tokio::task::yield_now().await;
        advance(Duration::from_millis(2100)).await;
        tokio::task::yield_now().await;

        assert!(notifier.items().is_empty());
        // Late or duplicate removal stays harmless.
        assert!(!notifier.dismiss(id));
    }

    #[tokio::test(start_paused = true)]
    async fn loading_toast_never_auto_expires() {
        let notifier = Notifier::new();
        notifier.loading("working");

        advance(Duration::from_secs(3600)).await;
        tokio::task::yield_now().await;

        assert_eq!(count_kind(&notifier, Kind::Loading), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_cancels_the_pending_timer() {
        let notifier = Notifier::new();
        let id = notifier.info("gone early");
        assert!(notifier.dismiss(id));

        advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;

        assert!(notifier.items().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_timers_fire_independently_of_insertion_order() {
        let notifier = Notifier::new();
        notifier.show(
            "slow",
            ToastOptions::new(Kind::Info).expiry(Expiry::After(Duration::from_secs(10))),
        );
        notifier.show(
            "fast",
            ToastOptions::new(Kind::Info).expiry(Expiry::After(Duration::from_secs(1))),
        );

        tokio::task::yield_now().await;
        advance(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;

        let items = notifier.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].message, "slow");
    }

    #[tokio::test]
    async fn same_tick_calls_keep_call_order_newest_first() {
        let notifier = Notifier::new();
        notifier.success("first");
        notifier.success("second");

        let items = notifier.items();
        assert_eq!(items[0].message, "second");
        assert_eq!(items[1].message, "first");
    }

    #[tokio::test]
    async fn direct_facade_calls_are_never_deduplicated() {
        let notifier = Notifier::new();
        notifier.success("Saved");
        notifier.success("Saved");
        assert_eq!(notifier.items().len(), 2);
    }

    #[tokio::test]
    async fn dismiss_all_clears_everything() {
        let notifier = Notifier::new();
        notifier.success("a");
        notifier.error("b");
        notifier.loading("c");
        notifier.dismiss_all();
        assert!(notifier.items().is_empty());
    }

    #[tokio::test]
    async fn subscribe_receives_snapshots() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();

        notifier.success("hello");
        rx.changed().await.expect("sender alive");
        assert_eq!(rx.borrow().len(), 1);
        assert_eq!(rx.borrow()[0].message, "hello");
    }

    #[tokio::test]
    async fn track_success_replaces_loading_with_success_toast() {
        let notifier = Notifier::new();
        let result = notifier
            .track(
                async { Ok::<_, String>(42) },
                TrackMessages::new(
                    "Loading...",
                    TrackText::from_value(|n: &i32| format!("Got {n}")),
                    TrackText::text("Failed"),
                ),
            )
            .await;

        assert_eq!(result, Ok(42));
        assert_eq!(count_kind(&notifier, Kind::Loading), 0);
        let items = notifier.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, Kind::Success);
        assert_eq!(items[0].message, "Got 42");
    }

    #[tokio::test]
    async fn track_failure_replaces_loading_and_passes_error_through() {
        let notifier = Notifier::new();
        let result: Result<i32, String> = notifier
            .track(
                async { Err("timeout".to_string()) },
                TrackMessages::new(
                    "Loading...",
                    TrackText::text("OK"),
                    TrackText::from_value(|e: &String| format!("Failed: {e}")),
                ),
            )
            .await;

        assert_eq!(result, Err("timeout".to_string()));
        assert_eq!(count_kind(&notifier, Kind::Loading), 0);
        let items = notifier.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, Kind::Error);
        assert_eq!(items[0].message, "Failed: timeout");
    }

    #[tokio::test]
    async fn panicking_resolver_still_clears_the_loading_toast() {
        let notifier = Notifier::new();
        let tracked = notifier.clone();

        // Run inside a task so the runtime contains the unwind.
        let task = tokio::spawn(async move {
            let _: Result<i32, String> = tracked
                .track(
                    async { Ok(1) },
                    TrackMessages::new(
                        "Loading...",
                        TrackText::from_value(|_: &i32| panic!("resolver failed")),
                        TrackText::text("Failed"),
                    ),
                )
                .await;
        });

        let join = task.await;
        assert!(join.expect_err("task should panic").is_panic());

        // The drop guard removed the loading toast despite the unwind, and
        // no terminal toast was produced.
        assert_eq!(count_kind(&notifier, Kind::Loading), 0);
        assert!(notifier.items().is_empty());
    }

    #[tokio::test]
    async fn eviction_aborts_stale_timers() {
        let notifier = Notifier::new();
        notifier.set_max_toasts(1);
        let evicted = notifier.info("old");
        notifier.info("new");

        assert_eq!(notifier.items().len(), 1);
        assert!(!notifier.dismiss(evicted));
    }

    #[tokio::test]
    async fn update_patches_live_notification() {
        let notifier = Notifier::new();
        let id = notifier.loading("uploading");
        let updated = notifier.update(
            id,
            NotificationPatch {
                kind: Some(Kind::Success),
                message: Some("uploaded".to_string()),
                ..NotificationPatch::default()
            },
        );

        assert!(updated);
        let items = notifier.items();
        assert_eq!(items[0].kind, Kind::Success);
        assert_eq!(items[0].message, "uploaded");
    }
}
