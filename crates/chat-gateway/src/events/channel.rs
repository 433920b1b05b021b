//! Multicast callback channel
//!
//! Every event type gets one `EventChannel`. Listeners are plain callbacks
//! stored under a monotonically increasing sequence number, so delivery
//! order is registration order.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    listeners: RwLock<BTreeMap<u64, Callback<T>>>,
    next_id: AtomicU64,
}

impl<T> Inner<T> {
    fn contains(&self, id: u64) -> bool {
        self.listeners.read().contains_key(&id)
    }
}

/// Removal side of a registration, type-erased so one `Subscription` type
/// serves every channel
trait Unlisten: Send + Sync {
    fn unlisten(&self, id: u64);
    fn is_registered(&self, id: u64) -> bool;
}

impl<T: 'static> Unlisten for Inner<T> {
    fn unlisten(&self, id: u64) {
        self.listeners.write().remove(&id);
    }

    fn is_registered(&self, id: u64) -> bool {
        self.contains(id)
    }
}

/// Handle to a registered listener
///
/// Dropping the handle leaves the listener registered; call
/// [`delete`](Self::delete) to remove it.
pub struct Subscription {
    channel: Weak<dyn Unlisten>,
    id: u64,
}

impl Subscription {
    /// Sequence number of this registration within its channel
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the listener. Deleting twice is a no-op.
    pub fn delete(&self) {
        if let Some(channel) = self.channel.upgrade() {
            channel.unlisten(self.id);
        }
    }

    /// Whether the listener is still registered
    pub fn is_active(&self) -> bool {
        self.channel
            .upgrade()
            .is_some_and(|channel| channel.is_registered(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Registry of callbacks for one event type
pub struct EventChannel<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for EventChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                listeners: RwLock::new(BTreeMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<T> EventChannel<T> {
    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().len()
    }

    #[inline]
    pub fn has_listeners(&self) -> bool {
        self.listener_count() > 0
    }

    /// Invoke every listener in registration order
    ///
    /// Listeners run on the caller's task over a snapshot of the registry, so
    /// a callback may delete its own or any other subscription. A listener
    /// deleted before its turn is skipped; one added mid-emission is not
    /// invoked for this value.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Callback<T>)> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();

        for (id, callback) in snapshot {
            if self.inner.contains(id) {
                callback(value);
            }
        }
    }
}

impl<T: Send + Sync + 'static> EventChannel<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn listen<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.write().insert(id, Arc::new(callback));
        self.subscription(id)
    }

    /// Replace every registered listener with a single new one
    pub fn override_with<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let mut listeners = self.inner.listeners.write();
            listeners.clear();
            listeners.insert(id, Arc::new(callback));
        }
        self.subscription(id)
    }

    /// Remove every listener
    pub fn clear(&self) {
        self.inner.listeners.write().clear();
    }

    /// Deliver the value on a spawned task
    ///
    /// Skipped entirely when nobody listens. Outside a Tokio runtime the
    /// listeners run inline instead.
    pub fn emit_async(&self, value: T) {
        if !self.has_listeners() {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let channel = self.clone();
                handle.spawn(async move {
                    channel.emit(&value);
                });
            }
            Err(_) => self.emit(&value),
        }
    }

    /// Run `mutate` inline, then deliver the value asynchronously
    ///
    /// `mutate` runs on the caller's path, so the read loop finishes its
    /// cache write before the fan-out task is even spawned. A listener
    /// therefore always reads the patched cache, and the next frame cannot
    /// overtake the write. `mutate` runs even without listeners.
    pub fn emit_then_continue<F>(&self, value: T, mutate: F)
    where
        F: FnOnce(&T),
    {
        mutate(&value);
        self.emit_async(value);
    }

    fn subscription(&self, id: u64) -> Subscription {
        let inner: Arc<dyn Unlisten> = self.inner.clone();
        Subscription {
            channel: Arc::downgrade(&inner),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[test]
    fn test_listen_and_emit_in_order() {
        let channel = EventChannel::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let seen = Arc::clone(&seen);
            channel.listen(move |v| seen.lock().push(format!("{tag}{v}")));
        }
        channel.emit(&1);

        assert_eq!(*seen.lock(), vec!["a1", "b1", "c1"]);
    }

    #[test]
    fn test_subscription_ids_increase() {
        let channel = EventChannel::<u32>::new();
        let first = channel.listen(|_| {});
        let second = channel.listen(|_| {});
        assert!(second.id() > first.id());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let channel = EventChannel::<u32>::new();
        let sub = channel.listen(|_| {});
        assert!(sub.is_active());

        sub.delete();
        sub.delete();
        assert!(!sub.is_active());
        assert_eq!(channel.listener_count(), 0);
    }

    #[test]
    fn test_delete_after_channel_dropped() {
        let channel = EventChannel::<u32>::new();
        let sub = channel.listen(|_| {});
        drop(channel);
        sub.delete();
        assert!(!sub.is_active());
    }

    #[test]
    fn test_self_removal_during_emit() {
        let channel = EventChannel::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let others = Arc::new(AtomicUsize::new(0));

        let handle: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let sub = {
            let handle = Arc::clone(&handle);
            let calls = Arc::clone(&calls);
            channel.listen(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                if let Some(sub) = handle.lock().as_ref() {
                    sub.delete();
                }
            })
        };
        *handle.lock() = Some(sub);

        let counter = Arc::clone(&others);
        channel.listen(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        channel.emit(&1);
        channel.emit(&2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(others.load(Ordering::SeqCst), 2);
        assert_eq!(channel.listener_count(), 1);
    }

    #[test]
    fn test_removing_later_listener_skips_it() {
        let channel = EventChannel::<u32>::new();
        let later_calls = Arc::new(AtomicUsize::new(0));

        let later_handle: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        {
            let later_handle = Arc::clone(&later_handle);
            channel.listen(move |_| {
                if let Some(sub) = later_handle.lock().as_ref() {
                    sub.delete();
                }
            });
        }
        let counter = Arc::clone(&later_calls);
        let later = channel.listen(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        *later_handle.lock() = Some(later);

        channel.emit(&1);
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_override_replaces_all() {
        let channel = EventChannel::<u32>::new();
        let old = Arc::new(AtomicUsize::new(0));
        let new = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let old = Arc::clone(&old);
            channel.listen(move |_| {
                old.fetch_add(1, Ordering::SeqCst);
            });
        }
        let counter = Arc::clone(&new);
        channel.override_with(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        channel.emit(&0);

        assert_eq!(channel.listener_count(), 1);
        assert_eq!(old.load(Ordering::SeqCst), 0);
        assert_eq!(new.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_emit_then_continue_runs_mutation_without_listeners() {
        let channel = EventChannel::<u32>::new();
        let mutated = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&mutated);
        channel.emit_then_continue(5, move |v| {
            counter.store(*v as usize, Ordering::SeqCst);
        });
        assert_eq!(mutated.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_emit_then_continue_mutation_happens_before_listener() {
        let channel = EventChannel::<u32>::new();
        let state = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = tokio::sync::oneshot::channel();
        let tx = Mutex::new(Some(tx));

        let observed = Arc::clone(&state);
        channel.listen(move |_| {
            if let Some(tx) = tx.lock().take() {
                let _ = tx.send(observed.load(Ordering::SeqCst));
            }
        });

        let target = Arc::clone(&state);
        channel.emit_then_continue(7, move |v| {
            target.store(*v as usize, Ordering::SeqCst);
        });

        let seen = tokio::time::timeout(Duration::from_secs(1), rx)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(seen, 7);
    }

    #[tokio::test]
    async fn test_emit_async_delivers() {
        let channel = EventChannel::<String>::new();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        channel.listen(move |v: &String| {
            let _ = tx.send(v.clone());
        });

        channel.emit_async(String::from("hello"));
        let got = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap();
        assert_eq!(got.as_deref(), Some("hello"));
    }
}
