use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::topic;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Per-path state store with pattern-matched change notifications.
///
/// - `set(path, value)` stores a value and notifies matching subscribers.
/// - `get(path)` / `get_as::<T>(path)` read the current value.
/// - `subscribe(pattern, handler)` registers a change handler.
///
/// Handlers run synchronously on the caller of `set`, after the write lock
/// has been released, so a handler may read the store.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    pattern: String,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set a typed value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// Set a pre-built StateValue at `path` and notify matching subscribers.
    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap();
            values.insert(path.to_string(), value.clone());
        }
        self.notify(path, &value);
    }

    /// Read-modify-write of the `T` at `path` under a single write lock.
    ///
    /// `f` gets the current value (`T::default()` if unset or of another
    /// type) and returns what `update` returns. No other writer can slip in
    /// between the read and the write, so this is the primitive for
    /// check-and-claim flags. Subscribers are notified after the lock is
    /// released.
    pub fn update<T, R>(&self, path: &str, f: impl FnOnce(&mut T) -> R) -> R
    where
        T: Any + Clone + Default + Send + Sync,
    {
        let (value, out) = {
            let mut values = self.values.write().unwrap();
            let mut current = values
                .get(path)
                .and_then(|v| v.downcast_ref::<T>().cloned())
                .unwrap_or_default();
            let out = f(&mut current);
            let value = StateValue::new(current);
            values.insert(path.to_string(), value.clone());
            (value, out)
        };
        self.notify(path, &value);
        out
    }

    fn notify(&self, path: &str, value: &StateValue) {
        let matched: Vec<ChangeHandler> = self
            .subscribers
            .read()
            .unwrap()
            .iter()
            .filter(|s| topic::matches(&s.pattern, path))
            .map(|s| Arc::clone(&s.handler))
            .collect();
        trace!(path, subscribers = matched.len(), "state changed");
        for handler in matched {
            handler(path, value);
        }
    }

    /// Current value at `path` (Arc clone, no data copy).
    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values.read().unwrap().get(path).cloned()
    }

    /// Current value at `path`, downcast and cloned.
    ///
    /// Returns `None` if nothing is set or the stored type is not `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.downcast_ref::<T>().cloned())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.read().unwrap().contains_key(path)
    }

    /// All stored paths, ordered.
    pub fn paths(&self) -> Vec<String> {
        self.values.read().unwrap().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to changes on paths matching `pattern` (`+` and `#` allowed).
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        debug_assert!(topic::is_valid_pattern(pattern), "bad pattern {pattern:?}");
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().unwrap().push(Subscriber {
            id,
            pattern: pattern.to_string(),
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a subscription. Returns false if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.write().unwrap();
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() < before
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
