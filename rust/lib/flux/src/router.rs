use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::store::StateStore;
use crate::topic;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased payload carried by a request.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Type-erased handler. Takes owned values so the future can be `'static`.
type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Request router — maps path patterns to async handlers.
///
/// Every handler whose pattern matches the request path runs, sequentially,
/// in registration order. A request no handler matches is a no-op.
pub struct Router {
    routes: RwLock<Vec<(String, ErasedHandler)>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(Vec::new()),
        }
    }

    /// Register an async handler for a path pattern (`+` and `#` allowed).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        self.routes
            .write()
            .unwrap()
            .push((pattern.to_string(), handler));
    }

    /// Dispatch a request to all matching handlers.
    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) {
        // Collect first: the lock must not be held across an await.
        let handlers: Vec<ErasedHandler> = self
            .routes
            .read()
            .unwrap()
            .iter()
            .filter(|(pattern, _)| topic::matches(pattern, path))
            .map(|(_, h)| Arc::clone(h))
            .collect();

        if handlers.is_empty() {
            debug!(path, "no handler for request");
            return;
        }
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    /// Check if any handler would match the given path.
    pub fn matches(&self, path: &str) -> bool {
        self.routes
            .read()
            .unwrap()
            .iter()
            .any(|(pattern, _)| topic::matches(pattern, path))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
