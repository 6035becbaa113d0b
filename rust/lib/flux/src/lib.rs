//! Flux — path-addressed state engine with pub/sub.
//!
//! Rust owns all client state and logic; a presentation (CLI, native UI,
//! web shell) only emits requests and renders state.
//!
//! - `get(path)` — read state at a path
//! - `emit(path, payload)` — send a request, routed to handler(s)
//! - `subscribe(pattern)` — observe state changes
//!
//! Paths use `/` as separator (`auth/session`, `edit/about`). Subscriptions
//! and handlers accept MQTT-style wildcards: `+` for one level, `#` for the
//! rest.

pub mod app;
pub mod router;
pub mod store;
pub mod topic;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
