//! Request types. `PATH` is the route each is emitted on.

pub mod app;
pub mod auth;
pub mod content;
pub mod edit;
pub mod upload;

pub use app::*;
pub use auth::*;
pub use content::*;
pub use edit::*;
pub use upload::*;
