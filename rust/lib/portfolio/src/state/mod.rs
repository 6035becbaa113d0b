//! State types. Each lives at a fixed path in the state store (`PATH`).

pub mod app;
pub mod content;
pub mod edit;
pub mod session;
pub mod upload;

pub use app::*;
pub use content::*;
pub use edit::*;
pub use session::*;
pub use upload::*;
