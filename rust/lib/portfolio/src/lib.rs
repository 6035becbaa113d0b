//! Portfolio client core.
//!
//! Holds the session, the public content and the profile draft in one
//! Flux state store, and reconciles them against the backend:
//!
//! - `auth/*`: login, logout, and forced invalidation on a 401
//! - `content/*`: joint fetch of profile, links and projects
//! - `edit/*`: draft begin / field / cancel / commit
//! - `upload/*`: avatar upload, one at a time
//! - `app/*`: the view state machine and the banner
//!
//! ```ignore
//! let portfolio = Portfolio::new(Arc::new(HttpBackend::new(url)), kv);
//! portfolio.initialize().await;
//! portfolio.show_login().await;
//! portfolio.login("admin", "secret").await;
//! portfolio.begin_edit().await;
//! portfolio.edit_field(ProfileField::Summary, "new").await;
//! portfolio.commit_edit().await;
//! ```

pub mod context;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod portfolio;
pub mod request;
pub mod state;

#[cfg(test)]
mod testing;

pub use context::{PortfolioContext, TOKEN_SLOT_KEY};
pub use error::PortfolioError;
pub use portfolio::Portfolio;
pub use state::{
    AppRoute, Banner, ContentState, Draft, EditState, LoginForm, ProfileField, PublicContent,
    RouteEvent, Section, SessionEnd, SessionState, UploadState, View,
};
