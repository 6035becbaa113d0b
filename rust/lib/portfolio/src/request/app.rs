//! App-level requests.

/// Start up: restore any saved session, then load the public content.
#[derive(Debug, Clone)]
pub struct InitializeReq;

impl InitializeReq {
    pub const PATH: &'static str = "app/initialize";
}

/// Open the login form from the public page.
#[derive(Debug, Clone)]
pub struct ShowLoginReq;

impl ShowLoginReq {
    pub const PATH: &'static str = "app/show-login";
}

/// Go to the admin view. Lands on login when no credential is held.
#[derive(Debug, Clone)]
pub struct ShowAdminReq;

impl ShowAdminReq {
    pub const PATH: &'static str = "app/show-admin";
}

/// Back to the public page. Also how a login is cancelled.
#[derive(Debug, Clone)]
pub struct ShowPublicReq;

impl ShowPublicReq {
    pub const PATH: &'static str = "app/show-public";
}

/// Scroll the public page to a named section.
#[derive(Debug, Clone)]
pub struct NavigateReq {
    pub section: String,
}

impl NavigateReq {
    pub const PATH: &'static str = "app/navigate";
}

#[derive(Debug, Clone)]
pub struct DismissBannerReq;

impl DismissBannerReq {
    pub const PATH: &'static str = "app/dismiss-banner";
}
