//! View routing state — stored at `app/route`, `app/banner`, `app/section`.

use serde::Serialize;

use super::session::SessionEnd;

/// Which mode the presentation shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Loading,
    Public,
    Login,
    Admin,
}

/// Inputs to the view state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEvent {
    /// The initial joint content fetch finished, successfully or not.
    ContentResolved,
    LoginRequested,
    AdminRequested,
    /// Leave login or admin for the public page. Cancelling a login is this.
    PublicRequested,
    LoginSucceeded,
    SessionEnded(SessionEnd),
}

impl View {
    /// The view after `event`. `authorized` is whether a credential is held.
    ///
    /// `Admin` is never returned without a credential: such a transition
    /// lands on `Login`.
    pub fn next(self, event: RouteEvent, authorized: bool) -> View {
        use RouteEvent::*;
        use View::*;

        let to = match (self, event) {
            (_, SessionEnded(SessionEnd::Forced)) => Login,
            (Loading, SessionEnded(SessionEnd::Voluntary)) => Loading,
            (_, SessionEnded(SessionEnd::Voluntary)) => Public,
            (Loading, ContentResolved) => Public,
            (Public, LoginRequested) => Login,
            (Public, AdminRequested) => Admin,
            (Login, LoginSucceeded) => Admin,
            (Login | Admin, PublicRequested) => Public,
            (from, _) => from,
        };

        if to == Admin && !authorized {
            Login
        } else {
            to
        }
    }
}

/// Current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppRoute {
    pub view: View,
}

impl AppRoute {
    pub const PATH: &'static str = "app/route";
}

/// General error banner shown at the top of the current view.
///
/// Login failures never go here; see `LoginForm`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Banner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Banner {
    pub const PATH: &'static str = "app/banner";
}

/// The page section the public view is scrolled to. Has no effect on `View`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section(pub Option<String>);

impl Section {
    pub const PATH: &'static str = "app/section";
}
