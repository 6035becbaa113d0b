//! App-level handler implementations.

use folio_flux::StateStore;
use tracing::debug;

use crate::context::PortfolioContext;
use crate::handlers::{content_handlers, route, session};
use crate::request::*;
use crate::state::*;

/// Handle `app/initialize`.
pub async fn handle_initialize(store: &StateStore, ctx: &PortfolioContext) {
    session::restore(store, ctx);
    store.set(AppRoute::PATH, AppRoute { view: View::Loading });
    store.set(Banner::PATH, Banner::default());
    store.set(Section::PATH, Section::default());
    store.set(LoginForm::PATH, LoginForm::default());
    store.set(EditState::PATH, EditState::default());
    store.set(UploadState::PATH, UploadState::default());

    content_handlers::handle_load(store, ctx).await;
    route::transition(store, RouteEvent::ContentResolved);
}

/// Handle `app/navigate`. Recorded only on the public page.
pub async fn handle_navigate(req: &NavigateReq, store: &StateStore) {
    if route::current_view(store) != View::Public {
        debug!(section = %req.section, "navigate ignored outside public view");
        return;
    }
    store.set(Section::PATH, Section(Some(req.section.clone())));
}

/// Handle `app/show-login`.
pub async fn handle_show_login(store: &StateStore) {
    store.set(LoginForm::PATH, LoginForm::default());
    route::transition(store, RouteEvent::LoginRequested);
}

/// Handle `app/show-admin`.
pub async fn handle_show_admin(store: &StateStore) {
    route::transition(store, RouteEvent::AdminRequested);
}

/// Handle `app/show-public`.
pub async fn handle_show_public(store: &StateStore) {
    route::transition(store, RouteEvent::PublicRequested);
}

pub async fn handle_dismiss_banner(store: &StateStore) {
    route::set_banner(store, None);
}
