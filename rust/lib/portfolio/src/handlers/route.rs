//! View routing helpers shared by all handlers.

use folio_flux::StateStore;
use tracing::info;

use crate::state::*;

pub fn current_view(store: &StateStore) -> View {
    store
        .get_as::<AppRoute>(AppRoute::PATH)
        .map(|r| r.view)
        .unwrap_or(View::Loading)
}

/// Feed `event` to the view state machine and store the result.
pub fn transition(store: &StateStore, event: RouteEvent) -> View {
    let from = current_view(store);
    let authorized = store
        .get_as::<SessionState>(SessionState::PATH)
        .map_or(false, |s| s.is_authorized());
    let to = from.next(event, authorized);
    if to != from {
        info!(?from, ?to, ?event, "view transition");
    }
    store.set(AppRoute::PATH, AppRoute { view: to });
    to
}

pub fn set_banner(store: &StateStore, message: Option<String>) {
    store.set(Banner::PATH, Banner { message });
}
