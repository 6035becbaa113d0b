//! Credential lifecycle and the authorized-call chokepoint.

use std::future::Future;

use folio_client::{ApiError, Credential};
use folio_flux::StateStore;
use tracing::{debug, info, warn};

use crate::context::PortfolioContext;
use crate::handlers::route;
use crate::messages;
use crate::state::*;

/// The credential currently held, if any.
pub fn credential(store: &StateStore) -> Option<Credential> {
    store
        .get_as::<SessionState>(SessionState::PATH)
        .and_then(|s| s.credential)
}

/// Load a persisted credential. No validation call is made; the first
/// mutation that gets a 401 ends the session.
pub fn restore(store: &StateStore, ctx: &PortfolioContext) {
    let state = match ctx.token_slot.get() {
        Ok(Some(token)) => {
            info!("restored saved session");
            SessionState::signed_in(Credential::new(token))
        }
        Ok(None) => SessionState::default(),
        Err(e) => {
            warn!("failed to read saved session: {}", e);
            SessionState::default()
        }
    };
    store.set(SessionState::PATH, state);
}

/// Hold `credential` in memory and persist it.
///
/// A persistence failure is logged; the session still starts, it just will
/// not survive a restart.
pub fn establish(store: &StateStore, ctx: &PortfolioContext, credential: Credential) {
    if let Err(e) = ctx.token_slot.set(credential.as_str()) {
        warn!("failed to persist session: {}", e);
    }
    store.set(SessionState::PATH, SessionState::signed_in(credential));
}

/// End the session: forget the credential everywhere, discard any draft and
/// route according to `reason`.
pub fn invalidate(store: &StateStore, ctx: &PortfolioContext, reason: SessionEnd) {
    info!(?reason, "session ended");
    if let Err(e) = ctx.token_slot.clear() {
        warn!("failed to clear saved session: {}", e);
    }
    store.set(SessionState::PATH, SessionState::ended(reason));
    store.set(EditState::PATH, EditState::default());
    store.set(LoginForm::PATH, LoginForm::default());
    match reason {
        SessionEnd::Forced => route::set_banner(store, Some(messages::SESSION_EXPIRED.to_string())),
        SessionEnd::Voluntary => route::set_banner(store, None),
    }
    route::transition(store, RouteEvent::SessionEnded(reason));
}

/// Why an authorized call produced no result.
#[derive(Debug)]
pub enum Rejection {
    /// No credential was held; nothing was sent.
    NoCredential,
    /// The backend rejected the credential. The session is already over.
    SessionEnded,
    Api(ApiError),
}

/// Run `op` with the held credential.
///
/// A 401 from `op` ends the session (forced) here, so callers only ever
/// handle `SessionEnded` as "stop".
pub async fn authorized<T, F, Fut>(
    store: &StateStore,
    ctx: &PortfolioContext,
    op: F,
) -> Result<T, Rejection>
where
    F: FnOnce(Credential) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let Some(credential) = credential(store) else {
        debug!("authorized call without a credential");
        return Err(Rejection::NoCredential);
    };
    match op(credential).await {
        Ok(value) => Ok(value),
        Err(ApiError::Unauthorized) => {
            warn!("credential rejected by backend");
            invalidate(store, ctx, SessionEnd::Forced);
            Err(Rejection::SessionEnded)
        }
        Err(e) => Err(Rejection::Api(e)),
    }
}
