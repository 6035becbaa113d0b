//! Auth handler implementations.

use folio_client::{ApiError, Credential};
use folio_flux::StateStore;
use tracing::{info, warn};

use crate::context::PortfolioContext;
use crate::handlers::{route, session};
use crate::messages;
use crate::request::*;
use crate::state::*;

/// Handle `auth/login`.
///
/// A failure only touches the login form: the held session, the banner and
/// the view stay as they were.
pub async fn handle_login(
    req: &LoginReq,
    store: &StateStore,
    ctx: &PortfolioContext,
) -> Option<Credential> {
    store.set(LoginForm::PATH, LoginForm { busy: true, error: None });

    match ctx.backend.login(&req.username, &req.password).await {
        Ok(credential) => {
            info!(user = %req.username, "login succeeded");
            session::establish(store, ctx, credential.clone());
            store.set(LoginForm::PATH, LoginForm::default());
            route::set_banner(store, None);
            route::transition(store, RouteEvent::LoginSucceeded);
            Some(credential)
        }
        Err(e) => {
            warn!(user = %req.username, "login failed: {}", e);
            let message = match e {
                ApiError::Network(_) => messages::LOGIN_UNREACHABLE,
                _ => messages::INVALID_LOGIN,
            };
            store.set(
                LoginForm::PATH,
                LoginForm {
                    busy: false,
                    error: Some(message.to_string()),
                },
            );
            None
        }
    }
}

/// Handle `auth/logout`.
pub async fn handle_logout(store: &StateStore, ctx: &PortfolioContext) {
    session::invalidate(store, ctx, SessionEnd::Voluntary);
}
