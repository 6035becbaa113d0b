//! Handler implementations and Flux wiring.
//!
//! Handlers are plain async functions over the state store. They catch
//! every failure themselves and leave a message in state; nothing a
//! handler does can fail the emit that triggered it.

pub mod app_handlers;
pub mod auth_handlers;
pub mod content_handlers;
pub mod edit_handlers;
pub mod route;
pub mod session;
pub mod upload_handlers;

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use folio_flux::{Flux, StateStore};
use tracing::warn;

use crate::context::PortfolioContext;
use crate::request::*;

/// Register `handler` for `path`, downcasting the payload to `R`.
fn on_request<R, F, Fut>(flux: &Flux, path: &'static str, ctx: &Arc<PortfolioContext>, handler: F)
where
    R: Any + Clone + Send + Sync,
    F: Fn(R, Arc<StateStore>, Arc<PortfolioContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let ctx = Arc::clone(ctx);
    flux.on(path, move |path, payload, store| {
        let fut = payload
            .downcast_ref::<R>()
            .cloned()
            .map(|req| handler(req, store, Arc::clone(&ctx)));
        async move {
            match fut {
                Some(fut) => fut.await,
                None => warn!(%path, "request payload has the wrong type"),
            }
        }
    });
}

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<PortfolioContext>) {
    on_request(flux, InitializeReq::PATH, &ctx, |_: InitializeReq, store, ctx| async move {
        app_handlers::handle_initialize(&store, &ctx).await;
    });
    on_request(flux, NavigateReq::PATH, &ctx, |req: NavigateReq, store, _| async move {
        app_handlers::handle_navigate(&req, &store).await;
    });
    on_request(flux, ShowLoginReq::PATH, &ctx, |_: ShowLoginReq, store, _| async move {
        app_handlers::handle_show_login(&store).await;
    });
    on_request(flux, ShowAdminReq::PATH, &ctx, |_: ShowAdminReq, store, _| async move {
        app_handlers::handle_show_admin(&store).await;
    });
    on_request(flux, ShowPublicReq::PATH, &ctx, |_: ShowPublicReq, store, _| async move {
        app_handlers::handle_show_public(&store).await;
    });
    on_request(flux, DismissBannerReq::PATH, &ctx, |_: DismissBannerReq, store, _| async move {
        app_handlers::handle_dismiss_banner(&store).await;
    });

    on_request(flux, LoginReq::PATH, &ctx, |req: LoginReq, store, ctx| async move {
        auth_handlers::handle_login(&req, &store, &ctx).await;
    });
    on_request(flux, LogoutReq::PATH, &ctx, |_: LogoutReq, store, ctx| async move {
        auth_handlers::handle_logout(&store, &ctx).await;
    });

    on_request(flux, LoadContentReq::PATH, &ctx, |_: LoadContentReq, store, ctx| async move {
        content_handlers::handle_load(&store, &ctx).await;
    });

    on_request(flux, BeginEditReq::PATH, &ctx, |_: BeginEditReq, store, _| async move {
        edit_handlers::handle_begin(&store).await;
    });
    on_request(flux, EditFieldReq::PATH, &ctx, |req: EditFieldReq, store, _| async move {
        edit_handlers::handle_field(&req, &store).await;
    });
    on_request(flux, CancelEditReq::PATH, &ctx, |_: CancelEditReq, store, _| async move {
        edit_handlers::handle_cancel(&store).await;
    });
    on_request(flux, CommitEditReq::PATH, &ctx, |_: CommitEditReq, store, ctx| async move {
        edit_handlers::handle_commit(&store, &ctx).await;
    });

    on_request(flux, UploadPhotoReq::PATH, &ctx, |req: UploadPhotoReq, store, ctx| async move {
        upload_handlers::handle_upload(&req, &store, &ctx).await;
    });
}
