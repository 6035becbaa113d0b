//! Photo upload handler implementations.

use folio_client::PhotoFile;
use folio_flux::StateStore;
use tracing::{debug, info, warn};

use crate::context::PortfolioContext;
use crate::error::PortfolioError;
use crate::handlers::session::{self, Rejection};
use crate::handlers::{content_handlers, route};
use crate::messages;
use crate::request::*;
use crate::state::*;

/// Client-side check before anything is sent.
pub fn validate_photo(photo: &PhotoFile) -> Result<(), PortfolioError> {
    if photo.is_image() {
        Ok(())
    } else {
        Err(PortfolioError::Validation(messages::NOT_AN_IMAGE.to_string()))
    }
}

/// Handle `upload/photo`.
///
/// One upload at a time. The lock is released on every path once it has
/// been taken.
pub async fn handle_upload(req: &UploadPhotoReq, store: &StateStore, ctx: &PortfolioContext) {
    if session::credential(store).is_none() {
        debug!("upload requires a session");
        return;
    }
    if let Err(e) = validate_photo(&req.photo) {
        warn!(media_type = %req.photo.media_type, "upload rejected: {}", e);
        route::set_banner(store, Some(e.to_string()));
        return;
    }
    let acquired = store.update(UploadState::PATH, |state: &mut UploadState| {
        !std::mem::replace(&mut state.busy, true)
    });
    if !acquired {
        debug!("upload already in flight");
        return;
    }
    route::set_banner(store, None);

    let photo = &req.photo;
    let result = session::authorized(store, ctx, |credential| async move {
        ctx.backend.upload_photo(&credential, photo).await
    })
    .await;

    match result {
        Ok(updated) => {
            info!(avatar = ?updated.avatar_ref(), "photo uploaded");
            let mut edit = store.get_as::<EditState>(EditState::PATH).unwrap_or_default();
            if let Some(draft) = edit.draft.as_mut() {
                if draft.adopt_avatar(&updated) {
                    store.set(EditState::PATH, edit);
                }
            }
            content_handlers::replace_profile(store, updated);
        }
        Err(Rejection::SessionEnded) | Err(Rejection::NoCredential) => {}
        Err(Rejection::Api(e)) => {
            warn!("photo upload failed: {}", e);
            route::set_banner(store, Some(messages::UPLOAD_FAILED.to_string()));
        }
    }

    store.set(UploadState::PATH, UploadState { busy: false });
}
