//! Profile edit handler implementations.

use folio_flux::StateStore;
use tracing::{debug, info, warn};

use crate::context::PortfolioContext;
use crate::handlers::session::{self, Rejection};
use crate::handlers::{content_handlers, route};
use crate::messages;
use crate::request::*;
use crate::state::*;

fn edit_state(store: &StateStore) -> EditState {
    store.get_as::<EditState>(EditState::PATH).unwrap_or_default()
}

/// Handle `edit/begin`. Replaces any draft already open.
///
/// A save still in flight keeps its `saving` flag, so a new draft cannot be
/// committed until that save settles.
pub async fn handle_begin(store: &StateStore) {
    if session::credential(store).is_none() {
        debug!("edit requires a session");
        return;
    }
    let Some(ContentState::Ready(content)) = store.get_as::<ContentState>(ContentState::PATH)
    else {
        debug!("edit requires loaded content");
        return;
    };
    let draft = Draft::seed(&content.profile);
    store.update(EditState::PATH, |state: &mut EditState| {
        state.draft = Some(draft);
    });
}

/// Handle `edit/field`.
pub async fn handle_field(req: &EditFieldReq, store: &StateStore) {
    let applied = store.update(EditState::PATH, |state: &mut EditState| {
        match state.draft.as_mut() {
            Some(draft) => {
                draft.apply(req.field, req.value.clone());
                true
            }
            None => false,
        }
    });
    if !applied {
        debug!(field = ?req.field, "no draft to edit");
    }
}

/// Handle `edit/cancel`. Drops the draft; an in-flight save is not aborted.
pub async fn handle_cancel(store: &StateStore) {
    store.update(EditState::PATH, |state: &mut EditState| {
        state.draft = None;
    });
}

/// Handle `edit/commit`.
///
/// On success the content takes the record the server returned, not the
/// draft. The draft is closed only if it is still exactly what was sent;
/// edits made while the request was out stay open. On failure the draft
/// stays open for another try.
pub async fn handle_commit(store: &StateStore, ctx: &PortfolioContext) {
    if session::credential(store).is_none() {
        debug!("commit requires a session");
        return;
    }
    let claimed = store.update(
        EditState::PATH,
        |state: &mut EditState| -> Result<Draft, &'static str> {
            if state.saving {
                return Err("commit already in flight");
            }
            let draft = state.draft.clone().ok_or("no draft to commit")?;
            state.saving = true;
            Ok(draft)
        },
    );
    let sent = match claimed {
        Ok(draft) => draft,
        Err(reason) => {
            debug!("{}", reason);
            return;
        }
    };
    route::set_banner(store, None);

    let record = sent.record();
    let result = session::authorized(store, ctx, |credential| async move {
        ctx.backend.update_about(&credential, record).await
    })
    .await;

    match result {
        Ok(saved) => {
            info!(id = %saved.id, "profile saved");
            content_handlers::replace_profile(store, saved);
            store.update(EditState::PATH, |state: &mut EditState| {
                if state.draft.as_ref() == Some(&sent) {
                    state.draft = None;
                } else if state.draft.is_some() {
                    debug!("draft changed while saving; keeping it open");
                }
                state.saving = false;
            });
        }
        // Forced invalidation already discarded the draft.
        Err(Rejection::SessionEnded) => {}
        Err(Rejection::NoCredential) => {
            debug!("session gone before the save was sent");
            release(store);
        }
        Err(Rejection::Api(e)) => {
            warn!("profile save failed: {}", e);
            route::set_banner(store, Some(e.display_message(messages::SAVE_FAILED)));
            release(store);
        }
    }
}

fn release(store: &StateStore) {
    store.update(EditState::PATH, |state: &mut EditState| state.saving = false);
}
