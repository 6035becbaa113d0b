//! Content handler implementations.

use folio_client::ProfileRecord;
use folio_flux::StateStore;
use tracing::{debug, warn};

use crate::context::PortfolioContext;
use crate::messages;
use crate::state::*;

/// Handle `content/load`.
///
/// The fetches run concurrently and are all awaited. Any failure discards
/// the others' results.
pub async fn handle_load(store: &StateStore, ctx: &PortfolioContext) {
    store.set(ContentState::PATH, ContentState::Loading);

    let backend = &ctx.backend;
    let projects = async {
        if ctx.load_projects {
            backend.fetch_projects().await.map(Some)
        } else {
            Ok(None)
        }
    };
    let (about, links, projects) =
        tokio::join!(backend.fetch_about(), backend.fetch_links(), projects);

    let next = match (about, links, projects) {
        (Ok(profile), Ok(links), Ok(projects)) => {
            debug!(
                links = links.len(),
                projects = ?projects.as_ref().map(Vec::len),
                "content loaded"
            );
            ContentState::Ready(PublicContent {
                profile,
                links,
                projects,
            })
        }
        (about, links, projects) => {
            for (what, err) in [
                ("about", about.err()),
                ("links", links.err()),
                ("projects", projects.err()),
            ] {
                if let Some(e) = err {
                    warn!("fetch {} failed: {}", what, e);
                }
            }
            ContentState::Failed {
                error: messages::LOAD_FAILED.to_string(),
            }
        }
    };
    store.set(ContentState::PATH, next);
}

/// Replace the stored profile with a record the server returned.
///
/// Only applies while content is `Ready`; there is no profile to replace
/// otherwise, and the record is dropped. The next load fetches it again.
pub fn replace_profile(store: &StateStore, profile: ProfileRecord) {
    match store.get_as::<ContentState>(ContentState::PATH) {
        Some(ContentState::Ready(mut content)) => {
            content.profile = profile;
            store.set(ContentState::PATH, ContentState::Ready(content));
        }
        _ => warn!(id = %profile.id, "no loaded content to update; server record dropped"),
    }
}
