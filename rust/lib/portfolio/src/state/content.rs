//! Public content — stored at `content/state`.

use folio_client::{ProfileRecord, ProjectRecord, SocialLink};
use serde::Serialize;

/// Everything the public page shows, exactly as the server returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicContent {
    pub profile: ProfileRecord,
    pub links: Vec<SocialLink>,
    /// `None` when the project list is not fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectRecord>>,
}

/// Load status of the public content.
///
/// There is no partially loaded variant: content is either complete and
/// trustworthy, or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum ContentState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready(PublicContent),
    Failed { error: String },
}

impl ContentState {
    pub const PATH: &'static str = "content/state";

    pub fn profile(&self) -> Option<&ProfileRecord> {
        match self {
            ContentState::Ready(content) => Some(&content.profile),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ContentState::Ready(_))
    }
}
