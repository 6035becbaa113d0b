//! Session state — stored at `auth/session` and `auth/form`.

use folio_client::Credential;
use serde::Serialize;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionEnd {
    /// The backend rejected the credential.
    Forced,
    /// The user logged out.
    Voluntary,
}

/// The held credential, if any. Its presence is the only authorization signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(skip)]
    pub credential: Option<Credential>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended: Option<SessionEnd>,
}

impl SessionState {
    pub const PATH: &'static str = "auth/session";

    pub fn signed_in(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
            ended: None,
        }
    }

    pub fn ended(reason: SessionEnd) -> Self {
        Self {
            credential: None,
            ended: Some(reason),
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.credential.is_some()
    }
}

/// Login form status. Failures show here, inline, never on the banner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginForm {
    pub const PATH: &'static str = "auth/form";
}
