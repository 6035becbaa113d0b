//! Typed client for the portfolio backend.
//!
//! The client core talks to the backend only through [`PortfolioBackend`].
//! [`HttpBackend`] is the real implementation over `reqwest`; tests swap in
//! scripted backends.
//!
//! # Usage
//!
//! ```ignore
//! use folio_client::{HttpBackend, PortfolioBackend};
//!
//! let backend = HttpBackend::new("http://localhost:8080/api");
//! let about = backend.fetch_about().await?;
//! let credential = backend.login("admin", "secret").await?;
//! let saved = backend.update_about(&credential, &about).await?;
//! ```

pub mod avatar;
pub mod http;
pub mod model;

pub use avatar::{api_origin, resolve_avatar_url};
pub use http::{HttpBackend, ADMIN_TOKEN_HEADER, DEFAULT_BASE_URL};
pub use model::{PhotoFile, ProfileRecord, ProjectRecord, SocialLink};

// ── Error ───────────────────────────────────────────────────────────

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend could not be reached.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// 401 — the credential was missing, wrong or expired.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    #[error("decode: {0}")]
    Decode(String),

    /// The request could not be built (e.g. malformed media type).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Human-readable message for display.
    ///
    /// For server errors the body is searched for a structured `message`,
    /// then `error` field; failing that the raw body text is used; an empty
    /// body yields `fallback`. Every other error yields `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { body, .. } => extract_message(body, fallback),
            _ => fallback.to_string(),
        }
    }
}

/// Pull a readable message out of an error response body.
pub fn extract_message(body: &str, fallback: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = map.get(key).and_then(|v| v.as_str()) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    if body.trim().is_empty() {
        fallback.to_string()
    } else {
        body.to_string()
    }
}

// ── Credential ──────────────────────────────────────────────────────

/// Opaque admin token. Carries no expiry; a 401 is the only sign it died.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

// ── Backend ─────────────────────────────────────────────────────────

/// The HTTP contract the backend must satisfy.
///
/// Public reads need no credential. Mutations take one and must report an
/// authorization rejection as [`ApiError::Unauthorized`].
#[async_trait::async_trait]
pub trait PortfolioBackend: Send + Sync + 'static {
    /// `GET /about`
    async fn fetch_about(&self) -> Result<ProfileRecord, ApiError>;

    /// `GET /links`
    async fn fetch_links(&self) -> Result<Vec<SocialLink>, ApiError>;

    /// `GET /projects`
    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, ApiError>;

    /// `POST /auth/login`
    async fn login(&self, username: &str, password: &str) -> Result<Credential, ApiError>;

    /// `PUT /about` — returns the record as the server stored it.
    async fn update_about(
        &self,
        credential: &Credential,
        about: &ProfileRecord,
    ) -> Result<ProfileRecord, ApiError>;

    /// `POST /about/photo` — returns the updated record.
    async fn upload_photo(
        &self,
        credential: &Credential,
        photo: &PhotoFile,
    ) -> Result<ProfileRecord, ApiError>;
}
