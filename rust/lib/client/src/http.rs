//! `reqwest` implementation of [`PortfolioBackend`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::{ApiError, Credential, PhotoFile, PortfolioBackend, ProfileRecord, ProjectRecord, SocialLink};

/// Header the backend reads the admin credential from.
pub const ADMIN_TOKEN_HEADER: &str = "X-ADMIN-TOKEN";

/// Where the backend listens in a default local setup.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// HTTP backend rooted at an API base URL such as `http://localhost:8080/api`.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a response to `R`, turning 401 into `Unauthorized` and every
    /// other non-success status into `Server` with the body kept verbatim.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let resp = self.http.get(&url).send().await?;
        Self::parse(resp).await
    }
}

#[async_trait::async_trait]
impl PortfolioBackend for HttpBackend {
    async fn fetch_about(&self) -> Result<ProfileRecord, ApiError> {
        self.get("/about").await
    }

    async fn fetch_links(&self) -> Result<Vec<SocialLink>, ApiError> {
        self.get("/links").await
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, ApiError> {
        self.get("/projects").await
    }

    async fn login(&self, username: &str, password: &str) -> Result<Credential, ApiError> {
        let url = self.url("/auth/login");
        debug!("POST {} as {}", url, username);
        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;
        let lr: LoginResponse = Self::parse(resp).await?;
        Ok(Credential::new(lr.token))
    }

    async fn update_about(
        &self,
        credential: &Credential,
        about: &ProfileRecord,
    ) -> Result<ProfileRecord, ApiError> {
        let url = self.url("/about");
        debug!("PUT {}", url);
        let resp = self
            .http
            .put(&url)
            .header(ADMIN_TOKEN_HEADER, credential.as_str())
            .json(about)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn upload_photo(
        &self,
        credential: &Credential,
        photo: &PhotoFile,
    ) -> Result<ProfileRecord, ApiError> {
        let url = self.url("/about/photo");
        debug!("POST {} ({} bytes, {})", url, photo.bytes.len(), photo.media_type);
        let part = reqwest::multipart::Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.media_type)
            .map_err(|e| ApiError::InvalidRequest(format!("media type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let resp = self
            .http
            .post(&url)
            .header(ADMIN_TOKEN_HEADER, credential.as_str())
            .multipart(form)
            .send()
            .await?;
        Self::parse(resp).await
    }
}
