//! Scripted backend and harness for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use folio_client::{
    ApiError, Credential, PhotoFile, PortfolioBackend, ProfileRecord, ProjectRecord, SocialLink,
};
use folio_kv::MemoryStore;
use tokio::sync::Notify;

use crate::Portfolio;

pub const USER: &str = "admin";
pub const PASSWORD: &str = "admin123";
pub const TOKEN: &str = "tok-1";

/// What the fake answers for one endpoint.
#[derive(Clone)]
pub enum Reply<T> {
    Ok(T),
    Fail(u16, &'static str),
    Unauthorized,
    Offline,
}

/// A real `reqwest::Error`, from a request that cannot be built.
async fn transport_error() -> ApiError {
    match reqwest::Client::new().get("not a url").send().await {
        Err(e) => ApiError::Network(e),
        Ok(_) => unreachable!("relative URL must not send"),
    }
}

impl<T: Clone> Reply<T> {
    async fn resolve(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Fail(status, body) => Err(ApiError::Server {
                status: *status,
                body: body.to_string(),
            }),
            Reply::Unauthorized => Err(ApiError::Unauthorized),
            Reply::Offline => Err(transport_error().await),
        }
    }
}

pub fn profile() -> ProfileRecord {
    ProfileRecord {
        id: "about".into(),
        headline: "Backend engineer".into(),
        summary: "old".into(),
        location: "Bengaluru".into(),
        avatar_url: None,
    }
}

pub fn links() -> Vec<SocialLink> {
    vec![SocialLink {
        id: "1".into(),
        label: "GitHub".into(),
        url: "https://github.com/me".into(),
        icon: Some("github".into()),
    }]
}

pub fn projects() -> Vec<ProjectRecord> {
    vec![ProjectRecord {
        id: "1".into(),
        title: "Ticketing".into(),
        description: None,
        github_url: None,
        live_url: None,
        tags: Some(vec!["Java".into()]),
    }]
}

pub struct FakeBackend {
    pub about: Mutex<Reply<ProfileRecord>>,
    pub links: Mutex<Reply<Vec<SocialLink>>>,
    pub projects: Mutex<Reply<Vec<ProjectRecord>>>,
    pub login: Mutex<Option<Reply<Credential>>>,
    /// `None` echoes the sent record back.
    pub update: Mutex<Option<Reply<ProfileRecord>>>,
    /// `None` returns the profile with a fresh avatar reference.
    pub upload: Mutex<Option<Reply<ProfileRecord>>>,
    /// While set, update and upload wait on it before answering.
    pub gate: Mutex<Option<Arc<Notify>>>,
    valid_token: Mutex<String>,
    calls: Mutex<Vec<&'static str>>,
    sent: Mutex<Vec<ProfileRecord>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            about: Mutex::new(Reply::Ok(profile())),
            links: Mutex::new(Reply::Ok(links())),
            projects: Mutex::new(Reply::Ok(projects())),
            login: Mutex::new(None),
            update: Mutex::new(None),
            upload: Mutex::new(None),
            gate: Mutex::new(None),
            valid_token: Mutex::new(TOKEN.to_string()),
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Records sent with `update_about`, in order.
    pub fn sent(&self) -> Vec<ProfileRecord> {
        self.sent.lock().unwrap().clone()
    }

    /// Make every token issued so far invalid.
    pub fn revoke(&self) {
        *self.valid_token.lock().unwrap() = "revoked".into();
    }

    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn record(&self, endpoint: &'static str) {
        self.calls.lock().unwrap().push(endpoint);
    }

    fn accepts(&self, credential: &Credential) -> bool {
        *self.valid_token.lock().unwrap() == credential.as_str()
    }

    async fn wait_gate(&self) {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl PortfolioBackend for FakeBackend {
    async fn fetch_about(&self) -> Result<ProfileRecord, ApiError> {
        self.record("about");
        let reply = self.about.lock().unwrap().clone();
        reply.resolve().await
    }

    async fn fetch_links(&self) -> Result<Vec<SocialLink>, ApiError> {
        self.record("links");
        let reply = self.links.lock().unwrap().clone();
        reply.resolve().await
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, ApiError> {
        self.record("projects");
        let reply = self.projects.lock().unwrap().clone();
        reply.resolve().await
    }

    async fn login(&self, username: &str, password: &str) -> Result<Credential, ApiError> {
        self.record("login");
        let scripted = self.login.lock().unwrap().clone();
        if let Some(reply) = scripted {
            return reply.resolve().await;
        }
        if username == USER && password == PASSWORD {
            Ok(Credential::new(TOKEN))
        } else {
            Err(ApiError::Unauthorized)
        }
    }

    async fn update_about(
        &self,
        credential: &Credential,
        about: &ProfileRecord,
    ) -> Result<ProfileRecord, ApiError> {
        self.record("update");
        self.sent.lock().unwrap().push(about.clone());
        self.wait_gate().await;
        if !self.accepts(credential) {
            return Err(ApiError::Unauthorized);
        }
        let scripted = self.update.lock().unwrap().clone();
        match scripted {
            Some(reply) => reply.resolve().await,
            None => Ok(about.clone()),
        }
    }

    async fn upload_photo(
        &self,
        credential: &Credential,
        photo: &PhotoFile,
    ) -> Result<ProfileRecord, ApiError> {
        self.record("upload");
        self.wait_gate().await;
        if !self.accepts(credential) {
            return Err(ApiError::Unauthorized);
        }
        let scripted = self.upload.lock().unwrap().clone();
        match scripted {
            Some(reply) => reply.resolve().await,
            None => Ok(ProfileRecord {
                avatar_url: Some(format!("/api/about/photo/{}", photo.file_name)),
                ..profile()
            }),
        }
    }
}

pub struct Harness {
    pub portfolio: Arc<Portfolio>,
    pub backend: Arc<FakeBackend>,
    pub kv: Arc<MemoryStore>,
}

impl Harness {
    pub fn new(backend: FakeBackend) -> Self {
        Self::with_kv(backend, Arc::new(MemoryStore::new()))
    }

    pub fn with_kv(backend: FakeBackend, kv: Arc<MemoryStore>) -> Self {
        let backend = Arc::new(backend);
        let portfolio = Portfolio::new(backend.clone(), kv.clone());
        Self {
            portfolio: Arc::new(portfolio),
            backend,
            kv,
        }
    }

    /// Initialized, on the public page.
    pub async fn started() -> Self {
        let h = Self::new(FakeBackend::default());
        h.portfolio.initialize().await;
        h
    }

    /// Initialized and logged in, on the admin page.
    pub async fn signed_in() -> Self {
        let h = Self::started().await;
        h.portfolio.show_login().await;
        h.portfolio.login(USER, PASSWORD).await;
        h
    }
}
