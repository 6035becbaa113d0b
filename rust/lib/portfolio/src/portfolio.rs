use std::sync::Arc;

use folio_client::{Credential, PhotoFile, PortfolioBackend};
use folio_flux::{Flux, StateValue, SubscriptionId};
use folio_kv::KVStore;

use crate::context::PortfolioContext;
use crate::handlers;
use crate::request::*;
use crate::state::*;

/// The client core: one state store, the handlers that mutate it, and a
/// typed surface for presentations.
///
/// Every operation emits a request and returns once its handler finished;
/// the outcome is read back from state.
pub struct Portfolio {
    flux: Flux,
    ctx: Arc<PortfolioContext>,
}

impl Portfolio {
    pub fn new(backend: Arc<dyn PortfolioBackend>, kv: Arc<dyn KVStore>) -> Self {
        Self::with_context(PortfolioContext::new(backend, kv))
    }

    pub fn with_context(ctx: PortfolioContext) -> Self {
        let flux = Flux::new();
        let ctx = Arc::new(ctx);
        handlers::register_handlers(&flux, Arc::clone(&ctx));
        Self { flux, ctx }
    }

    // ── Operations ──────────────────────────────────────────────────

    pub async fn initialize(&self) {
        self.flux.emit(InitializeReq::PATH, InitializeReq).await;
    }

    pub async fn reload(&self) {
        self.flux.emit(LoadContentReq::PATH, LoadContentReq).await;
    }

    pub async fn show_login(&self) {
        self.flux.emit(ShowLoginReq::PATH, ShowLoginReq).await;
    }

    pub async fn show_admin(&self) {
        self.flux.emit(ShowAdminReq::PATH, ShowAdminReq).await;
    }

    pub async fn show_public(&self) {
        self.flux.emit(ShowPublicReq::PATH, ShowPublicReq).await;
    }

    pub async fn navigate(&self, section: impl Into<String>) {
        let req = NavigateReq {
            section: section.into(),
        };
        self.flux.emit(NavigateReq::PATH, req).await;
    }

    pub async fn dismiss_banner(&self) {
        self.flux.emit(DismissBannerReq::PATH, DismissBannerReq).await;
    }

    /// Log in; returns the credential now held, or `None` with the reason
    /// on the login form.
    pub async fn login(&self, username: &str, password: &str) -> Option<Credential> {
        let req = LoginReq {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.flux.emit(LoginReq::PATH, req).await;
        if self.login_form().error.is_some() {
            return None;
        }
        self.session().credential
    }

    pub async fn logout(&self) {
        self.flux.emit(LogoutReq::PATH, LogoutReq).await;
    }

    pub async fn begin_edit(&self) {
        self.flux.emit(BeginEditReq::PATH, BeginEditReq).await;
    }

    pub async fn edit_field(&self, field: ProfileField, value: impl Into<String>) {
        let req = EditFieldReq {
            field,
            value: value.into(),
        };
        self.flux.emit(EditFieldReq::PATH, req).await;
    }

    pub async fn cancel_edit(&self) {
        self.flux.emit(CancelEditReq::PATH, CancelEditReq).await;
    }

    pub async fn commit_edit(&self) {
        self.flux.emit(CommitEditReq::PATH, CommitEditReq).await;
    }

    pub async fn upload_photo(&self, photo: PhotoFile) {
        self.flux
            .emit(UploadPhotoReq::PATH, UploadPhotoReq { photo })
            .await;
    }

    // ── State ───────────────────────────────────────────────────────

    pub fn view(&self) -> View {
        handlers::route::current_view(self.flux.store())
    }

    pub fn content(&self) -> ContentState {
        self.flux.get_as(ContentState::PATH).unwrap_or_default()
    }

    pub fn session(&self) -> SessionState {
        self.flux.get_as(SessionState::PATH).unwrap_or_default()
    }

    pub fn is_authorized(&self) -> bool {
        self.session().is_authorized()
    }

    pub fn login_form(&self) -> LoginForm {
        self.flux.get_as(LoginForm::PATH).unwrap_or_default()
    }

    pub fn edit(&self) -> EditState {
        self.flux.get_as(EditState::PATH).unwrap_or_default()
    }

    pub fn upload(&self) -> UploadState {
        self.flux.get_as(UploadState::PATH).unwrap_or_default()
    }

    pub fn banner(&self) -> Option<String> {
        self.flux
            .get_as::<Banner>(Banner::PATH)
            .and_then(|b| b.message)
    }

    pub fn section(&self) -> Option<String> {
        self.flux.get_as::<Section>(Section::PATH).and_then(|s| s.0)
    }

    pub fn load_projects(&self) -> bool {
        self.ctx.load_projects
    }

    // ── Subscriptions ───────────────────────────────────────────────

    /// Observe state changes under `pattern` (e.g. `"#"`, `"edit/+"`).
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.flux.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.flux.unsubscribe(id)
    }

    pub fn flux(&self) -> &Flux {
        &self.flux
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use folio_client::{PhotoFile, ProfileRecord};
    use folio_kv::KVStore;

    use super::*;
    use crate::messages;
    use crate::testing::*;
    use crate::TOKEN_SLOT_KEY;

    fn saved_token(h: &Harness) -> Option<Vec<u8>> {
        h.kv.get(TOKEN_SLOT_KEY).unwrap()
    }

    fn ready(p: &Portfolio) -> PublicContent {
        match p.content() {
            ContentState::Ready(content) => content,
            other => panic!("expected ready content, got {:?}", other),
        }
    }

    fn png() -> PhotoFile {
        PhotoFile::new("me.png", "image/png", vec![1, 2, 3])
    }

    // ── Startup and content ─────────────────────────────────────────

    #[tokio::test]
    async fn startup_loads_everything_and_shows_public() {
        let h = Harness::started().await;
        let p = &h.portfolio;

        assert_eq!(p.view(), View::Public);
        let content = ready(p);
        assert_eq!(content.profile, profile());
        assert_eq!(content.links, links());
        assert_eq!(content.projects, Some(projects()));
        assert!(!p.is_authorized());
        assert_eq!(p.banner(), None);
    }

    #[tokio::test]
    async fn any_failed_fetch_fails_the_whole_load() {
        let cases: [(bool, bool, bool); 7] = [
            (false, true, true),
            (true, false, true),
            (true, true, false),
            (false, false, true),
            (false, true, false),
            (true, false, false),
            (false, false, false),
        ];
        for (about_ok, links_ok, projects_ok) in cases {
            let backend = FakeBackend::default();
            if !about_ok {
                *backend.about.lock().unwrap() = Reply::Fail(500, "");
            }
            if !links_ok {
                *backend.links.lock().unwrap() = Reply::Offline;
            }
            if !projects_ok {
                *backend.projects.lock().unwrap() = Reply::Fail(503, "down");
            }
            let h = Harness::new(backend);
            h.portfolio.initialize().await;

            assert_eq!(
                h.portfolio.content(),
                ContentState::Failed {
                    error: messages::LOAD_FAILED.to_string()
                }
            );
            // Resolved either way.
            assert_eq!(h.portfolio.view(), View::Public);
            // No short-circuit: every fetch was issued.
            assert_eq!(h.backend.total_calls(), 3);
        }
    }

    #[tokio::test]
    async fn projects_failure_discards_profile_and_links() {
        let backend = FakeBackend::default();
        *backend.about.lock().unwrap() = Reply::Ok(ProfileRecord {
            headline: "A".into(),
            ..Default::default()
        });
        *backend.links.lock().unwrap() = Reply::Ok(vec![]);
        *backend.projects.lock().unwrap() = Reply::Fail(500, "boom");
        let h = Harness::new(backend);
        h.portfolio.initialize().await;

        assert!(matches!(h.portfolio.content(), ContentState::Failed { .. }));
        assert_eq!(h.portfolio.content().profile(), None);
    }

    #[tokio::test]
    async fn projects_can_be_left_out() {
        let backend = Arc::new(FakeBackend::default());
        let kv = Arc::new(folio_kv::MemoryStore::new());
        let ctx = PortfolioContext::new(backend.clone(), kv).with_projects(false);
        let p = Portfolio::with_context(ctx);
        p.initialize().await;

        assert_eq!(ready(&p).projects, None);
        assert_eq!(backend.calls("projects"), 0);
        assert!(!p.load_projects());
    }

    #[tokio::test]
    async fn reload_replaces_content() {
        let h = Harness::started().await;
        *h.backend.links.lock().unwrap() = Reply::Ok(vec![]);
        h.portfolio.reload().await;
        assert!(ready(&h.portfolio).links.is_empty());

        *h.backend.about.lock().unwrap() = Reply::Offline;
        h.portfolio.reload().await;
        assert!(matches!(h.portfolio.content(), ContentState::Failed { .. }));
        assert_eq!(h.portfolio.view(), View::Public);
    }

    #[tokio::test]
    async fn section_navigation_only_on_public() {
        let h = Harness::started().await;
        let p = &h.portfolio;
        p.navigate("projects").await;
        assert_eq!(p.section().as_deref(), Some("projects"));
        assert_eq!(p.view(), View::Public);

        p.show_login().await;
        p.navigate("contact").await;
        assert_eq!(p.section().as_deref(), Some("projects"));
    }

    // ── Session ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn login_persists_and_opens_admin() {
        let h = Harness::started().await;
        let p = &h.portfolio;
        p.show_login().await;
        assert_eq!(p.view(), View::Login);

        let credential = p.login(USER, PASSWORD).await;
        assert_eq!(credential.as_ref().map(|c| c.as_str()), Some(TOKEN));
        assert_eq!(p.view(), View::Admin);
        assert_eq!(saved_token(&h), Some(TOKEN.as_bytes().to_vec()));
        assert_eq!(p.login_form(), LoginForm::default());
    }

    #[tokio::test]
    async fn wrong_password_stays_on_login() {
        let h = Harness::started().await;
        let p = &h.portfolio;
        p.show_login().await;

        assert!(p.login(USER, "wrong").await.is_none());
        assert_eq!(p.view(), View::Login);
        assert_eq!(p.login_form().error.as_deref(), Some(messages::INVALID_LOGIN));
        assert!(!p.login_form().busy);
        assert!(!p.is_authorized());
        assert_eq!(saved_token(&h), None);
        // Inline only; the banner is for everything else.
        assert_eq!(p.banner(), None);
    }

    #[tokio::test]
    async fn unreachable_login_says_so() {
        let backend = FakeBackend::default();
        *backend.login.lock().unwrap() = Some(Reply::Offline);
        let h = Harness::new(backend);
        h.portfolio.initialize().await;
        h.portfolio.show_login().await;

        assert!(h.portfolio.login(USER, PASSWORD).await.is_none());
        assert_eq!(
            h.portfolio.login_form().error.as_deref(),
            Some(messages::LOGIN_UNREACHABLE)
        );
    }

    #[tokio::test]
    async fn cancelling_login_returns_public() {
        let h = Harness::started().await;
        h.portfolio.show_login().await;
        h.portfolio.show_public().await;
        assert_eq!(h.portfolio.view(), View::Public);
        assert_eq!(h.backend.calls("login"), 0);
    }

    #[tokio::test]
    async fn admin_without_session_lands_on_login() {
        let h = Harness::started().await;
        h.portfolio.show_admin().await;
        assert_eq!(h.portfolio.view(), View::Login);
    }

    #[tokio::test]
    async fn saved_session_is_restored_without_a_call() {
        let kv = Arc::new(folio_kv::MemoryStore::new());
        kv.set(TOKEN_SLOT_KEY, TOKEN.as_bytes()).unwrap();
        let h = Harness::with_kv(FakeBackend::default(), kv);
        h.portfolio.initialize().await;

        assert!(h.portfolio.is_authorized());
        assert_eq!(h.backend.calls("login"), 0);
        h.portfolio.show_admin().await;
        assert_eq!(h.portfolio.view(), View::Admin);
    }

    #[tokio::test]
    async fn logout_clears_everything() {
        let h = Harness::signed_in().await;
        let p = &h.portfolio;
        p.begin_edit().await;
        p.logout().await;

        assert!(!p.is_authorized());
        assert_eq!(p.session().ended, Some(SessionEnd::Voluntary));
        assert_eq!(saved_token(&h), None);
        assert!(!p.edit().is_editing());
        assert_eq!(p.view(), View::Public);
        assert_eq!(p.banner(), None);
    }

    #[tokio::test]
    async fn restored_stale_session_expires_on_first_mutation() {
        let kv = Arc::new(folio_kv::MemoryStore::new());
        kv.set(TOKEN_SLOT_KEY, b"from-last-week").unwrap();
        let h = Harness::with_kv(FakeBackend::default(), kv);
        let p = &h.portfolio;
        p.initialize().await;
        p.show_admin().await;
        p.begin_edit().await;
        p.commit_edit().await;

        assert_eq!(p.view(), View::Login);
        assert_eq!(p.banner().as_deref(), Some(messages::SESSION_EXPIRED));
        assert_eq!(saved_token(&h), None);
    }

    // ── Editing ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn begin_then_cancel_changes_nothing() {
        let h = Harness::signed_in().await;
        let p = &h.portfolio;
        let before = p.content();
        let calls = h.backend.total_calls();

        p.begin_edit().await;
        p.edit_field(ProfileField::Headline, "scratch").await;
        p.cancel_edit().await;

        assert_eq!(p.content(), before);
        assert_eq!(h.backend.total_calls(), calls);
        assert!(!p.edit().is_editing());
    }

    #[tokio::test]
    async fn begin_requires_session_and_content() {
        let h = Harness::started().await;
        h.portfolio.begin_edit().await;
        assert!(!h.portfolio.edit().is_editing());

        let backend = FakeBackend::default();
        *backend.about.lock().unwrap() = Reply::Fail(500, "");
        let kv = Arc::new(folio_kv::MemoryStore::new());
        kv.set(TOKEN_SLOT_KEY, TOKEN.as_bytes()).unwrap();
        let h = Harness::with_kv(backend, kv);
        h.portfolio.initialize().await;
        h.portfolio.begin_edit().await;
        assert!(!h.portfolio.edit().is_editing());
    }

    #[tokio::test]
    async fn editing_without_draft_is_ignored() {
        let h = Harness::signed_in().await;
        h.portfolio.edit_field(ProfileField::Summary, "x").await;
        assert_eq!(h.portfolio.edit(), EditState::default());
        h.portfolio.commit_edit().await;
        assert_eq!(h.backend.calls("update"), 0);
    }

    #[tokio::test]
    async fn commit_stores_server_record() {
        let backend = FakeBackend::default();
        *backend.update.lock().unwrap() = Some(Reply::Ok(ProfileRecord {
            summary: "new (normalized)".into(),
            ..profile()
        }));
        let h = Harness::new(backend);
        let p = &h.portfolio;
        p.initialize().await;
        p.show_login().await;
        p.login(USER, PASSWORD).await;

        p.begin_edit().await;
        p.edit_field(ProfileField::Summary, "new").await;
        p.commit_edit().await;

        assert_eq!(h.backend.sent()[0].summary, "new");
        assert_eq!(ready(p).profile.summary, "new (normalized)");
        assert_eq!(p.edit(), EditState::default());
        assert_eq!(p.banner(), None);
        assert_eq!(p.view(), View::Admin);
    }

    #[tokio::test]
    async fn commit_sends_the_full_draft() {
        let h = Harness::signed_in().await;
        let p = &h.portfolio;
        p.begin_edit().await;
        p.edit_field(ProfileField::Headline, "Staff engineer").await;
        p.edit_field(ProfileField::Location, "Remote").await;
        p.commit_edit().await;

        let sent = &h.backend.sent()[0];
        assert_eq!(sent.id, "about");
        assert_eq!(sent.headline, "Staff engineer");
        assert_eq!(sent.summary, "old");
        assert_eq!(sent.location, "Remote");
    }

    #[tokio::test]
    async fn rejected_commit_keeps_draft_and_shows_server_message() {
        let backend = FakeBackend::default();
        *backend.update.lock().unwrap() = Some(Reply::Fail(400, r#"{"error":"too long"}"#));
        let h = Harness::new(backend);
        let p = &h.portfolio;
        p.initialize().await;
        p.show_login().await;
        p.login(USER, PASSWORD).await;

        p.begin_edit().await;
        p.edit_field(ProfileField::Summary, "x".repeat(5000)).await;
        p.commit_edit().await;

        assert_eq!(p.banner().as_deref(), Some("too long"));
        let edit = p.edit();
        assert!(!edit.saving);
        assert_eq!(edit.draft.map(|d| d.record().summary.len()), Some(5000));
        assert_eq!(ready(p).profile.summary, "old");
        assert!(p.is_authorized());
    }

    #[tokio::test]
    async fn commit_failure_messages() {
        for (reply, expected) in [
            (Reply::Fail(500, r#"{"message":"db down"}"#), "db down"),
            (Reply::Fail(502, "Bad Gateway"), "Bad Gateway"),
            (Reply::Fail(500, ""), messages::SAVE_FAILED),
            (Reply::Offline, messages::SAVE_FAILED),
        ] {
            let backend = FakeBackend::default();
            *backend.update.lock().unwrap() = Some(reply);
            let h = Harness::new(backend);
            let p = &h.portfolio;
            p.initialize().await;
            p.show_login().await;
            p.login(USER, PASSWORD).await;
            p.begin_edit().await;
            p.commit_edit().await;

            assert_eq!(p.banner().as_deref(), Some(expected));
            assert!(p.edit().is_editing());
        }
    }

    #[tokio::test]
    async fn expired_commit_forces_login() {
        let h = Harness::signed_in().await;
        let p = &h.portfolio;
        p.begin_edit().await;
        p.edit_field(ProfileField::Summary, "unsaved").await;
        h.backend.revoke();
        p.commit_edit().await;

        assert_eq!(p.view(), View::Login);
        assert_eq!(p.banner().as_deref(), Some(messages::SESSION_EXPIRED));
        assert_eq!(p.login_form().error, None);
        assert_eq!(p.session().ended, Some(SessionEnd::Forced));
        assert!(!p.edit().is_editing());
        assert_eq!(saved_token(&h), None);
        assert_eq!(ready(p).profile.summary, "old");
    }

    #[tokio::test]
    async fn second_commit_while_saving_is_ignored() {
        let h = Harness::signed_in().await;
        let p = Arc::clone(&h.portfolio);
        p.begin_edit().await;
        let gate = h.backend.hold();

        let first = tokio::spawn({
            let p = Arc::clone(&p);
            async move { p.commit_edit().await }
        });
        while !p.edit().saving {
            tokio::task::yield_now().await;
        }
        p.commit_edit().await;
        assert_eq!(h.backend.calls("update"), 1);

        gate.notify_one();
        first.await.unwrap();
        assert!(!p.edit().saving);
        assert_eq!(h.backend.calls("update"), 1);
    }

    #[tokio::test]
    async fn late_commit_result_does_not_resurrect_draft() {
        let h = Harness::signed_in().await;
        let p = Arc::clone(&h.portfolio);
        p.begin_edit().await;
        p.edit_field(ProfileField::Summary, "late").await;
        let gate = h.backend.hold();

        let commit = tokio::spawn({
            let p = Arc::clone(&p);
            async move { p.commit_edit().await }
        });
        while !p.edit().saving {
            tokio::task::yield_now().await;
        }
        p.cancel_edit().await;

        gate.notify_one();
        commit.await.unwrap();
        assert!(!p.edit().is_editing());
        // The server accepted it, so content follows the server.
        assert_eq!(ready(&p).profile.summary, "late");
    }

    #[tokio::test]
    async fn edits_typed_while_saving_stay_open() {
        let h = Harness::signed_in().await;
        let p = Arc::clone(&h.portfolio);
        p.begin_edit().await;
        p.edit_field(ProfileField::Summary, "first").await;
        let gate = h.backend.hold();

        let commit = tokio::spawn({
            let p = Arc::clone(&p);
            async move { p.commit_edit().await }
        });
        while !p.edit().saving {
            tokio::task::yield_now().await;
        }
        p.edit_field(ProfileField::Location, "Pune").await;

        gate.notify_one();
        commit.await.unwrap();
        let edit = p.edit();
        assert!(!edit.saving);
        let draft = edit.draft.expect("draft kept");
        assert_eq!(draft.record().location, "Pune");
        assert_eq!(draft.record().summary, "first");

        let content = ready(&p);
        assert_eq!(content.profile.summary, "first");
        assert_eq!(content.profile.location, "Bengaluru");
        assert_eq!(h.backend.sent().len(), 1);
    }

    #[tokio::test]
    async fn draft_begun_after_cancel_survives_the_late_save() {
        let h = Harness::signed_in().await;
        let p = Arc::clone(&h.portfolio);
        p.begin_edit().await;
        p.edit_field(ProfileField::Summary, "first").await;
        let gate = h.backend.hold();

        let commit = tokio::spawn({
            let p = Arc::clone(&p);
            async move { p.commit_edit().await }
        });
        while !p.edit().saving {
            tokio::task::yield_now().await;
        }
        p.cancel_edit().await;
        p.begin_edit().await;
        p.edit_field(ProfileField::Headline, "second draft").await;
        assert!(p.edit().saving);

        // Still one save at a time.
        p.commit_edit().await;
        assert_eq!(h.backend.calls("update"), 1);

        gate.notify_one();
        commit.await.unwrap();
        let edit = p.edit();
        assert!(!edit.saving);
        assert_eq!(
            edit.draft.expect("new draft kept").record().headline,
            "second draft"
        );
        assert_eq!(ready(&p).profile.summary, "first");
    }

    // ── Uploads ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn non_image_is_rejected_locally() {
        let h = Harness::signed_in().await;
        let calls = h.backend.total_calls();
        h.portfolio
            .upload_photo(PhotoFile::new("cv.pdf", "application/pdf", vec![1]))
            .await;

        assert_eq!(h.backend.total_calls(), calls);
        assert_eq!(h.portfolio.banner().as_deref(), Some(messages::NOT_AN_IMAGE));
        assert!(!h.portfolio.upload().busy);
    }

    #[tokio::test]
    async fn upload_without_session_does_nothing() {
        let h = Harness::started().await;
        h.portfolio.upload_photo(png()).await;
        assert_eq!(h.backend.calls("upload"), 0);
        assert_eq!(h.portfolio.banner(), None);
    }

    #[tokio::test]
    async fn upload_replaces_profile() {
        let h = Harness::signed_in().await;
        h.portfolio.upload_photo(png()).await;

        assert_eq!(
            ready(&h.portfolio).profile.avatar_ref(),
            Some("/api/about/photo/me.png")
        );
        assert!(!h.portfolio.upload().busy);
    }

    #[tokio::test]
    async fn upload_during_edit_only_touches_avatar() {
        let h = Harness::signed_in().await;
        let p = &h.portfolio;
        p.begin_edit().await;
        p.edit_field(ProfileField::Headline, "draft headline").await;
        p.upload_photo(png()).await;

        let draft = p.edit().draft.unwrap();
        assert_eq!(draft.record().headline, "draft headline");
        assert_eq!(draft.record().avatar_ref(), Some("/api/about/photo/me.png"));
        assert_eq!(ready(p).profile.headline, "Backend engineer");
    }

    #[tokio::test]
    async fn upload_for_other_record_leaves_draft() {
        let backend = FakeBackend::default();
        *backend.upload.lock().unwrap() = Some(Reply::Ok(ProfileRecord {
            id: "other".into(),
            avatar_url: Some("/x.png".into()),
            ..profile()
        }));
        let h = Harness::new(backend);
        let p = &h.portfolio;
        p.initialize().await;
        p.show_login().await;
        p.login(USER, PASSWORD).await;
        p.begin_edit().await;
        p.upload_photo(png()).await;

        assert_eq!(p.edit().draft.unwrap().record().avatar_url, None);
    }

    #[tokio::test]
    async fn failed_upload_changes_nothing() {
        let backend = FakeBackend::default();
        *backend.upload.lock().unwrap() = Some(Reply::Fail(413, "too big"));
        let h = Harness::new(backend);
        let p = &h.portfolio;
        p.initialize().await;
        p.show_login().await;
        p.login(USER, PASSWORD).await;
        let before = p.content();
        p.upload_photo(png()).await;

        assert_eq!(p.banner().as_deref(), Some(messages::UPLOAD_FAILED));
        assert_eq!(p.content(), before);
        assert!(!p.upload().busy);
        assert!(p.is_authorized());
    }

    #[tokio::test]
    async fn expired_upload_forces_login() {
        let h = Harness::signed_in().await;
        h.backend.revoke();
        h.portfolio.upload_photo(png()).await;

        assert_eq!(h.portfolio.view(), View::Login);
        assert_eq!(h.portfolio.banner().as_deref(), Some(messages::SESSION_EXPIRED));
        assert_eq!(saved_token(&h), None);
        assert!(!h.portfolio.upload().busy);
    }

    #[tokio::test]
    async fn overlapping_upload_is_refused() {
        let h = Harness::signed_in().await;
        let p = Arc::clone(&h.portfolio);
        let gate = h.backend.hold();

        let first = tokio::spawn({
            let p = Arc::clone(&p);
            async move { p.upload_photo(png()).await }
        });
        while !p.upload().busy {
            tokio::task::yield_now().await;
        }
        p.upload_photo(PhotoFile::new("two.jpg", "image/jpeg", vec![9]))
            .await;
        assert_eq!(h.backend.calls("upload"), 1);

        gate.notify_one();
        first.await.unwrap();
        assert!(!p.upload().busy);
        assert_eq!(
            ready(&p).profile.avatar_ref(),
            Some("/api/about/photo/me.png")
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_uploads_take_the_lock_once() {
        let h = Harness::signed_in().await;
        let gate = h.backend.hold();

        let uploads: Vec<_> = (0..8)
            .map(|_| {
                let p = Arc::clone(&h.portfolio);
                tokio::spawn(async move { p.upload_photo(png()).await })
            })
            .collect();
        // Everyone but the lock holder returns straight away.
        while uploads.iter().filter(|u| u.is_finished()).count() < 7 {
            tokio::task::yield_now().await;
        }

        gate.notify_one();
        for upload in uploads {
            upload.await.unwrap();
        }
        assert_eq!(h.backend.calls("upload"), 1);
        assert!(!h.portfolio.upload().busy);
    }

    // ── Subscriptions ───────────────────────────────────────────────

    #[tokio::test]
    async fn subscribers_see_state_changes() {
        let h = Harness::started().await;
        let seen = Arc::new(AtomicUsize::new(0));
        let id = h.portfolio.subscribe("auth/#", {
            let seen = Arc::clone(&seen);
            move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        h.portfolio.show_login().await;
        h.portfolio.login(USER, PASSWORD).await;
        assert!(seen.load(Ordering::SeqCst) >= 2);

        assert!(h.portfolio.unsubscribe(id));
        let before = seen.load(Ordering::SeqCst);
        h.portfolio.logout().await;
        assert_eq!(seen.load(Ordering::SeqCst), before);
    }
}
