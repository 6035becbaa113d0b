use std::sync::Arc;

use folio_client::PortfolioBackend;
use folio_kv::{KVStore, Slot};

/// Key the admin credential is persisted under.
pub const TOKEN_SLOT_KEY: &str = "portfolio_admin_token";

/// What handlers need beyond the state store.
pub struct PortfolioContext {
    pub backend: Arc<dyn PortfolioBackend>,
    pub token_slot: Slot,
    /// Whether the content load includes the project list.
    pub load_projects: bool,
}

impl PortfolioContext {
    pub fn new(backend: Arc<dyn PortfolioBackend>, kv: Arc<dyn KVStore>) -> Self {
        Self {
            backend,
            token_slot: Slot::new(kv, TOKEN_SLOT_KEY),
            load_projects: true,
        }
    }

    pub fn with_projects(mut self, enabled: bool) -> Self {
        self.load_projects = enabled;
        self
    }
}
