pub mod config;
pub mod edit;
pub mod login;
pub mod show;
pub mod status;

use std::sync::Arc;

use anyhow::Result;
use folio_client::HttpBackend;
use folio_kv::RedbStore;
use folio_portfolio::{Portfolio, PortfolioContext};
use tracing::debug;

use crate::config::FolioConfig;

/// Build the client core from config and run its startup.
pub async fn open(config: &FolioConfig, verbose: bool) -> Result<Portfolio> {
    let db = config.session_db_path();
    debug!(server = %config.server, db = %db.display(), "opening portfolio");
    let kv = RedbStore::open(&db)?;
    let backend = HttpBackend::new(&config.server);
    let ctx = PortfolioContext::new(Arc::new(backend), Arc::new(kv)).with_projects(config.projects);
    let portfolio = Portfolio::with_context(ctx);

    if verbose {
        portfolio.subscribe("#", |path, _| eprintln!("  ~ {}", path));
    }
    portfolio.initialize().await;
    Ok(portfolio)
}
