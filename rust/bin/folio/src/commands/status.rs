//! `folio status` — where the client stands.

use anyhow::Result;
use folio_portfolio::ContentState;

use crate::config::FolioConfig;

pub async fn status(config: &FolioConfig, verbose: bool) -> Result<()> {
    let portfolio = super::open(config, verbose).await?;
    portfolio.show_admin().await;

    let content = match portfolio.content() {
        ContentState::Ready(_) => "loaded".to_string(),
        ContentState::Failed { error } => error,
        other => format!("{:?}", other),
    };
    println!("server:   {}", config.server);
    println!("content:  {}", content);
    println!(
        "session:  {}",
        if portfolio.is_authorized() { "held" } else { "none" }
    );
    println!("view:     {:?}", portfolio.view());
    Ok(())
}
