//! `folio show` — print the public content.

use anyhow::Result;
use folio_client::resolve_avatar_url;
use folio_portfolio::{ContentState, PublicContent};

use crate::config::FolioConfig;

pub async fn show(config: &FolioConfig, verbose: bool) -> Result<()> {
    let portfolio = super::open(config, verbose).await?;
    match portfolio.content() {
        ContentState::Ready(content) => {
            print_content(&content, &config.server);
            Ok(())
        }
        ContentState::Failed { error } => anyhow::bail!("{}", error),
        other => anyhow::bail!("content not loaded ({:?})", other),
    }
}

fn print_content(content: &PublicContent, server: &str) {
    let profile = &content.profile;
    println!("{}", profile.headline);
    println!("{}", profile.location);
    if let Some(avatar) = resolve_avatar_url(server, profile.avatar_ref()) {
        println!("photo: {}", avatar);
    }
    println!();
    println!("{}", profile.summary);

    if !content.links.is_empty() {
        println!();
        println!("Links:");
        for link in &content.links {
            println!("  {:<12} {}", link.label, link.url);
        }
    }

    if let Some(projects) = &content.projects {
        println!();
        println!("Projects:");
        for p in projects {
            let tags = p.tags.as_deref().unwrap_or_default().join(", ");
            if tags.is_empty() {
                println!("  {}", p.title);
            } else {
                println!("  {} [{}]", p.title, tags);
            }
            if let Some(desc) = &p.description {
                println!("    {}", desc);
            }
            for url in [&p.github_url, &p.live_url].into_iter().flatten() {
                println!("    {}", url);
            }
        }
    }
}
