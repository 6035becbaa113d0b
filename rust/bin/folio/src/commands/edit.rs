//! `folio edit` and `folio photo` — admin mutations.

use std::path::Path;

use anyhow::Result;
use folio_client::{resolve_avatar_url, PhotoFile};
use folio_portfolio::{Portfolio, ProfileField, View};

use crate::config::FolioConfig;

/// Fields to change; `None` leaves a field as it is.
#[derive(Debug, Default)]
pub struct ProfileEdits {
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
}

impl ProfileEdits {
    fn is_empty(&self) -> bool {
        self.headline.is_none() && self.summary.is_none() && self.location.is_none()
    }
}

async fn open_admin(config: &FolioConfig, verbose: bool) -> Result<Portfolio> {
    let portfolio = super::open(config, verbose).await?;
    portfolio.show_admin().await;
    if portfolio.view() != View::Admin {
        anyhow::bail!("Not logged in. Run `folio login`.");
    }
    Ok(portfolio)
}

/// The session died during the command: the core already cleared it.
fn check_session(portfolio: &Portfolio) -> Result<()> {
    if portfolio.view() == View::Login {
        let msg = portfolio.banner().unwrap_or_default();
        anyhow::bail!("{} Run `folio login`.", msg);
    }
    Ok(())
}

pub async fn edit(config: &FolioConfig, edits: ProfileEdits, verbose: bool) -> Result<()> {
    if edits.is_empty() {
        anyhow::bail!("Nothing to change. Pass --headline, --summary or --location.");
    }
    let portfolio = open_admin(config, verbose).await?;
    portfolio.begin_edit().await;
    if !portfolio.edit().is_editing() {
        let reason = portfolio.content().profile().map_or("profile not loaded", |_| "cannot edit");
        anyhow::bail!("{}", reason);
    }

    for (field, value) in [
        (ProfileField::Headline, edits.headline),
        (ProfileField::Summary, edits.summary),
        (ProfileField::Location, edits.location),
    ] {
        if let Some(value) = value {
            portfolio.edit_field(field, value).await;
        }
    }
    portfolio.commit_edit().await;

    check_session(&portfolio)?;
    if portfolio.edit().is_editing() {
        anyhow::bail!("{}", portfolio.banner().unwrap_or_default());
    }
    if let Some(profile) = portfolio.content().profile() {
        println!("Saved.");
        println!("  headline: {}", profile.headline);
        println!("  summary:  {}", profile.summary);
        println!("  location: {}", profile.location);
    }
    Ok(())
}

/// Media type from the file extension. Unknown extensions get a non-image
/// type so the upload is refused before anything is sent.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub async fn photo(config: &FolioConfig, path: &Path, verbose: bool) -> Result<()> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    let photo = PhotoFile::new(file_name, media_type_for(path), bytes);

    let portfolio = open_admin(config, verbose).await?;
    portfolio.upload_photo(photo).await;

    check_session(&portfolio)?;
    if let Some(msg) = portfolio.banner() {
        anyhow::bail!("{}", msg);
    }
    let avatar = portfolio
        .content()
        .profile()
        .and_then(|p| resolve_avatar_url(&config.server, p.avatar_ref()));
    match avatar {
        Some(url) => println!("Photo updated: {}", url),
        None => println!("Photo updated."),
    }
    Ok(())
}
