//! `folio config set`.

use std::path::Path;

use anyhow::Result;

use crate::config::FolioConfig;

pub fn set(server: Option<&str>, projects: Option<bool>, config_path: &Path) -> Result<()> {
    if server.is_none() && projects.is_none() {
        anyhow::bail!("Nothing to set. Pass --server and/or --projects.");
    }
    let mut config = FolioConfig::load(config_path)?;
    if let Some(server) = server {
        if !server.starts_with("http://") && !server.starts_with("https://") {
            anyhow::bail!("Server must be an http(s) URL, got \"{}\".", server);
        }
        config.server = server.trim_end_matches('/').to_string();
    }
    if let Some(projects) = projects {
        config.projects = projects;
    }
    config.save(config_path)?;
    println!("Saved {}.", config_path.display());
    Ok(())
}
