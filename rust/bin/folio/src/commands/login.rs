//! Login / logout commands.

use anyhow::Result;

use crate::config::FolioConfig;

pub async fn login(config: &FolioConfig, username: &str, password: &str, verbose: bool) -> Result<()> {
    let portfolio = super::open(config, verbose).await?;
    portfolio.show_login().await;
    if portfolio.login(username, password).await.is_none() {
        let form = portfolio.login_form();
        anyhow::bail!("{}", form.error.unwrap_or_else(|| "Login failed".to_string()));
    }
    println!("Logged in as {}.", username);
    println!("Session saved to {}.", config.session_db_path().display());
    Ok(())
}

pub async fn logout(config: &FolioConfig, verbose: bool) -> Result<()> {
    let portfolio = super::open(config, verbose).await?;
    if !portfolio.is_authorized() {
        println!("Not logged in.");
        return Ok(());
    }
    portfolio.logout().await;
    println!("Logged out.");
    Ok(())
}
