use advising_core::session::{Session, UserRole};
use anyhow::{Result, anyhow};

use super::Client;

pub fn set(
    client: &Client,
    token: String,
    role: &str,
    name: String,
    account_id: Option<String>,
) -> Result<()> {
    let role: UserRole = role.parse().map_err(|e: String| anyhow!(e))?;
    let mut session = Session::new(token, role, name);
    if let Some(id) = account_id {
        session = session.with_account_id(id);
    }
    client.ctx().sessions().save(&session)?;
    println!("✅ Session stored for {} ({})", session.display_name, session.role);
    Ok(())
}

pub fn show(client: &Client) -> Result<()> {
    let snapshot = client.ctx().sessions().snapshot()?;
    if !snapshot.has_token() {
        println!("No session stored.");
        return Ok(());
    }
    println!("role:       {}", snapshot.role.as_deref().unwrap_or("-"));
    println!("name:       {}", snapshot.display_name.as_deref().unwrap_or("-"));
    println!("account id: {}", snapshot.account_id.as_deref().unwrap_or("-"));
    Ok(())
}

pub async fn logout(client: &Client) -> Result<()> {
    client.ctx().logout().await?;
    println!("👋 Logged out");
    Ok(())
}

pub fn theme(client: &Client) -> Result<()> {
    let mode = client.ctx().sessions().theme()?;
    println!("{} {}", mode.toggle_label(), mode.as_str());
    Ok(())
}

pub async fn toggle_theme(client: &Client) -> Result<()> {
    let mode = client.ctx().toggle_theme().await?;
    println!("{} {}", mode.toggle_label(), mode.as_str());
    Ok(())
}
