//! CLI auth command handlers for login, status, and logout.

use crate::auth::{FileTokenStore, TokenStore};
use crate::config::GraphConfig;

use super::build_publisher;

/// Handle `graphpub auth login`.
pub async fn handle_login(config: &GraphConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (store, publisher) = build_publisher(config)?;
    let token = publisher.authorize().await?;
    println!("✅ Authorized. Token saved to {}", store.path().display());
    if !token.never_expires() {
        println!("   Expires in {}s", token.expires_in);
    }
    Ok(())
}

/// Handle `graphpub auth status`.
pub async fn handle_status(config: &GraphConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileTokenStore::new(config.token_file.clone());
    println!("{}", status_line(&store));
    Ok(())
}

/// Handle `graphpub auth logout`.
pub async fn handle_logout(config: &GraphConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileTokenStore::new(config.token_file.clone());
    store.clear()?;
    println!("✅ Token removed from {}", store.path().display());
    Ok(())
}

fn status_line(store: &FileTokenStore) -> String {
    match store.load() {
        Some(_) => {
            let saved = store
                .saved_at()
                .map(|at| format!(" (saved {})", at.format("%Y-%m-%d %H:%M:%S UTC")))
                .unwrap_or_default();
            format!("✅ Token present at {}{saved}", store.path().display())
        }
        None => format!("❌ No token at {}", store.path().display()),
    }
}
