use anyhow::Context;
use content::Content;
use tracing::info;

use crate::password;

pub const DEFAULT_USERNAME: &str = "admin";

/// Creates the `admin` account with a random password when no user exists
/// yet. Returns the generated password, which is also logged once.
pub async fn ensure_admin(content: &Content) -> anyhow::Result<Option<String>> {
    let is_empty = content
        .users
        .is_empty()
        .await
        .context("failed to count users")?;
    if !is_empty {
        return Ok(None);
    }

    let password = password::generate(12);
    let password_hash = password::hash(&password)?;
    let user = content
        .users
        .create(DEFAULT_USERNAME, password_hash)
        .await
        .context("failed to create default user")?;

    info!(
        task = "bootstrap",
        username = user.username,
        password,
        "created default user"
    );

    Ok(Some(password))
}
