//! Hash password command handler

use crate::config::Config;
use crate::constants::auth::MIN_PASSWORD_LEN;
use crate::services::credentials::hash_password_blocking;

pub async fn cmd_hash_password(config: &Config, password: &str) -> anyhow::Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        anyhow::bail!("Password must be at least {MIN_PASSWORD_LEN} characters");
    }

    let hash = hash_password_blocking(password, &config.security).await?;
    println!("{hash}");
    Ok(())
}
