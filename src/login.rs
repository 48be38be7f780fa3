use anyhow::{Result, anyhow};

use crate::api::ApiClient;
use crate::config::Config;
use crate::menu_utils::Dialog;
use crate::ui::prelude::*;

/// Authenticate against the backend and store the returned token in the
/// config file for the management screens to use.
pub async fn handle_login(server: Option<String>) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(server) = server {
        config.server = server.trim_end_matches('/').to_string();
    }

    emit(
        Level::Info,
        "login.server",
        &format!("Logging in to {}", config.server),
        None,
    );

    let account = Dialog::builder()
        .prompt("Account (blank to cancel)")
        .allow_empty()
        .input_dialog()?;
    if account.is_empty() {
        emit(Level::Info, "login.cancelled", "Login cancelled.", None);
        return Ok(());
    }
    let password = Dialog::builder().prompt("Password").password_dialog()?;

    let client = ApiClient::new(&config.server, None)?;
    let token = client
        .login(&account, &password)
        .await
        .map_err(|err| anyhow!("login failed: {}", err.notification()))?;

    config.token = Some(token);
    config.save()?;

    emit(
        Level::Success,
        "login.ok",
        &format!("Logged in as {account}."),
        None,
    );
    Ok(())
}
