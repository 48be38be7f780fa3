use anyhow::{Context, Result, bail};

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::ui::prelude::*;

/// Shared state for the management screens: the REST client, the loaded
/// config, and the notification helpers.
pub struct AdminContext {
    api: ApiClient,
    config: Config,
}

impl AdminContext {
    /// Build a context from the stored config. Management screens require
    /// a token; `kbctl login` writes one.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        if config.token.is_none() {
            bail!("not logged in; run `kbctl login` first");
        }
        let api = ApiClient::new(&config.server, config.token.clone())
            .context("building API client")?;

        Ok(Self { api, config })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn emit_success(&self, code: &str, message: &str) {
        emit(Level::Success, code, message, None);
    }

    pub fn emit_info(&self, code: &str, message: &str) {
        emit(Level::Info, code, message, None);
    }

    pub fn emit_failure(&self, code: &str, message: &str) {
        emit(Level::Warn, code, message, None);
    }

    /// Transient notification for a failed call: the backend message (or a
    /// generic fallback) for the user, the full error when debugging.
    pub fn report_api_error(&self, code: &str, err: &ApiError) {
        self.emit_failure(code, &err.notification());
        if crate::ui::is_debug_enabled() {
            emit(Level::Debug, code, &format!("{err:?}"), None);
        }
    }
}
